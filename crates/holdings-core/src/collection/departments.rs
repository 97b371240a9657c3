//! Per-department collection rules. Each function is an ordered decision
//! list: the first rule that applies wins, and `None` means the id fits no
//! rule for that department.

use regex::Regex;
use std::sync::LazyLock;

use super::overrides;

pub const PEABODY: &str = "peabody";

static BMAC_GENERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^bmac_([a-z0-9-]+)_").expect("valid bmac regex"));

static DLG_TURNINGPOINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^dlg_turningpoint_(ahc|harg)(\d+)([a-z])?-").expect("valid turningpoint regex")
});

static DLG_GENERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^dlg_([a-z0-9-]*_[a-z0-9-]*)_").expect("valid dlg regex"));

static DLG_HARGRETT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^dlg-hargrett_([a-z]{3,4}_[a-z0-9]{4})_").expect("valid dlg-hargrett regex")
});

static DLG_MAGIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^dlg-magil_([a-z]{4}_[a-z0-9]{6})_").expect("valid dlg-magil regex")
});

static HARGRETT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(harg-[a-z0-9-]+?)(?:-web|er)").expect("valid hargrett regex")
});

static RUSSELL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^rbrl-?(\d{3})(?:[^0-9]|$)").expect("valid russell regex"));

const TURNINGPOINT_PREFIX: &str = "dlg_turningpoint_";
const SUMC_PREFIX: &str = "dlg_sumc_";
const SUMC_COLLECTION: &str = "dlg_sumc";

fn first_capture(re: &Regex, aip_id: &str) -> Option<String> {
    re.captures(aip_id)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Brown Media Archives.
pub fn bmac(aip_id: &str) -> Option<String> {
    // Peabody Awards AIPs use a numeric id straight after "bmac_"
    if aip_id.chars().nth(5).is_some_and(|c| c.is_ascii_digit()) {
        return Some(PEABODY.to_string());
    }
    if let Some(collection) = overrides::by_prefix(overrides::BMAC_LEGACY_PREFIXES, aip_id) {
        return Some(collection);
    }
    first_capture(&BMAC_GENERIC, aip_id)
}

/// Digital Library of Georgia.
pub fn dlg(aip_id: &str) -> Option<String> {
    if let Some(collection) = overrides::by_exact(overrides::DLG_EXACT_OVERRIDES, aip_id) {
        return Some(collection);
    }
    if let Some(collection) = overrides::by_prefix(overrides::DLG_PREFIX_OVERRIDES, aip_id) {
        return Some(collection);
    }
    if aip_id.starts_with(TURNINGPOINT_PREFIX) {
        return turningpoint(aip_id);
    }
    if aip_id.starts_with(SUMC_PREFIX) {
        return Some(SUMC_COLLECTION.to_string());
    }
    first_capture(&DLG_GENERIC, aip_id)
}

/// Turning Point AIPs embed a partner collection number, zero padded, with
/// an optional one-letter suffix. The number is normalized numerically.
fn turningpoint(aip_id: &str) -> Option<String> {
    let caps = DLG_TURNINGPOINT.captures(aip_id)?;
    let number: u64 = caps.get(2)?.as_str().parse().ok()?;
    let letter = caps.get(3).map(|m| m.as_str()).unwrap_or("");

    match (&caps[1], letter) {
        ("ahc", _) => Some(format!("ahc{number}{letter}")),
        ("harg", "v") => Some(format!("harg-ua{number}v")),
        ("harg", _) => Some(format!("harg-ms{number}{letter}")),
        _ => None,
    }
}

/// DLG content held for Hargrett.
pub fn dlg_hargrett(aip_id: &str) -> Option<String> {
    first_capture(&DLG_HARGRETT, aip_id)
}

/// DLG content held for the Map and Government Information Library.
pub fn dlg_magil(aip_id: &str) -> Option<String> {
    first_capture(&DLG_MAGIL, aip_id)
}

/// Hargrett: everything before the "-web" or "er" marker.
pub fn hargrett(aip_id: &str) -> Option<String> {
    first_capture(&HARGRETT, aip_id)
}

/// Russell: "rbrl" plus the three digit collection number, with or without
/// a dash between them.
pub fn russell(aip_id: &str) -> Option<String> {
    first_capture(&RUSSELL, aip_id).map(|number| format!("rbrl{number}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bmac_peabody_numeric() {
        assert_eq!(bmac("bmac_2015007_0001").as_deref(), Some("peabody"));
        assert_eq!(bmac("bmac_51234_mpeg4").as_deref(), Some("peabody"));
    }

    #[test]
    fn bmac_legacy_prefixes() {
        assert_eq!(bmac("bmac_wsb-video16770_mpeg4").as_deref(), Some("wsbn"));
        assert_eq!(bmac("bmac_wrdw-video0042").as_deref(), Some("wrdw"));
        assert_eq!(bmac("bmac_hm-lawton_0001").as_deref(), Some("hm-lawton"));
    }

    #[test]
    fn bmac_generic() {
        assert_eq!(bmac("bmac_hm-bizlaw_0005").as_deref(), Some("hm-bizlaw"));
        assert_eq!(bmac("bmac_wgst_0010").as_deref(), Some("wgst"));
    }

    #[test]
    fn bmac_unrecognized() {
        assert_eq!(bmac("bmac_nounderscore"), None);
        assert_eq!(bmac("bmac_UPPER_0001"), None);
        assert_eq!(bmac("bmac"), None);
    }

    #[test]
    fn dlg_overrides_win() {
        assert_eq!(dlg("dlg_ugabma_wsbn_12345").as_deref(), Some("wsbn"));
        assert_eq!(dlg("dlg_ugabma_wrdw_0099").as_deref(), Some("wrdw"));
        assert_eq!(dlg("dlg_gnd_buoy-001").as_deref(), Some("gnd_buoy"));
    }

    #[test]
    fn dlg_turningpoint_strips_leading_zeros() {
        let collection = dlg("dlg_turningpoint_harg0015-001-002").unwrap();
        assert_eq!(collection, "harg-ms15");
        assert!(collection.contains("15"));
        assert!(!collection.contains("0015"));
    }

    #[test]
    fn dlg_turningpoint_templates() {
        assert_eq!(
            dlg("dlg_turningpoint_ahc0062f-001").as_deref(),
            Some("ahc62f")
        );
        assert_eq!(dlg("dlg_turningpoint_ahc0100-003").as_deref(), Some("ahc100"));
        assert_eq!(
            dlg("dlg_turningpoint_harg0097v-002").as_deref(),
            Some("harg-ua97v")
        );
        assert_eq!(
            dlg("dlg_turningpoint_harg1234b-001").as_deref(),
            Some("harg-ms1234b")
        );
    }

    #[test]
    fn dlg_turningpoint_unknown_partner_is_not_guessed() {
        assert_eq!(dlg("dlg_turningpoint_ghs0001-001"), None);
        assert_eq!(dlg("dlg_turningpoint_misc_extra_0001"), None);
    }

    #[test]
    fn dlg_sumc_fixed() {
        assert_eq!(dlg("dlg_sumc_pr0001").as_deref(), Some("dlg_sumc"));
        assert_eq!(dlg("dlg_sumc_anything_else").as_deref(), Some("dlg_sumc"));
    }

    #[test]
    fn dlg_generic() {
        assert_eq!(
            dlg("dlg_ghn_savannah-tribune_1875-12-04").as_deref(),
            Some("ghn_savannah-tribune")
        );
        assert_eq!(dlg("dlg_vang_aba001_001").as_deref(), Some("vang_aba001"));
        assert_eq!(dlg("dlg_single-segment"), None);
    }

    #[test]
    fn dlg_hargrett_fixed_width() {
        assert_eq!(
            dlg_hargrett("dlg-hargrett_hmf_1234_0001").as_deref(),
            Some("hmf_1234")
        );
        assert_eq!(
            dlg_hargrett("dlg-hargrett_nga_a1b2_er").as_deref(),
            Some("nga_a1b2")
        );
        assert_eq!(dlg_hargrett("dlg-hargrett_hmf_123_0001"), None);
    }

    #[test]
    fn dlg_magil_fixed_width() {
        assert_eq!(
            dlg_magil("dlg-magil_gasr_bo1890_0001").as_deref(),
            Some("gasr_bo1890")
        );
        assert_eq!(dlg_magil("dlg-magil_gas_bo1890_0001"), None);
        assert_eq!(dlg_magil("dlg-magil_gasr_bo189_0001"), None);
    }

    #[test]
    fn hargrett_suffix_markers() {
        assert_eq!(hargrett("harg-ms3786er0001").as_deref(), Some("harg-ms3786"));
        assert_eq!(
            hargrett("harg-0000-web-202107-0001").as_deref(),
            Some("harg-0000")
        );
        assert_eq!(hargrett("harg-ua97-0010er0003").as_deref(), Some("harg-ua97-0010"));
        assert_eq!(hargrett("harg-ms3786-0001"), None);
    }

    #[test]
    fn russell_spellings_normalize() {
        assert_eq!(russell("rbrl-153-er-000015").as_deref(), Some("rbrl153"));
        assert_eq!(russell("rbrl153-xyz").as_deref(), Some("rbrl153"));
        assert_eq!(russell("rbrl153").as_deref(), Some("rbrl153"));
    }

    #[test]
    fn russell_requires_exactly_three_digits() {
        assert_eq!(russell("rbrl-1534-er-000001"), None);
        assert_eq!(russell("rbrl-15-er-000001"), None);
        assert_eq!(russell("russ-153-er-000001"), None);
    }
}
