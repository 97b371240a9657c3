//! Hard-coded data fixes for AIP ids that no naming convention explains.
//!
//! These are not patterns. Each entry corrects a specific historical
//! identifier (migration artifacts, data-entry errors) and should never be
//! generalized into a rule.

/// Legacy Brown Media Archives naming, checked after the Peabody rule.
pub const BMAC_LEGACY_PREFIXES: &[(&str, &str)] = &[
    ("bmac_wsb-video", "wsbn"),
    ("bmac_wrdw-video", "wrdw"),
    ("bmac_hm-lawton", "hm-lawton"),
];

/// DLG AIPs that carry another department's collection under the dlg
/// prefix, left over from the repository migration.
pub const DLG_PREFIX_OVERRIDES: &[(&str, &str)] = &[
    ("dlg_ugabma_wsbn", "wsbn"),
    ("dlg_ugabma_wrdw", "wrdw"),
];

/// Single identifiers entered with a typo.
pub const DLG_EXACT_OVERRIDES: &[(&str, &str)] = &[("dlg_gnd_buoy-001", "gnd_buoy")];

/// First collection whose prefix starts `aip_id`.
pub fn by_prefix(table: &[(&str, &str)], aip_id: &str) -> Option<String> {
    table
        .iter()
        .find(|(prefix, _)| aip_id.starts_with(prefix))
        .map(|(_, collection)| collection.to_string())
}

/// Collection for an identifier listed verbatim.
pub fn by_exact(table: &[(&str, &str)], aip_id: &str) -> Option<String> {
    table
        .iter()
        .find(|(id, _)| *id == aip_id)
        .map(|(_, collection)| collection.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_lookup() {
        assert_eq!(
            by_prefix(DLG_PREFIX_OVERRIDES, "dlg_ugabma_wsbn_12345").as_deref(),
            Some("wsbn")
        );
        assert_eq!(by_prefix(DLG_PREFIX_OVERRIDES, "dlg_ugabma_other_1"), None);
    }

    #[test]
    fn exact_lookup_does_not_match_prefixes() {
        assert_eq!(
            by_exact(DLG_EXACT_OVERRIDES, "dlg_gnd_buoy-001").as_deref(),
            Some("gnd_buoy")
        );
        assert_eq!(by_exact(DLG_EXACT_OVERRIDES, "dlg_gnd_buoy-0012"), None);
    }
}
