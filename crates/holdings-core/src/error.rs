use std::path::PathBuf;

/// Fatal errors. Any of these aborts a run before output is written.
#[derive(Debug, thiserror::Error)]
pub enum HoldingsError {
    #[error("format '{format_name}' is not in the standardization table. Add it to the table and run again")]
    UnstandardizedFormat { format_name: String },

    #[error("required input file not found: {}", path.display())]
    MissingInput { path: PathBuf },

    #[error("failed to read table from {source_name}: {reason}")]
    TableRead { source_name: String, reason: String },

    #[error("table {table} is missing required column '{column}'")]
    MissingColumn { table: String, column: String },

    #[error("failed to parse {table} row {row}: {reason}")]
    Parse {
        table: String,
        row: usize,
        reason: String,
    },

    #[error("invalid reference table {table}: {reason}")]
    ReferenceInvalid { table: String, reason: String },

    #[error("invalid run configuration: {0}")]
    ConfigInvalid(String),

    #[error("failed to load run configuration from {}: {}", path.display(), reason)]
    ConfigLoad { path: PathBuf, reason: String },

    #[error(transparent)]
    Collection(#[from] CollectionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Failures of collection identifier inference.
///
/// The two variants are kept apart so callers can tell a configuration
/// problem (unknown department) from a data problem (unrecognized AIP id).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollectionError {
    #[error("unknown department '{department}'")]
    UnknownDepartment { department: String },

    #[error("AIP id '{aip_id}' does not match any {department} collection pattern")]
    PatternNotRecognized { department: String, aip_id: String },
}
