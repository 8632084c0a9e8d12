use thiserror::Error;

/// Rejection reasons for a rule set coming out of the rules editor.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("rule set JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("rule set must be a JSON array")]
    NotAnArray,

    #[error("rule set is empty")]
    Empty,

    #[error("rule set has {0} rules, at most {max} are allowed", max = crate::rules::MAX_RULES)]
    TooMany(usize),

    #[error("duplicate rule label: {0}")]
    DuplicateLabel(String),

    #[error("points must be an integer: {0}")]
    NonIntegerPoints(String),

    #[error("max_picks must be an integer of at least 1: {0}")]
    InvalidMaxPicks(String),
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("cannot read snapshot {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("snapshot JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("entry number {0} appears more than once")]
    DuplicateEntry(u32),
}
