use thiserror::Error;

#[derive(Error, Debug)]
pub enum TagbookError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid date: {0:?}")]
    InvalidDate(String),

    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),

    #[error("Keyword already exists: {0}")]
    DuplicateKeyword(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Keyword must not be empty")]
    EmptyKeyword,

    #[error("Tag must not be empty")]
    EmptyTag,

    #[error("Tag must not contain a comma: {0:?}")]
    InvalidTag(String),

    #[error("Tag propagation incomplete: {updated} updated, {failed} failed")]
    PropagationIncomplete { updated: usize, failed: usize },

    #[error("CSV must have at least 4 columns: date, description, amount_spent, amount_received (found {0})")]
    TooFewColumns(usize),

    #[error("File must be a CSV: {0}")]
    NotCsv(String),

    #[error("Invalid month {0:?} (expected YYYY-MM)")]
    InvalidMonth(String),

    #[error("Settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, TagbookError>;
