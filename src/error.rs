use thiserror::Error;

#[derive(Error, Debug)]
pub enum PurseError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid amount: {0:?} (expected a positive number, e.g. 12.50)")]
    InvalidAmount(String),

    #[error("Invalid entry type: {0} (must be 'expense' or 'income')")]
    InvalidEntryType(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, PurseError>;
