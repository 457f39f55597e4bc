use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Question position outside the catalog
    #[error("question index {index} is out of range (catalog has {len} questions)")]
    OutOfRange { index: usize, len: usize },

    /// Question id not in the catalog
    #[error("unknown question: {0}")]
    UnknownQuestion(String),

    /// Answer is not one of the question's options
    #[error("'{option}' is not a valid option for question {question_id}")]
    InvalidOption { question_id: String, option: String },

    /// Same question id appears twice in a bulk header
    #[error("duplicate question column: {0}")]
    DuplicateQuestion(String),

    /// Bulk header does not start with the respondent id column
    #[error("first column must be 'id', found '{0}'")]
    MissingIdColumn(String),

    #[error("risk score must not be negative, got {0}")]
    InvalidScore(i64),

    /// Question bank or tier content failed its consistency checks
    #[error("invalid catalog: {0}")]
    Catalog(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
