use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArcError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid Search Pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),

    #[error("Data Conversion Error: column '{column}' (row {row}) has value '{value}'")]
    DataConversion {
        column: String,
        row: usize,
        value: String,
    },

    #[error("Terminal Error: {0}")]
    Terminal(String),
}

pub type ArcResult<T> = Result<T, ArcError>;
