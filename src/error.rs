use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error(transparent)]
    Common(#[from] results_lookup_common::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Dataset not found: {0}")]
    DatasetNotFound(String),

    #[error("Dataset has no records: {0}")]
    EmptyDataset(String),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Prompt error: {0}")]
    Prompt(String),
}

pub type Result<T> = std::result::Result<T, LookupError>;
