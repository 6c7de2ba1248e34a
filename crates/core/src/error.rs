#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("failed to read extraction file: {0}")]
    FileRead(std::io::Error),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type IntakeResult<T> = std::result::Result<T, IntakeError>;
