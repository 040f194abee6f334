use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found")]
    NotFound,

    #[error("Backend error {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RepositoryError::Network(format!("Request timed out: {err}"))
        } else if err.is_connect() {
            RepositoryError::Network(format!("Connection failed: {err}"))
        } else if err.is_decode() {
            RepositoryError::Deserialization(err.to_string())
        } else {
            RepositoryError::Network(err.to_string())
        }
    }
}

impl From<url::ParseError> for RepositoryError {
    fn from(err: url::ParseError) -> Self {
        RepositoryError::InvalidBaseUrl(err.to_string())
    }
}
