use thiserror::Error;

pub type Result<T> = std::result::Result<T, DetaError>;

#[derive(Debug, Error)]
pub enum DetaError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed project key: expected `<project id>_<secret>`")]
    InvalidKey,

    #[error("Store rejected {0} item(s)")]
    Rejected(usize),
}

impl From<reqwest::Error> for DetaError {
    fn from(err: reqwest::Error) -> Self {
        DetaError::Network(err.to_string())
    }
}
