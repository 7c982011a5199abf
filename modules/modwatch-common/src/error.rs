use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModwatchError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl ModwatchError {
    /// Wrap a failed store/blocklist call, keeping the full error chain in the message.
    pub fn upstream(err: anyhow::Error) -> Self {
        ModwatchError::Upstream(format!("{err:#}"))
    }
}
