use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocuQueryError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The analysis API answered with a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DocuQueryError {
    /// Message suitable for a user-facing notification.
    pub fn user_message(&self) -> String {
        match self {
            DocuQueryError::Api { message, .. } => message.clone(),
            DocuQueryError::Validation(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DocuQueryError>;
