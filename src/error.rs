use thiserror::Error;

pub type Result<T> = std::result::Result<T, DigestError>;

/// Coarse classification of a pipeline failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Transport,
    Parse,
    Publish,
    Unexpected,
}

/// A request rejected by an AWS service (Parameter Store or SNS).
#[derive(Debug, Clone, Error)]
#[error("{operation} failed ({}): {message}", .code.as_deref().unwrap_or("unknown"))]
pub struct ServiceError {
    pub operation: &'static str,
    pub code: Option<String>,
    pub message: String,
}

impl ServiceError {
    pub fn new(operation: &'static str, code: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            operation,
            code: code.map(str::to_string),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum DigestError {
    /// None of the configured sources yielded a value.
    #[error("no value found for configuration {0}")]
    MissingConfiguration(String),

    /// The secret store rejected the lookup.
    #[error("{0}")]
    SecretStore(ServiceError),

    #[error("request to game data API failed: {0}")]
    Transport(String),

    #[error("invalid game data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{0}")]
    Publish(ServiceError),

    #[error("{0}")]
    Unexpected(String),
}

impl DigestError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DigestError::MissingConfiguration(_) | DigestError::SecretStore(_) => {
                ErrorKind::Configuration
            }
            DigestError::Transport(_) => ErrorKind::Transport,
            DigestError::Parse(_) => ErrorKind::Parse,
            DigestError::Publish(_) => ErrorKind::Publish,
            DigestError::Unexpected(_) => ErrorKind::Unexpected,
        }
    }

    /// True when the failure originated inside an AWS service call.
    pub fn is_service_error(&self) -> bool {
        matches!(self, DigestError::SecretStore(_) | DigestError::Publish(_))
    }
}
