use bymadata_core::ClientError;
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("usage error: {0}")]
    Usage(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Client(ClientError::NotFound { .. }) => 3,
            Self::Client(ClientError::Fetch(_)) => 4,
            Self::Client(ClientError::InconsistentSeries(_)) => 4,
            Self::Client(ClientError::InvalidInput(_)) => 2,
            Self::Usage(_) => 2,
            Self::Serialization(_) => 5,
            Self::Io(_) => 10,
        }
    }
}
