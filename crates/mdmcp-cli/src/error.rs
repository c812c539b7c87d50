//! Error types for mdmcp-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from mdmcp-setup
    #[error(transparent)]
    Setup(#[from] mdmcp_setup::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }

    /// Bad platform or unreadable existing config. These are reported
    /// without a setup log record.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Setup(e) if e.is_validation())
    }
}
