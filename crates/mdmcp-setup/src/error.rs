//! Error types for mdmcp-setup

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] mdmcp_fs::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported operating system: {os}")]
    UnsupportedPlatform { os: String },

    #[error("Could not determine the home directory")]
    HomeDirNotFound,

    #[error("Error parsing existing config at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Existing config at {path} is not a JSON object")]
    ConfigNotObject { path: PathBuf },

    #[error("\"{key}\" in {path} is not a JSON object")]
    ServersNotObject { path: PathBuf, key: String },

    #[error("Command `{command}` failed: {message}")]
    Command { command: String, message: String },
}

impl Error {
    /// Whether this error comes from validating the platform or the existing
    /// config, as opposed to a failure while doing the work.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedPlatform { .. }
                | Self::ConfigParse { .. }
                | Self::ConfigNotObject { .. }
                | Self::ServersNotObject { .. }
        )
    }
}
