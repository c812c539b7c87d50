//! Adding and removing the `markdown-editor-mcp` entry.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::ClaudeDesktopConfig;
use crate::error::Result;
use crate::platform::ensure_config_dir;
use crate::server::{LaunchDescriptor, SERVER_NAME, server_entry_point};

/// What a setup run should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupMode {
    Install,
    Uninstall,
}

impl SetupMode {
    pub fn from_uninstall_flag(uninstall: bool) -> Self {
        if uninstall { Self::Uninstall } else { Self::Install }
    }
}

impl fmt::Display for SetupMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Install => write!(f, "install"),
            Self::Uninstall => write!(f, "uninstall"),
        }
    }
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupOutcome {
    /// The entry was written (new or overwritten).
    Installed {
        server_path: PathBuf,
        descriptor: LaunchDescriptor,
    },
    /// The entry existed and was deleted.
    Removed,
    /// Uninstall found nothing to delete.
    NotPresent,
}

/// Registers the server in one Claude Desktop config file.
pub struct Installer {
    config_path: PathBuf,
    install_dir: PathBuf,
}

impl Installer {
    /// `install_dir` is the package directory containing `dist/index.js`.
    pub fn new(config_path: impl Into<PathBuf>, install_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            install_dir: install_dir.into(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn server_path(&self) -> PathBuf {
        server_entry_point(&self.install_dir)
    }

    /// Load, mutate and save the config once.
    ///
    /// The file is rewritten in every mode, so an uninstall with nothing to
    /// remove still leaves a `mcpServers` mapping on disk.
    pub fn run(&self, mode: SetupMode, debug: bool) -> Result<SetupOutcome> {
        ensure_config_dir(&self.config_path)?;
        let mut config = ClaudeDesktopConfig::load(&self.config_path)?;

        let outcome = match mode {
            SetupMode::Uninstall => {
                if config.remove_server(SERVER_NAME) {
                    tracing::info!(server = SERVER_NAME, "removed server entry");
                    SetupOutcome::Removed
                } else {
                    tracing::info!(server = SERVER_NAME, "server entry not present");
                    SetupOutcome::NotPresent
                }
            }
            SetupMode::Install => {
                let server_path = self.server_path();
                let descriptor = LaunchDescriptor::for_server(&server_path, debug);
                config.set_server(SERVER_NAME, descriptor.to_value());
                let inspector = debug;
                tracing::info!(
                    server = SERVER_NAME,
                    path = %server_path.display(),
                    inspector,
                    "installed server entry"
                );
                SetupOutcome::Installed {
                    server_path,
                    descriptor,
                }
            }
        };

        config.save()?;
        Ok(outcome)
    }
}
