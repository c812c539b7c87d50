//! Platform detection and Claude Desktop config locations.
//!
//! Configuration:
//! - macOS: `~/Library/Application Support/Claude/claude_desktop_config.json`
//! - Windows: `%APPDATA%\Claude\claude_desktop_config.json`, falling back to
//!   `~/AppData/Roaming` when `APPDATA` is unset
//!
//! No other platform is supported.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// File name Claude Desktop reads its settings from.
pub const CONFIG_FILE_NAME: &str = "claude_desktop_config.json";

/// Operating systems Claude Desktop ships for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Windows,
}

impl Platform {
    /// Map an operating-system identifier to a platform.
    ///
    /// Accepts both Rust's names (`macos`, `windows`) and Node's
    /// (`darwin`, `win32`).
    pub fn from_os(os: &str) -> Result<Self> {
        match os.to_ascii_lowercase().as_str() {
            "macos" | "darwin" => Ok(Self::MacOs),
            "windows" | "win32" => Ok(Self::Windows),
            _ => Err(Error::UnsupportedPlatform { os: os.to_string() }),
        }
    }

    /// The platform this binary was compiled for.
    pub fn current() -> Result<Self> {
        Self::from_os(std::env::consts::OS)
    }

    /// Absolute path of `claude_desktop_config.json` on this platform.
    pub fn config_path(self, dirs: &HomeDirs) -> PathBuf {
        let base = match self {
            Self::MacOs => dirs.home.join("Library").join("Application Support"),
            Self::Windows => dirs
                .appdata
                .clone()
                .unwrap_or_else(|| dirs.home.join("AppData").join("Roaming")),
        };
        base.join("Claude").join(CONFIG_FILE_NAME)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MacOs => write!(f, "macos"),
            Self::Windows => write!(f, "windows"),
        }
    }
}

/// User directories the config and log paths are derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeDirs {
    pub home: PathBuf,
    pub appdata: Option<PathBuf>,
}

impl HomeDirs {
    /// Read `HOME` (or `USERPROFILE`) and `APPDATA` from the environment.
    pub fn from_env() -> Result<Self> {
        let home = std::env::var_os("HOME")
            .or_else(|| std::env::var_os("USERPROFILE"))
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(dirs::home_dir)
            .ok_or(Error::HomeDirNotFound)?;
        let appdata = std::env::var_os("APPDATA")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Ok(Self { home, appdata })
    }
}

/// Create the directory holding `config_path` if it is missing.
pub fn ensure_config_dir(config_path: &Path) -> Result<()> {
    if let Some(dir) = config_path.parent() {
        if !dir.exists() {
            tracing::debug!(dir = %dir.display(), "creating config directory");
            std::fs::create_dir_all(dir).map_err(|e| mdmcp_fs::Error::io(dir, e))?;
        }
    }
    Ok(())
}
