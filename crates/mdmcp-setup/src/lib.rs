//! Claude Desktop registration for the Markdown Editor MCP server.
//!
//! This crate holds everything the setup binary does apart from argument
//! parsing and console output:
//!
//! - [`platform`] resolves where Claude Desktop keeps `claude_desktop_config.json`.
//! - [`config`] loads and saves that document without disturbing foreign keys.
//! - [`installer`] adds or removes the `markdown-editor-mcp` entry.
//! - [`log`] appends a plain-text record under `~/.claude-code-logs`.
//! - [`restart`] and [`steps`] restart the desktop app and track the outcome.
//! - [`environment`] reports the invoking shell and launcher.

pub mod config;
pub mod environment;
pub mod error;
pub mod installer;
pub mod log;
pub mod platform;
pub mod restart;
pub mod server;
pub mod steps;

pub use config::{ClaudeDesktopConfig, MCP_SERVERS_KEY};
pub use environment::{ExecutionContext, detect_shell};
pub use error::{Error, Result};
pub use installer::{Installer, SetupMode, SetupOutcome};
pub use log::{SetupLog, log_best_effort};
pub use platform::{HomeDirs, Platform, ensure_config_dir};
pub use restart::{CommandRunner, SystemCommandRunner, restart_desktop_app};
pub use server::{LaunchDescriptor, SERVER_NAME, server_entry_point};
pub use steps::{SetupStep, SetupSteps, StepId, StepStatus};
