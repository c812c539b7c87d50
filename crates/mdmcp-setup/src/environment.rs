//! Detection of the invoking shell and launcher.
//!
//! Both values only feed diagnostics.

use std::fmt;

/// Normalize `$SHELL` to a short shell name.
///
/// `None` yields `"unknown"`. Names outside the known table are returned as
/// found.
pub fn detect_shell(shell: Option<&str>) -> String {
    let shell = shell.filter(|s| !s.is_empty()).unwrap_or("unknown");
    let name = shell
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or(shell);

    match name.to_ascii_lowercase().as_str() {
        known @ ("bash" | "zsh" | "fish" | "sh" | "dash" | "ksh" | "tcsh" | "csh" | "cmd"
        | "powershell") => known.to_string(),
        "pwsh" => "powershell".to_string(),
        _ => name.to_string(),
    }
}

/// How the setup binary was launched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionContext {
    Npx,
    NpmScript(String),
    NodeDirect,
    Unknown,
}

impl ExecutionContext {
    pub fn detect(
        npm_command: Option<&str>,
        npm_lifecycle_event: Option<&str>,
        argv0: Option<&str>,
        argv1: Option<&str>,
    ) -> Self {
        if npm_command == Some("exec") || argv1.is_some_and(|a| a.contains("npx")) {
            return Self::Npx;
        }
        if let Some(event) = npm_lifecycle_event.filter(|e| !e.is_empty()) {
            return Self::NpmScript(event.to_string());
        }
        if argv0.is_some_and(|a| a.contains("node")) {
            return Self::NodeDirect;
        }
        Self::Unknown
    }

    /// Detect from the current process environment and arguments.
    pub fn from_env() -> Self {
        let npm_command = std::env::var("npm_command").ok();
        let lifecycle = std::env::var("npm_lifecycle_event").ok();
        let mut args = std::env::args_os().map(|a| a.to_string_lossy().into_owned());
        let argv0 = args.next();
        let argv1 = args.next();
        Self::detect(
            npm_command.as_deref(),
            lifecycle.as_deref(),
            argv0.as_deref(),
            argv1.as_deref(),
        )
    }
}

impl fmt::Display for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Npx => write!(f, "npx"),
            Self::NpmScript(event) => write!(f, "npm_{event}"),
            Self::NodeDirect => write!(f, "node_direct"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}
