//! Restarting Claude Desktop so it rereads its config.
//!
//! Only macOS has the `pkill` / `open -a` pair this relies on.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::steps::{SetupSteps, StepStatus};

/// Process names Claude Desktop may run under.
pub const APP_PROCESS_NAMES: [&str; 2] = ["Claude", "Claude.app"];

/// Pause between terminating and relaunching the app.
pub const RESTART_DELAY: Duration = Duration::from_secs(1);

/// Runs an external program and returns its trimmed stdout.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, program: &str, args: &[&str]) -> Result<String>;
}

/// [`CommandRunner`] backed by `tokio::process`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandRunner;

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<String> {
        let command = render(program, args);
        tracing::debug!(%command, "running");
        let output = tokio::process::Command::new(program)
            .args(args)
            .output()
            .await
            .map_err(|e| Error::Command {
                command: command.clone(),
                message: e.to_string(),
            })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(Error::Command {
                command,
                message: if stderr.is_empty() {
                    output.status.to_string()
                } else {
                    stderr
                },
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

fn render(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Kill any running Claude Desktop and launch it again.
///
/// Kill failures are ignored since the app may not be running. A failed
/// launch marks the `restart_claude` step failed and is returned.
pub async fn restart_desktop_app(
    runner: &dyn CommandRunner,
    steps: &mut SetupSteps,
    delay: Duration,
) -> Result<()> {
    let step = steps.add("restart_claude", StepStatus::Started, None);

    for name in APP_PROCESS_NAMES {
        if let Err(e) = runner.run("pkill", &["-x", name]).await {
            tracing::debug!(process = name, error = %e, "pkill failed, assuming not running");
        }
    }

    tokio::time::sleep(delay).await;

    match runner.run("open", &["-a", "Claude"]).await {
        Ok(_) => {
            steps.update(step, StepStatus::Completed, None);
            Ok(())
        }
        Err(e) => {
            steps.update(step, StepStatus::Failed, Some(e.to_string()));
            tracing::warn!(error = %e, "failed to restart Claude");
            Err(e)
        }
    }
}
