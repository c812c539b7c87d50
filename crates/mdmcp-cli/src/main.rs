//! Markdown Editor MCP setup
//!
//! Adds the `markdown-editor-mcp` launch entry to Claude Desktop's config, or
//! removes it with `--uninstall`.

mod cli;
mod error;
mod report;

use std::path::PathBuf;

use colored::Colorize;
use tracing_subscriber::EnvFilter;

use mdmcp_setup::restart::RESTART_DELAY;
use mdmcp_setup::{
    ExecutionContext, HomeDirs, Installer, Platform, SetupLog, SetupMode, SetupSteps,
    SystemCommandRunner, detect_shell, log_best_effort, restart_desktop_app,
};

use cli::Cli;
use error::{CliError, Result};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse_lenient(std::env::args_os().collect());

    if cli.verbose {
        init_tracing();
    }

    if let Err(e) = run(&cli).await {
        if e.is_validation() {
            eprintln!("{}: {}", "error".red().bold(), e);
        } else {
            eprintln!();
            eprintln!("{}: Setup failed: {}", "error".red().bold(), e);
            if let Ok(dirs) = HomeDirs::from_env() {
                let log = SetupLog::in_home(&dirs.home);
                log_best_effort(&log, &format!("Setup failed: {e}"), true);
            }
        }
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_ok() {
        tracing::debug!("Verbose mode enabled");
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let mode = SetupMode::from_uninstall_flag(cli.uninstall);

    report::banner();
    report::mode_notices(cli.debug, mode);

    let platform = match &cli.platform {
        Some(os) => Platform::from_os(os)?,
        None => Platform::current()?,
    };
    let dirs = HomeDirs::from_env()?;
    let config_path = platform.config_path(&dirs);

    tracing::debug!(
        %platform,
        shell = %detect_shell(std::env::var("SHELL").ok().as_deref()),
        context = %ExecutionContext::from_env(),
        config = %config_path.display(),
        "resolved environment"
    );

    let installer = Installer::new(&config_path, install_dir(cli)?);
    let outcome = installer.run(mode, cli.debug)?;

    report::outcome(&outcome, cli.debug);
    report::config_written(&config_path);

    let mut restarted = false;
    if cli.restart {
        if platform == Platform::MacOs {
            let mut steps = SetupSteps::new();
            restart_desktop_app(&SystemCommandRunner, &mut steps, RESTART_DELAY).await?;
            tracing::debug!(?steps, "restart finished");
            restarted = true;
        } else {
            report::restart_unsupported();
        }
    }

    report::completion(mode, cli.debug, restarted);

    log_best_effort(
        &SetupLog::in_home(&dirs.home),
        &format!(
            "Setup completed successfully - Mode: {mode}, Debug: {}",
            cli.debug
        ),
        false,
    );
    Ok(())
}

/// `--install-dir`, or the directory this executable lives in.
fn install_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.install_dir {
        return Ok(dir.clone());
    }
    let exe = std::env::current_exe()?;
    exe.parent().map(PathBuf::from).ok_or_else(|| {
        CliError::user(format!(
            "Cannot determine install directory from {}",
            exe.display()
        ))
    })
}
