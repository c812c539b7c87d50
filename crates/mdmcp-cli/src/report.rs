//! Console progress and next-step guidance

use std::path::Path;

use colored::Colorize;

use mdmcp_setup::server::INSPECTOR_PORT;
use mdmcp_setup::{SERVER_NAME, SetupMode, SetupOutcome};

pub fn banner() {
    println!();
    println!(
        "{} Setting up Markdown Editor MCP for Claude Desktop...",
        "=>".blue().bold()
    );
    println!();
}

pub fn mode_notices(debug: bool, mode: SetupMode) {
    if debug {
        println!("{} Debug mode enabled", "DEBUG".magenta().bold());
        println!();
    }
    if mode == SetupMode::Uninstall {
        println!("{} Uninstall mode", "=>".blue().bold());
        println!();
    }
}

pub fn outcome(outcome: &SetupOutcome, debug: bool) {
    match outcome {
        SetupOutcome::Removed => println!(
            "{} Removed {} from Claude config",
            "OK".green().bold(),
            SERVER_NAME.cyan()
        ),
        SetupOutcome::NotPresent => println!(
            "{} {} was not found in Claude config",
            "INFO".blue().bold(),
            SERVER_NAME.cyan()
        ),
        SetupOutcome::Installed { server_path, .. } => {
            println!(
                "{} Added {} to Claude config",
                "OK".green().bold(),
                SERVER_NAME.cyan()
            );
            println!("   Server path: {}", server_path.display());
            if debug {
                println!();
                println!("{} Debug mode configuration:", "DEBUG".magenta().bold());
                println!("- Node.js inspector will be available on port {INSPECTOR_PORT}");
                println!("- You can attach a debugger to debug the MCP server");
                println!("- Use Chrome DevTools or VS Code for debugging");
                println!("- Open chrome://inspect in Chrome to connect to the debugger");
                println!();
            }
        }
    }
}

pub fn config_written(path: &Path) {
    println!(
        "{} Updated Claude config at: {}",
        "OK".green().bold(),
        path.display()
    );
}

/// Closing summary. `restarted` skips the manual restart instruction.
pub fn completion(mode: SetupMode, debug: bool, restarted: bool) {
    println!();
    match mode {
        SetupMode::Install => {
            println!("{}", "Installation complete!".green().bold());
            println!();
            println!("Next steps:");
            if restarted {
                println!("1. Claude Desktop has been restarted");
            } else {
                println!("1. Restart Claude Desktop app");
            }
            println!("2. Look for \"{SERVER_NAME}\" in the available MCP servers");
            println!("3. The server will start automatically when you use Claude");
            println!();
            if debug {
                println!("{} Debug-specific instructions:", "DEBUG".magenta().bold());
                println!("- When Claude starts the server, it will pause and wait for debugger");
                println!("- Attach your debugger to port {INSPECTOR_PORT} to continue execution");
                println!();
            }
        }
        SetupMode::Uninstall => {
            println!("{}", "Uninstallation complete!".green().bold());
            println!("The server has been removed from Claude config.");
            if !restarted {
                println!("Restart Claude Desktop app to apply changes.");
            }
            println!();
        }
    }
}

pub fn restart_unsupported() {
    eprintln!(
        "{} --restart is only supported on macOS; restart Claude Desktop manually.",
        "warning:".yellow().bold()
    );
}
