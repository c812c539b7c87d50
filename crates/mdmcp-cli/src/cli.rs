//! CLI argument parsing using clap derive

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use clap::error::ErrorKind;

/// Register the Markdown Editor MCP server with Claude Desktop
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "setup-claude-server")]
#[command(author, version, about, long_about = None)]
#[command(args_override_self = true)]
pub struct Cli {
    /// Launch the server under the Node inspector (port 9229)
    #[arg(long)]
    pub debug: bool,

    /// Remove the server from the Claude Desktop config instead of adding it
    #[arg(long)]
    pub uninstall: bool,

    /// Restart Claude Desktop afterwards (macOS only)
    #[arg(long)]
    pub restart: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Package directory containing dist/index.js [default: directory of this executable]
    #[arg(long, env = "MDMCP_INSTALL_DIR", value_name = "DIR")]
    pub install_dir: Option<PathBuf>,

    /// Operating system to resolve the config path for
    #[arg(long, env = "MDMCP_PLATFORM", value_name = "OS", hide = true)]
    pub platform: Option<String>,
}

const FLAGS: [&str; 5] = ["--debug", "--uninstall", "--restart", "--verbose", "-v"];
const VALUED: [&str; 2] = ["--install-dir", "--platform"];

impl Cli {
    /// Parse `args`, ignoring anything unrecognized.
    ///
    /// Help and version requests exit as usual. Any other parse error causes
    /// the arguments to be reduced to the recognized ones and parsed again.
    /// Arguments need not be valid UTF-8.
    pub fn parse_lenient(args: Vec<OsString>) -> Self {
        match Self::try_parse_from(&args) {
            Ok(cli) => cli,
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                e.exit()
            }
            Err(_) => Self::try_parse_from(retain_known_args(&args)).unwrap_or_else(|e| e.exit()),
        }
    }
}

/// Keep the program name and the arguments [`Cli`] understands.
pub fn retain_known_args(args: &[OsString]) -> Vec<OsString> {
    let mut kept = Vec::with_capacity(args.len());
    let mut iter = args.iter();
    if let Some(program) = iter.next() {
        kept.push(program.clone());
    }
    while let Some(arg) = iter.next() {
        let Some(name) = arg.to_str() else {
            continue;
        };
        if FLAGS.contains(&name) {
            kept.push(arg.clone());
        } else if VALUED.contains(&name) {
            if let Some(value) = iter.next() {
                kept.push(arg.clone());
                kept.push(value.clone());
            }
        } else if VALUED
            .iter()
            .any(|flag| name.strip_prefix(flag).is_some_and(|rest| rest.starts_with('=')))
        {
            kept.push(arg.clone());
        }
    }
    kept
}
