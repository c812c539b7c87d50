//! End-to-end tests for the setup-claude-server binary

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tempfile::TempDir;

const SERVER: &str = "markdown-editor-mcp";

/// A fake home directory with the config path resolved for macOS.
struct Sandbox {
    home: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            home: TempDir::new().unwrap(),
        }
    }

    fn config_path(&self) -> PathBuf {
        self.home
            .path()
            .join("Library")
            .join("Application Support")
            .join("Claude")
            .join("claude_desktop_config.json")
    }

    fn install_dir(&self) -> PathBuf {
        self.home.path().join("pkg")
    }

    fn server_path(&self) -> String {
        self.install_dir()
            .join("dist")
            .join("index.js")
            .to_string_lossy()
            .into_owned()
    }

    fn cmd(&self, platform: &str) -> Command {
        let mut cmd = Command::cargo_bin("setup-claude-server").expect("Failed to find binary");
        cmd.env("HOME", self.home.path())
            .env("USERPROFILE", self.home.path())
            .env_remove("APPDATA")
            .env_remove("MDMCP_PLATFORM")
            .env_remove("MDMCP_INSTALL_DIR")
            .env_remove("RUST_LOG")
            .arg("--platform")
            .arg(platform)
            .arg("--install-dir")
            .arg(self.install_dir());
        cmd
    }

    fn mac(&self) -> Command {
        self.cmd("darwin")
    }

    fn write_config(&self, content: &str) {
        std::fs::create_dir_all(self.config_path().parent().unwrap()).unwrap();
        std::fs::write(self.config_path(), content).unwrap();
    }

    fn read_config(&self) -> Value {
        read_json(&self.config_path())
    }

    fn latest_log(&self) -> String {
        std::fs::read_to_string(
            self.home
                .path()
                .join(".claude-code-logs")
                .join("setup-latest.log"),
        )
        .unwrap_or_default()
    }
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

// ============================================================================
// Install
// ============================================================================

#[test]
fn test_install_creates_config_and_dirs() {
    let sandbox = Sandbox::new();

    sandbox
        .mac()
        .assert()
        .success()
        .stdout(predicate::str::contains("Added markdown-editor-mcp"))
        .stdout(predicate::str::contains("Installation complete!"));

    assert_eq!(
        sandbox.read_config(),
        json!({"mcpServers": {"markdown-editor-mcp": {"command": "node", "args": [sandbox.server_path()]}}})
    );
}

#[test]
fn test_install_twice_is_byte_identical() {
    let sandbox = Sandbox::new();

    sandbox.mac().assert().success();
    let first = std::fs::read(sandbox.config_path()).unwrap();
    sandbox.mac().assert().success();
    let second = std::fs::read(sandbox.config_path()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_debug_flag_adds_inspector() {
    let sandbox = Sandbox::new();

    sandbox
        .mac()
        .arg("--debug")
        .assert()
        .success()
        .stdout(predicate::str::contains("Debug mode enabled"))
        .stdout(predicate::str::contains("port 9229"));

    let entry = &sandbox.read_config()["mcpServers"][SERVER];
    assert_eq!(entry["command"], "node");
    assert_eq!(
        entry["args"],
        json!(["--inspect-brk=9229", sandbox.server_path()])
    );
}

#[test]
fn test_unknown_arguments_are_ignored() {
    let sandbox = Sandbox::new();

    sandbox
        .mac()
        .args(["--global", "whatever", "--debug"])
        .assert()
        .success();

    let args = &sandbox.read_config()["mcpServers"][SERVER]["args"];
    assert_eq!(args[0], "--inspect-brk=9229");
}

#[test]
fn test_windows_uses_appdata() {
    let sandbox = Sandbox::new();
    let appdata = sandbox.home.path().join("Roaming-override");

    sandbox
        .cmd("win32")
        .env("APPDATA", &appdata)
        .assert()
        .success();

    let path = appdata.join("Claude").join("claude_desktop_config.json");
    assert!(read_json(&path)["mcpServers"][SERVER].is_object());
}

#[test]
fn test_windows_falls_back_to_home_roaming() {
    let sandbox = Sandbox::new();

    sandbox.cmd("win32").assert().success();

    let path = sandbox
        .home
        .path()
        .join("AppData")
        .join("Roaming")
        .join("Claude")
        .join("claude_desktop_config.json");
    assert!(path.exists());
}

// ============================================================================
// Uninstall
// ============================================================================

#[test]
fn test_install_then_uninstall_restores_other_keys() {
    let sandbox = Sandbox::new();
    let original = json!({
        "globalShortcut": "Alt+Space",
        "mcpServers": {
            "filesystem": {"command": "npx", "args": ["-y", "@modelcontextprotocol/server-filesystem"]}
        },
        "zoom": 1.25
    });
    sandbox.write_config(&serde_json::to_string_pretty(&original).unwrap());

    sandbox.mac().assert().success();
    sandbox
        .mac()
        .arg("--uninstall")
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed markdown-editor-mcp"))
        .stdout(predicate::str::contains("Uninstallation complete!"));

    assert_eq!(sandbox.read_config(), original);
    let keys: Vec<String> = sandbox
        .read_config()
        .as_object()
        .unwrap()
        .keys()
        .cloned()
        .collect();
    assert_eq!(keys, vec!["globalShortcut", "mcpServers", "zoom"]);
}

#[test]
fn test_uninstall_when_absent_succeeds() {
    let sandbox = Sandbox::new();
    sandbox.write_config(r#"{"mcpServers": {"other": {"command": "x", "args": []}}}"#);

    sandbox
        .mac()
        .arg("--uninstall")
        .assert()
        .success()
        .stdout(predicate::str::contains("was not found"));

    assert_eq!(
        sandbox.read_config(),
        json!({"mcpServers": {"other": {"command": "x", "args": []}}})
    );
}

#[test]
fn test_uninstall_without_config_writes_empty_mapping() {
    let sandbox = Sandbox::new();

    sandbox.mac().arg("--uninstall").assert().success();

    assert_eq!(sandbox.read_config(), json!({"mcpServers": {}}));
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_unsupported_platform_fails_without_writing() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd("linux")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unsupported operating system: linux"));

    assert!(!sandbox.home.path().join("Library").exists());
    assert!(!sandbox.home.path().join("AppData").exists());
}

#[test]
fn test_malformed_config_is_left_alone() {
    let sandbox = Sandbox::new();
    sandbox.write_config("{ \"mcpServers\": { oops");

    sandbox
        .mac()
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error parsing existing config"));

    assert_eq!(
        std::fs::read_to_string(sandbox.config_path()).unwrap(),
        "{ \"mcpServers\": { oops"
    );
}

#[test]
fn test_config_io_failure_is_reported_and_logged() {
    let sandbox = Sandbox::new();
    // A directory where the config file should be
    std::fs::create_dir_all(sandbox.config_path()).unwrap();

    sandbox
        .mac()
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Setup failed:"));

    let log = sandbox.latest_log();
    assert_eq!(log.lines().count(), 1);
    assert!(log.contains("] ERROR: Setup failed: "));
    assert!(sandbox.config_path().is_dir());
}

#[test]
fn test_failure_with_unwritable_log_prints_log_error() {
    let sandbox = Sandbox::new();
    std::fs::create_dir_all(sandbox.config_path()).unwrap();
    std::fs::write(sandbox.home.path().join(".claude-code-logs"), "not a directory").unwrap();

    sandbox
        .mac()
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Setup failed:"))
        .stderr(predicate::str::contains("[Log Error]"));
}

#[test]
fn test_validation_failure_is_not_logged() {
    let sandbox = Sandbox::new();
    sandbox.write_config("not json");

    sandbox.mac().assert().failure().code(1);

    assert_eq!(sandbox.latest_log(), "");
}

#[cfg(unix)]
#[test]
fn test_non_utf8_argument_is_ignored() {
    use std::os::unix::ffi::OsStringExt;

    let sandbox = Sandbox::new();

    sandbox
        .mac()
        .arg(std::ffi::OsString::from_vec(b"--weird-\xff".to_vec()))
        .arg("--debug")
        .assert()
        .success();

    let args = &sandbox.read_config()["mcpServers"][SERVER]["args"];
    assert_eq!(args[0], "--inspect-brk=9229");
}

// ============================================================================
// Restart
// ============================================================================

#[test]
fn test_restart_off_macos_warns_and_still_installs() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd("win32")
        .arg("--restart")
        .assert()
        .success()
        .stderr(predicate::str::contains("--restart is only supported on macOS"))
        .stdout(predicate::str::contains("1. Restart Claude Desktop app"));

    let path = sandbox
        .home
        .path()
        .join("AppData")
        .join("Roaming")
        .join("Claude")
        .join("claude_desktop_config.json");
    assert!(read_json(&path)["mcpServers"][SERVER].is_object());
}

// ============================================================================
// Setup log
// ============================================================================

#[test]
fn test_success_is_logged() {
    let sandbox = Sandbox::new();

    sandbox.mac().arg("--debug").assert().success();
    sandbox.mac().arg("--uninstall").assert().success();

    let log = sandbox.latest_log();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with('['));
    assert!(lines[0].ends_with("Setup completed successfully - Mode: install, Debug: true"));
    assert!(lines[1].ends_with("Setup completed successfully - Mode: uninstall, Debug: false"));
}

#[test]
fn test_unwritable_log_dir_does_not_fail_setup() {
    let sandbox = Sandbox::new();
    std::fs::write(sandbox.home.path().join(".claude-code-logs"), "not a directory").unwrap();

    sandbox.mac().assert().success();

    assert!(sandbox.read_config()["mcpServers"][SERVER].is_object());
}

#[test]
fn test_help_exits_before_setup() {
    let sandbox = Sandbox::new();

    sandbox
        .mac()
        .args(["--debug", "-h"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));

    assert!(!sandbox.config_path().exists());
}

#[test]
fn test_help() {
    Command::cargo_bin("setup-claude-server")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--uninstall"))
        .stdout(predicate::str::contains("--debug"));
}
