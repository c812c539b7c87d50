//! The launch descriptor Claude Desktop uses to spawn the MCP server.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key under `mcpServers` this tool owns.
pub const SERVER_NAME: &str = "markdown-editor-mcp";

/// Runtime the server entry point is executed with.
pub const RUNTIME_COMMAND: &str = "node";

/// Port the Node inspector listens on in debug mode.
pub const INSPECTOR_PORT: u16 = 9229;

/// Inspector argument that pauses the server until a debugger attaches.
pub const INSPECT_FLAG: &str = "--inspect-brk=9229";

/// Resolve `dist/index.js` under the install directory.
pub fn server_entry_point(install_dir: &Path) -> PathBuf {
    install_dir.join("dist").join("index.js")
}

/// `{ "command": ..., "args": [...] }` as stored in `mcpServers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchDescriptor {
    pub command: String,
    pub args: Vec<String>,
}

impl LaunchDescriptor {
    /// Descriptor running `server_path` under Node, optionally behind
    /// `--inspect-brk`.
    pub fn for_server(server_path: &Path, debug: bool) -> Self {
        let server_path = server_path.to_string_lossy().into_owned();
        let args = if debug {
            vec![INSPECT_FLAG.to_string(), server_path]
        } else {
            vec![server_path]
        };
        Self {
            command: RUNTIME_COMMAND.to_string(),
            args,
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "command": self.command,
            "args": self.args,
        })
    }
}
