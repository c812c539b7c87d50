//! Reading and writing `claude_desktop_config.json`.
//!
//! The document is kept as a raw [`serde_json::Value`] so that keys this tool
//! does not own survive a load/save cycle unchanged and in their original
//! order.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Top-level key holding the name → launch descriptor mapping.
pub const MCP_SERVERS_KEY: &str = "mcpServers";

/// An in-memory Claude Desktop configuration document.
///
/// `root` keeps every top-level key in file order, with the `mcpServers` slot
/// held as a placeholder; the mapping itself lives in `servers` and is put
/// back in place when the document is serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct ClaudeDesktopConfig {
    path: PathBuf,
    root: Map<String, Value>,
    servers: Map<String, Value>,
}

impl ClaudeDesktopConfig {
    /// Load the document at `path`, or start from `{}` if there is no file.
    ///
    /// The `mcpServers` mapping is guaranteed to exist afterwards.
    pub fn load(path: &Path) -> Result<Self> {
        let value = if path.exists() {
            let content = mdmcp_fs::io::read_text(path)?;
            serde_json::from_str(&content).map_err(|source| Error::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            tracing::debug!(path = %path.display(), "no existing config, starting empty");
            Value::Object(Map::new())
        };
        Self::from_value(path, value)
    }

    /// Wrap an already-parsed document.
    ///
    /// A missing or falsy `mcpServers` (`null`, `false`, `0`, `""`) becomes
    /// an empty mapping. Any other non-object value is rejected.
    pub fn from_value(path: &Path, value: Value) -> Result<Self> {
        let Value::Object(mut root) = value else {
            return Err(Error::ConfigNotObject {
                path: path.to_path_buf(),
            });
        };

        let servers = match root.insert(MCP_SERVERS_KEY.to_string(), Value::Null) {
            None => Map::new(),
            Some(Value::Object(servers)) => servers,
            Some(value) if is_falsy(&value) => {
                tracing::debug!(%value, "replacing falsy mcpServers with an empty mapping");
                Map::new()
            }
            Some(_) => {
                return Err(Error::ServersNotObject {
                    path: path.to_path_buf(),
                    key: MCP_SERVERS_KEY.to_string(),
                });
            }
        };

        Ok(Self {
            path: path.to_path_buf(),
            root,
            servers,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The registered-servers mapping.
    pub fn servers(&self) -> &Map<String, Value> {
        &self.servers
    }

    /// Look up a registered server entry.
    pub fn server(&self, name: &str) -> Option<&Value> {
        self.servers.get(name)
    }

    /// Insert or overwrite the entry for `name`.
    pub fn set_server(&mut self, name: &str, entry: Value) {
        self.servers.insert(name.to_string(), entry);
    }

    /// Remove the entry for `name`. Returns whether it was present.
    ///
    /// Surrounding entries keep their relative order.
    pub fn remove_server(&mut self, name: &str) -> bool {
        self.servers.shift_remove(name).is_some()
    }

    /// The whole document as a JSON value.
    pub fn to_value(&self) -> Value {
        let document = self
            .root
            .iter()
            .map(|(key, value)| {
                let value = if key == MCP_SERVERS_KEY {
                    Value::Object(self.servers.clone())
                } else {
                    value.clone()
                };
                (key.clone(), value)
            })
            .collect();
        Value::Object(document)
    }

    /// Serialize with two-space indentation.
    pub fn to_pretty_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_value())?)
    }

    /// Overwrite the file this document was loaded from.
    pub fn save(&self) -> Result<()> {
        let content = self.to_pretty_string()?;
        mdmcp_fs::io::write_atomic(&self.path, content.as_bytes())?;
        tracing::debug!(path = %self.path.display(), "saved config");
        Ok(())
    }
}

/// JavaScript truthiness for the scalar shapes a hand-edited config may hold.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
