//! Filesystem helpers for the Markdown Editor MCP setup tool
//!
//! Whole-file atomic replacement for config documents and line appends for
//! the setup log.

pub mod error;
pub mod io;

pub use error::{Error, Result};
