//! Atomic writes, text reads and line appends

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::{Error, Result};

/// Symlink hops followed before giving up on a target.
const MAX_SYMLINK_HOPS: usize = 40;

/// Replace the contents of `path` atomically.
///
/// Symlinks are followed, so the link stays in place and its target receives
/// the new contents. The bytes go to a hidden temp file next to the target and
/// are renamed over it, so readers see either the old file or the new one.
/// Concurrent writers of the same target are serialized through a sibling
/// `.<name>.lock` file.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let target = resolve_symlinks(path)?;
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let _lock = WriteLock::acquire(&target)?;

    let temp_path = sibling(&target, &format!("{}.tmp", std::process::id()));
    if let Err(e) = write_synced(&temp_path, content) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }
    if let Err(e) = fs::rename(&temp_path, &target) {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::io(&target, e));
    }

    tracing::debug!(
        path = %path.display(),
        target = %target.display(),
        bytes = content.len(),
        "wrote file atomically"
    );
    Ok(())
}

/// Follow `path` through any chain of symlinks, including a dangling last
/// link, to the file that should actually be written.
fn resolve_symlinks(path: &Path) -> Result<PathBuf> {
    let mut current = path.to_path_buf();
    for _ in 0..MAX_SYMLINK_HOPS {
        match fs::symlink_metadata(&current) {
            Ok(meta) if meta.file_type().is_symlink() => {
                let link = fs::read_link(&current).map_err(|e| Error::io(&current, e))?;
                current = match current.parent() {
                    Some(dir) if link.is_relative() => dir.join(link),
                    _ => link,
                };
            }
            _ => return Ok(current),
        }
    }
    Err(Error::io(
        path,
        std::io::Error::other("too many levels of symbolic links"),
    ))
}

/// `.<file name>.<suffix>` in the same directory as `path`.
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.{suffix}"))
}

fn write_synced(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| Error::io(path, e))?;
    file.write_all(content)
        .and_then(|_| file.sync_all())
        .map_err(|e| Error::io(path, e))
}

/// Exclusive advisory lock on `.<name>.lock`, released on drop.
struct WriteLock {
    file: File,
}

impl WriteLock {
    fn acquire(target: &Path) -> Result<Self> {
        let lock_path = sibling(target, "lock");
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| Error::io(&lock_path, e))?;
        FileExt::lock_exclusive(&file).map_err(|_| Error::LockFailed {
            path: target.to_path_buf(),
        })?;
        Ok(Self { file })
    }
}

impl Drop for WriteLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

/// Read a UTF-8 text file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Append `line` to `path`, creating the file if needed.
///
/// The line is written as given; callers supply the trailing newline.
pub fn append_line(path: &Path, line: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::io(path, e))?;
    file.write_all(line.as_bytes())
        .map_err(|e| Error::io(path, e))
}
