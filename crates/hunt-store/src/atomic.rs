use hunt_core::error::{HuntError, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Replace `path` with `contents` in one step
///
/// The bytes land in a sibling temp file that is renamed over the target, so
/// readers see either the old file or the complete new one.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = path.parent().ok_or_else(|| HuntError::FileNotFound {
        path: path.to_path_buf(),
    })?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| HuntError::Io(e.error))?;
    Ok(())
}
