//! Writing downloaded bodies to disk.
//!
//! Bodies go to a short-named temp file in the output directory first and are
//! renamed into place, so a failed write never leaves a truncated file under
//! the final name. The temp name has a fixed length so final names up to
//! NAME_MAX still work.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Temp files are `.formfetch-XXXXXX.part` in the target directory.
pub const TEMP_PREFIX: &str = ".formfetch-";
pub const TEMP_SUFFIX: &str = ".part";

/// Creates `dir` and its parents if missing.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))
}

/// Writes `body` verbatim to `dir/filename`, replacing any existing file.
/// Returns the final path.
pub fn save_body(dir: &Path, filename: &str, body: &[u8]) -> Result<PathBuf> {
    let final_path = dir.join(filename);

    // Removed on drop if anything below fails.
    let mut tmp = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .suffix(TEMP_SUFFIX)
        .tempfile_in(dir)
        .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
    tmp.write_all(body)
        .with_context(|| format!("failed to write {}", tmp.path().display()))?;
    tmp.as_file().sync_all().context("storage sync failed")?;
    set_default_mode(tmp.as_file())?;

    let tmp_path = tmp.path().to_path_buf();
    tmp.persist(&final_path).map_err(|e| e.error).with_context(|| {
        format!(
            "failed to rename {} to {}",
            tmp_path.display(),
            final_path.display()
        )
    })?;

    Ok(final_path)
}

// Temp files are created 0600; saved forms get the usual 0644.
#[cfg(unix)]
fn set_default_mode(file: &fs::File) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o644))
        .context("failed to set file permissions")
}

#[cfg(not(unix))]
fn set_default_mode(_file: &fs::File) -> Result<()> {
    Ok(())
}
