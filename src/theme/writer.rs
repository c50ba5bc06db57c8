//! Config file writer
//!
//! The rendered text is written to a uniquely named temporary file beside the
//! target and persisted over it, so a terminal reloading mid-write sees either
//! the old or the new file, never a partial one. A symlinked `foot.ini` is
//! written through: the file it points at is replaced and the link is kept.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, trace};
use tempfile::NamedTempFile;
use tokio::{fs, task};

use super::error::{ThemeError, ThemeResult};

/// Create `dir` if needed and replace `dir/file_name` with `contents`
///
/// Returns the path of the written file.
pub async fn write_config(dir: &Path, file_name: &str, contents: &str) -> ThemeResult<PathBuf> {
    let target = dir.join(file_name);

    debug!("Ensuring config directory exists: {}", dir.display());
    fs::create_dir_all(dir)
        .await
        .map_err(|e| ThemeError::config_write(dir, e))?;

    let destination = resolve_destination(&target).await?;
    let staged_into = destination.clone();
    let contents = contents.to_string();

    task::spawn_blocking(move || persist_staged(&staged_into, contents.as_bytes()))
        .await
        .map_err(|e| ThemeError::config_write(&destination, io::Error::new(io::ErrorKind::Other, e)))??;

    debug!("Wrote foot config: {}", destination.display());
    Ok(target)
}

/// Follow a symlinked target to the file it names
async fn resolve_destination(target: &Path) -> ThemeResult<PathBuf> {
    match fs::symlink_metadata(target).await {
        Ok(meta) if meta.file_type().is_symlink() => {
            let real = fs::canonicalize(target)
                .await
                .map_err(|e| ThemeError::config_write(target, e))?;
            trace!("{} links to {}", target.display(), real.display());
            Ok(real)
        }
        _ => Ok(target.to_path_buf()),
    }
}

/// Stage `contents` in the destination's directory and persist it over the destination
fn persist_staged(destination: &Path, contents: &[u8]) -> ThemeResult<()> {
    let parent = destination.parent().unwrap_or_else(|| Path::new("."));

    let mut staged = NamedTempFile::new_in(parent).map_err(|e| ThemeError::config_write(parent, e))?;
    trace!("Staging {} bytes in {}", contents.len(), staged.path().display());

    staged
        .write_all(contents)
        .and_then(|_| staged.as_file().sync_all())
        .map_err(|e| ThemeError::config_write(staged.path(), e))?;

    if let Some(permissions) = target_permissions(destination) {
        staged
            .as_file()
            .set_permissions(permissions)
            .map_err(|e| ThemeError::config_write(staged.path(), e))?;
    }

    // A failed persist drops the staging file along with the error
    staged
        .persist(destination)
        .map_err(|e| ThemeError::config_write(destination, e.error))?;
    Ok(())
}

/// Permissions of the file being replaced, or 0644 for a new file
#[cfg(unix)]
fn target_permissions(destination: &Path) -> Option<std::fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;

    Some(
        std::fs::metadata(destination)
            .map(|meta| meta.permissions())
            .unwrap_or_else(|_| std::fs::Permissions::from_mode(0o644)),
    )
}

#[cfg(not(unix))]
fn target_permissions(destination: &Path) -> Option<std::fs::Permissions> {
    std::fs::metadata(destination).ok().map(|meta| meta.permissions())
}
