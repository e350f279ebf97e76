//! Filesystem plumbing
//!
//! Tree replication that keeps symlinks, mode bits and (on Unix) ownership,
//! plus the small directory helpers the pipeline needs.

use std::fs;
use std::path::Path;

use crate::error::{RegenError, RegenResult};

/// Recursively copy the contents of `src` into `dest`; returns the number of files copied.
///
/// Symlinks are recreated rather than followed. Mode bits are copied for
/// everything except symlinks; on Unix, owner and group are copied too.
pub fn copy_directory(src: &Path, dest: &Path) -> RegenResult<usize> {
    let mut copied = 0;

    for entry in fs::read_dir(src).map_err(|e| RegenError::file_io(src, e))? {
        let entry = entry.map_err(|e| RegenError::file_io(src, e))?;
        let source_path = entry.path();
        let dest_path = dest.join(entry.file_name());

        let meta =
            fs::symlink_metadata(&source_path).map_err(|e| RegenError::file_io(&source_path, e))?;
        let file_type = meta.file_type();

        if file_type.is_dir() {
            create_if_not_exists(&dest_path, 0o755)?;
            copied += copy_directory(&source_path, &dest_path)?;
        } else if file_type.is_symlink() {
            copy_symlink(&source_path, &dest_path)?;
        } else {
            fs::copy(&source_path, &dest_path).map_err(|e| RegenError::file_io(&dest_path, e))?;
            copied += 1;
        }

        preserve_owner(&dest_path, &meta)?;

        if !file_type.is_symlink() {
            fs::set_permissions(&dest_path, meta.permissions())
                .map_err(|e| RegenError::file_io(&dest_path, e))?;
        }
    }

    Ok(copied)
}

fn copy_symlink(src: &Path, dest: &Path) -> RegenResult<()> {
    let target = fs::read_link(src).map_err(|e| RegenError::file_io(src, e))?;

    if fs::symlink_metadata(dest).is_ok() {
        fs::remove_file(dest).map_err(|e| RegenError::file_io(dest, e))?;
    }

    #[cfg(unix)]
    std::os::unix::fs::symlink(&target, dest).map_err(|e| RegenError::file_io(dest, e))?;

    #[cfg(windows)]
    {
        let result = if src.is_dir() {
            std::os::windows::fs::symlink_dir(&target, dest)
        } else {
            std::os::windows::fs::symlink_file(&target, dest)
        };
        result.map_err(|e| RegenError::file_io(dest, e))?;
    }

    Ok(())
}

#[cfg(unix)]
fn preserve_owner(dest: &Path, meta: &fs::Metadata) -> RegenResult<()> {
    use std::os::unix::fs::MetadataExt;

    std::os::unix::fs::lchown(dest, Some(meta.uid()), Some(meta.gid()))
        .map_err(|e| RegenError::file_io(dest, e))
}

#[cfg(not(unix))]
fn preserve_owner(_dest: &Path, _meta: &fs::Metadata) -> RegenResult<()> {
    Ok(())
}

/// Create `dir` (and parents) with `mode` unless it already exists
pub fn create_if_not_exists(dir: &Path, mode: u32) -> RegenResult<()> {
    if exists(dir) {
        return Ok(());
    }

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    builder
        .create(dir)
        .map_err(|e| RegenError::file_io(dir, e))
}

/// Whether anything exists at `path` (symlinks are followed)
pub fn exists(path: &Path) -> bool {
    path.exists()
}

/// Remove `dir` recursively if present and recreate it empty
pub fn reset_directory(dir: &Path) -> RegenResult<()> {
    if fs::symlink_metadata(dir).is_ok() {
        fs::remove_dir_all(dir).map_err(|e| RegenError::file_io(dir, e))?;
    }
    fs::create_dir_all(dir).map_err(|e| RegenError::file_io(dir, e))
}
