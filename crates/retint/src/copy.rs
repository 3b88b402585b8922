//! Template theme duplication.
//!
//! A variant starts life as a byte-for-byte copy of its template theme
//! directory; only the descriptor and the hinted color files are patched
//! afterwards. Symlinks are recreated as symlinks so icon and asset
//! links inside themes survive the copy.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Recursively copies the tree at `src` into `dest`.
///
/// `dest` and any missing parents are created. Regular files are copied,
/// directories recursed into, and symlinks recreated pointing at their
/// original targets (on non-Unix platforms, file symlinks are followed
/// and copied instead).
pub fn copy_tree(src: &Path, dest: &Path) -> Result<()> {
    fs::create_dir_all(dest).map_err(Error::io(dest))?;

    for entry in fs::read_dir(src).map_err(Error::io(src))? {
        let entry = entry.map_err(Error::io(src))?;
        let src_path = entry.path();
        let dest_path = dest.join(entry.file_name());

        let metadata = fs::symlink_metadata(&src_path).map_err(Error::io(&src_path))?;
        if metadata.is_symlink() {
            copy_symlink(&src_path, &dest_path)?;
        } else if metadata.is_dir() {
            copy_tree(&src_path, &dest_path)?;
        } else {
            fs::copy(&src_path, &dest_path).map_err(Error::io(&src_path))?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn copy_symlink(src: &Path, dest: &Path) -> Result<()> {
    let target = fs::read_link(src).map_err(Error::io(src))?;
    std::os::unix::fs::symlink(&target, dest).map_err(Error::io(dest))?;
    Ok(())
}

#[cfg(not(unix))]
fn copy_symlink(src: &Path, dest: &Path) -> Result<()> {
    if src.is_file() {
        fs::copy(src, dest).map_err(Error::io(src))?;
    }
    Ok(())
}
