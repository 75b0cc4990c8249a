use std::fs::{remove_dir_all, remove_file};

use crate::{
    bundle::BundleConfig,
    error::{Error, Result},
};

/// Remove the cached archive and extraction directory. Returns how many of
/// the two were removed.
pub fn clean(config: &BundleConfig) -> Result<usize> {
    let mut removed = 0;

    let archive = &config.archive_path;
    if archive.is_file() {
        remove_file(archive)
            .map_err(|e| Error::io(format!("failed to remove {}", archive.display()), e))?;
        println!("Removed {}", archive.display());
        removed += 1;
    } else {
        println!("Skipped {} (not found)", archive.display());
    }

    let dir = &config.extract_dir;
    if dir.exists() {
        remove_dir_all(dir)
            .map_err(|e| Error::io(format!("failed to remove {}", dir.display()), e))?;
        println!("Removed {}", dir.display());
        removed += 1;
    } else {
        println!("Skipped {} (not found)", dir.display());
    }

    println!("Cleaned {removed} items");
    Ok(removed)
}
