//! Archive extraction and font discovery.

use std::{
    collections::BTreeSet,
    fs::{File, create_dir_all},
    io::copy,
    path::{Path, PathBuf},
};

use glob::{MatchOptions, Pattern, glob_with};
use log::{debug, warn};
use zip::ZipArchive;

use crate::{
    config::FONT_EXTENSIONS,
    error::{Error, Result},
};

/// Extract a zip archive into `dest`, overwriting existing files.
///
/// Entries whose names would land outside `dest` are skipped. Returns the
/// number of files written.
pub fn extract_zip(archive_path: &Path, dest: &Path) -> Result<usize> {
    let file = File::open(archive_path)
        .map_err(|e| Error::io(format!("failed to open {}", archive_path.display()), e))?;
    let zip_err = |source| Error::Archive { path: archive_path.to_path_buf(), source };
    let mut archive = ZipArchive::new(file).map_err(zip_err)?;

    create_dir_all(dest)
        .map_err(|e| Error::io(format!("failed to create {}", dest.display()), e))?;

    let mut written = 0;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(zip_err)?;

        let Some(relative) = entry.enclosed_name() else {
            warn!("Skipping unsafe archive entry: {}", entry.name());
            continue;
        };
        let out_path = dest.join(relative);

        if entry.is_dir() {
            create_dir_all(&out_path)
                .map_err(|e| Error::io(format!("failed to create {}", out_path.display()), e))?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            create_dir_all(parent)
                .map_err(|e| Error::io(format!("failed to create {}", parent.display()), e))?;
        }
        let mut out = File::create(&out_path)
            .map_err(|e| Error::io(format!("failed to create {}", out_path.display()), e))?;
        copy(&mut entry, &mut out)
            .map_err(|e| Error::io(format!("failed to extract {}", out_path.display()), e))?;
        debug!("Extracted {}", out_path.display());
        written += 1;
    }

    Ok(written)
}

/// Find font files anywhere under `root`, sorted by path.
pub fn find_fonts(root: &Path) -> Result<Vec<PathBuf>> {
    let root_str = root.to_str().ok_or_else(|| {
        Error::io("invalid font directory", std::io::ErrorKind::InvalidInput.into())
    })?;
    let options = MatchOptions { case_sensitive: false, ..MatchOptions::new() };

    let mut fonts = BTreeSet::new();
    for ext in FONT_EXTENSIONS {
        let pattern = format!("{}/**/*.{ext}", Pattern::escape(root_str));
        let paths = glob_with(&pattern, options).map_err(|e| {
            Error::io(
                format!("failed to glob pattern: {pattern}"),
                std::io::Error::new(std::io::ErrorKind::InvalidInput, e),
            )
        })?;
        for entry in paths {
            match entry {
                Ok(path) if path.is_file() => {
                    fonts.insert(path);
                }
                Ok(_) => {}
                Err(e) => warn!("Skipping unreadable path {}: {}", e.path().display(), e.error()),
            }
        }
    }
    Ok(fonts.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use std::{
        fs::{read_to_string, write},
        io::Write,
    };

    use zip::{ZipWriter, write::SimpleFileOptions};

    use super::*;

    fn write_zip(path: &Path, entries: &[(&str, &str)]) {
        let mut zip = ZipWriter::new(File::create(path).unwrap());
        for (name, body) in entries {
            zip.start_file(*name, SimpleFileOptions::default()).unwrap();
            zip.write_all(body.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }

    #[test]
    fn test_extract_overwrites_existing() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("bundle.zip");
        let dest = dir.path().join("out");
        write_zip(&archive, &[("fonts/a.ttf", "new")]);
        create_dir_all(dest.join("fonts")).unwrap();
        write(dest.join("fonts/a.ttf"), "old").unwrap();

        assert_eq!(extract_zip(&archive, &dest).unwrap(), 1);
        assert_eq!(read_to_string(dest.join("fonts/a.ttf")).unwrap(), "new");
    }

    #[test]
    fn test_extract_skips_escaping_entries() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("bundle.zip");
        let dest = dir.path().join("out");
        write_zip(&archive, &[("../evil.ttf", "x"), ("ok.otf", "y")]);

        assert_eq!(extract_zip(&archive, &dest).unwrap(), 1);
        assert!(!dir.path().join("evil.ttf").exists());
        assert!(dest.join("ok.otf").exists());
    }

    #[test]
    fn test_extract_rejects_non_zip() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("bundle.zip");
        write(&archive, "not a zip").unwrap();

        let err = extract_zip(&archive, &dir.path().join("out")).unwrap_err();
        assert!(matches!(err, Error::Archive { .. }));
    }

    #[test]
    fn test_find_fonts_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        create_dir_all(root.join("static/sub")).unwrap();
        for name in ["b.TTF", "static/a.otf", "static/sub/c.ttc", "readme.txt", "static/d.woff2"] {
            write(root.join(name), "").unwrap();
        }

        let found: Vec<_> = find_fonts(root)
            .unwrap()
            .into_iter()
            .map(|p| p.strip_prefix(root).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            found,
            [
                PathBuf::from("b.TTF"),
                PathBuf::from("static/a.otf"),
                PathBuf::from("static/sub/c.ttc"),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_find_fonts_skips_unreadable_directory() {
        use std::{
            fs::{Permissions, set_permissions},
            os::unix::fs::PermissionsExt,
        };

        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let locked = root.join("locked");
        create_dir_all(&locked).unwrap();
        write(locked.join("hidden.ttf"), "").unwrap();
        write(root.join("open.ttf"), "").unwrap();
        set_permissions(&locked, Permissions::from_mode(0o000)).unwrap();

        let found = find_fonts(root);
        set_permissions(&locked, Permissions::from_mode(0o755)).unwrap();

        let found = found.unwrap();
        assert!(found.contains(&root.join("open.ttf")));
    }
}
