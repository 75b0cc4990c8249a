//! Download a font archive and install every font in it for all users.

mod archive;
mod fetch;
mod installer;

use std::{
    fs::{create_dir_all, remove_file, rename},
    path::{Path, PathBuf},
};

use log::{info, warn};

pub use archive::{extract_zip, find_fonts};
pub use fetch::{Fetch, HttpFetcher};
pub use installer::{FontInstaller, InstallMethod, InstallOptions, InstallScope, ScriptInstaller};

use crate::{
    config::{BUNDLE_URL, CACHE_PREFIX, PARTIAL_SUFFIX},
    error::{Error, Result},
    gate::Gate,
};

const ACTION: &str = "Download and install all fonts for all users";

/// Where the bundle comes from and where it is staged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleConfig {
    pub url: String,
    /// Cached archive; downloaded only when missing.
    pub archive_path: PathBuf,
    pub extract_dir: PathBuf,
    /// Log written by the single-font installer, shown when present.
    pub log_path: Option<PathBuf>,
}

impl BundleConfig {
    /// Default URL, with archive and extraction directory under `cache_dir`.
    pub fn in_dir(cache_dir: &Path) -> Self {
        Self::for_url(cache_dir, BUNDLE_URL)
    }

    /// Archive and extraction directory are named after `url`, so bundles
    /// from different sources never share a cache entry.
    pub fn for_url(cache_dir: &Path, url: impl Into<String>) -> Self {
        let url = url.into();
        let name = cache_name(&url);
        Self {
            archive_path: cache_dir.join(format!("{name}.zip")),
            extract_dir: cache_dir.join(name),
            url,
            log_path: None,
        }
    }

    pub fn log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = Some(path.into());
        self
    }
}

/// `winfont-<host>-<file stem>` with anything outside `[A-Za-z0-9._-]` replaced.
fn cache_name(url: &str) -> String {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let rest = rest.split(['?', '#']).next().unwrap_or_default();
    let host = rest.split('/').next().unwrap_or_default();
    let file = rest.rsplit('/').find(|s| !s.is_empty()).unwrap_or_default();

    let stem = match file.len().checked_sub(4) {
        Some(cut) if file.is_char_boundary(cut) && file[cut..].eq_ignore_ascii_case(".zip") => {
            &file[..cut]
        }
        _ => file,
    };
    let raw = if stem == host { host.to_owned() } else { format!("{host}-{stem}") };

    let sanitized: String = raw
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
        .collect();
    format!("{CACHE_PREFIX}{sanitized}")
}

#[derive(Debug)]
pub struct InstallFailure {
    pub font: PathBuf,
    pub error: Error,
}

#[derive(Debug, Default)]
pub struct BundleSummary {
    /// Whether the archive was fetched during this run.
    pub downloaded: bool,
    pub installed: Vec<PathBuf>,
    pub failed: Vec<InstallFailure>,
    /// Installer log, if it exists.
    pub log: Option<PathBuf>,
}

#[derive(Debug)]
pub enum BundleReport {
    /// The user declined; nothing was touched.
    Declined,
    Completed(BundleSummary),
}

/// Fetches, extracts and installs a font bundle.
pub struct BundleInstaller<'a> {
    fetcher: &'a dyn Fetch,
    installer: &'a dyn FontInstaller,
}

impl<'a> BundleInstaller<'a> {
    pub fn new(fetcher: &'a dyn Fetch, installer: &'a dyn FontInstaller) -> Self {
        Self { fetcher, installer }
    }

    pub fn run(&self, config: &BundleConfig, gate: &mut dyn Gate) -> Result<BundleReport> {
        let allowed = gate
            .should_process(&config.url, ACTION)
            .map_err(|e| Error::io("failed to read confirmation", e))?;
        if !allowed {
            return Ok(BundleReport::Declined);
        }

        let downloaded = self.ensure_archive(config)?;
        let mut summary = BundleSummary { downloaded, ..Default::default() };

        println!("Extracting to {}", config.extract_dir.display());
        let extracted = extract_zip(&config.archive_path, &config.extract_dir)?;
        info!("Extracted {extracted} files");

        let fonts = find_fonts(&config.extract_dir)?;
        println!("Installing {} fonts", fonts.len());

        for font in fonts {
            println!("  {}", font.display());
            match self.installer.install(&font, &InstallOptions::BUNDLE) {
                Ok(()) => summary.installed.push(font),
                Err(error) => {
                    warn!("{error}");
                    summary.failed.push(InstallFailure { font, error });
                }
            }
        }

        summary.log = config.log_path.clone().filter(|path| path.is_file());
        Ok(BundleReport::Completed(summary))
    }

    /// Download the archive unless it is already cached. Returns whether a
    /// download happened.
    fn ensure_archive(&self, config: &BundleConfig) -> Result<bool> {
        let target = &config.archive_path;
        if target.is_file() {
            println!("Using cached archive {}", target.display());
            return Ok(false);
        }

        println!("Downloading {}", config.url);
        if let Some(parent) = target.parent() {
            create_dir_all(parent)
                .map_err(|e| Error::io(format!("failed to create {}", parent.display()), e))?;
        }
        let partial = target.with_extension(PARTIAL_SUFFIX);
        let bytes = match self.fetcher.fetch(&config.url, &partial) {
            Ok(bytes) => bytes,
            Err(e) => {
                let _ = remove_file(&partial);
                return Err(e);
            }
        };
        rename(&partial, target)
            .map_err(|e| Error::io(format!("failed to move archive to {}", target.display()), e))?;

        let size_mb = bytes as f64 / 1024.0 / 1024.0;
        println!("  Downloaded ({size_mb:.2} MB)");
        Ok(true)
    }
}
