use std::fs::read_to_string;

use anyhow::{Context, Result, bail};
use winfont_core::{BundleConfig, BundleInstaller, BundleReport, Fetch, FontInstaller, Gate};

pub fn install_bundle(
    config: &BundleConfig,
    fetcher: &dyn Fetch,
    installer: &dyn FontInstaller,
    gate: &mut dyn Gate,
) -> Result<()> {
    println!("This will download {} and install its fonts for all users.", config.url);

    let report = BundleInstaller::new(fetcher, installer)
        .run(config, gate)
        .context("Failed to install font bundle")?;
    let summary = match report {
        BundleReport::Declined => {
            println!("Cancelled");
            return Ok(());
        }
        BundleReport::Completed(summary) => summary,
    };

    println!("\nInstall Summary");
    println!("  Installed: {}", summary.installed.len());
    if !summary.failed.is_empty() {
        println!("  Failed:    {}", summary.failed.len());
        for failure in &summary.failed {
            println!("    - {}", failure.font.display());
        }
    }

    if let Some(log) = &summary.log {
        let text = read_to_string(log)
            .with_context(|| format!("Failed to read installer log: {}", log.display()))?;
        println!("\nInstaller log ({}):", log.display());
        print!("{text}");
    }

    if !summary.failed.is_empty() {
        bail!("{} fonts failed to install", summary.failed.len());
    }
    println!("Done");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{fs::File, io::Write, path::Path};

    use winfont_core::{Error, InstallOptions, Proceed};
    use zip::{ZipWriter, write::SimpleFileOptions};

    use super::*;

    struct ZipFetcher;

    impl Fetch for ZipFetcher {
        fn fetch(&self, _url: &str, dest: &Path) -> winfont_core::Result<u64> {
            let mut zip = ZipWriter::new(File::create(dest).unwrap());
            for name in ["a.ttf", "b.otf"] {
                zip.start_file(name, SimpleFileOptions::default()).unwrap();
                zip.write_all(b"font").unwrap();
            }
            zip.finish().unwrap();
            Ok(0)
        }
    }

    struct RejectOtf;

    impl FontInstaller for RejectOtf {
        fn install(&self, font: &Path, _options: &InstallOptions) -> winfont_core::Result<()> {
            if font.extension().is_some_and(|ext| ext == "otf") {
                let font = font.to_path_buf();
                return Err(Error::Installer { font, reason: "rejected".into() });
            }
            Ok(())
        }
    }

    #[test]
    fn test_install_bundle_fails_when_a_font_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = BundleConfig::in_dir(dir.path());

        let err = install_bundle(&config, &ZipFetcher, &RejectOtf, &mut Proceed).unwrap_err();

        assert_eq!(err.to_string(), "1 fonts failed to install");
        assert!(config.archive_path.exists());
    }
}
