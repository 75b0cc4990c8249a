use anyhow::{Context, Result};
use winfont_core::BundleConfig;

pub fn clean(config: &BundleConfig) -> Result<()> {
    winfont_core::clean(config).context("Failed to clean bundle cache")?;
    Ok(())
}
