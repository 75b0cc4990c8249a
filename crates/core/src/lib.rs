//! winfont core - font uninstallation and bundle installation for Windows.

pub mod bundle;
pub mod clean;
pub mod config;
pub mod error;
pub mod files;
pub mod gate;
pub mod host;
pub mod registry;
pub mod scope;
pub mod uninstall;

pub use bundle::{
    BundleConfig, BundleInstaller, BundleReport, BundleSummary, Fetch, FontInstaller,
    HttpFetcher, InstallFailure, InstallMethod, InstallOptions, InstallScope, ScriptInstaller,
};
pub use clean::clean;
pub use error::{Error, Result};
pub use files::{FileRemover, SystemFiles};
pub use gate::{Gate, Proceed, Prompt, WhatIf};
pub use host::{Host, StaticHost, SystemHost};
pub use registry::{FontRegistry, MemoryRegistry, Registration, SystemRegistry, registrations};
pub use scope::Scope;
pub use uninstall::{FileDisposition, UninstallOutcome, UninstallRequest, Uninstaller};
