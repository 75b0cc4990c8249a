//! CLI definitions and command dispatch.

use std::{
    env::{current_exe, temp_dir},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use winfont_core::{
    BundleConfig, Gate, HttpFetcher, Proceed, Prompt, Scope, ScriptInstaller, SystemFiles,
    SystemHost, SystemRegistry, UninstallRequest, WhatIf,
    config::{BUNDLE_URL, INSTALLER_LOG, INSTALLER_SCRIPT, POWERSHELL},
};

use crate::commands;

#[derive(Parser)]
#[command(name = "winfont", version)]
#[command(about = "Uninstall fonts and install font bundles on Windows")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Args)]
pub struct UninstallArgs {
    /// Registry name of the font, e.g. "Georgia (TrueType)"
    #[arg(short, long)]
    pub name: String,
    /// Registration set to remove the font from
    #[arg(short, long, default_value_t = Scope::Machine)]
    pub scope: Scope,
    /// Succeed when the font is not registered
    #[arg(long)]
    pub ignore_not_present: bool,
    /// Show what would be removed without changing anything
    #[arg(long, visible_alias = "what-if", conflicts_with = "confirm")]
    pub dry_run: bool,
    /// Ask before removing the font
    #[arg(long)]
    pub confirm: bool,
}

impl UninstallArgs {
    pub fn request(&self) -> UninstallRequest {
        UninstallRequest::new(&self.name, self.scope).ignore_not_present(self.ignore_not_present)
    }

    pub fn gate(&self) -> Box<dyn Gate> {
        if self.dry_run {
            Box::new(WhatIf)
        } else if self.confirm {
            Box::new(Prompt::stdin())
        } else {
            Box::new(Proceed)
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct CacheArgs {
    /// Directory holding the downloaded archive and extracted fonts
    /// [default: system temp directory]
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,
}

impl CacheArgs {
    pub fn dir(&self) -> PathBuf {
        self.cache_dir.clone().unwrap_or_else(temp_dir)
    }
}

#[derive(Debug, Clone, Args)]
pub struct InstallBundleArgs {
    /// Font archive to download
    #[arg(long, default_value = BUNDLE_URL)]
    pub url: String,
    #[command(flatten)]
    pub cache: CacheArgs,
    /// Single-font installer script [default: Install-Font.ps1 next to this executable]
    #[arg(long)]
    pub installer_script: Option<PathBuf>,
    /// Program used to run the installer script
    #[arg(long, default_value = POWERSHELL)]
    pub shell: String,
    /// Installer log shown after completion [default: Install-Font.log next to this executable]
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl InstallBundleArgs {
    pub fn config(&self) -> Result<BundleConfig> {
        let log = match &self.log_file {
            Some(path) => path.clone(),
            None => exe_dir()?.join(INSTALLER_LOG),
        };
        Ok(BundleConfig::for_url(&self.cache.dir(), &self.url).log_path(log))
    }

    pub fn installer(&self) -> Result<ScriptInstaller> {
        let script = match &self.installer_script {
            Some(path) => path.clone(),
            None => exe_dir()?.join(INSTALLER_SCRIPT),
        };
        Ok(ScriptInstaller::new(script).shell(&self.shell))
    }
}

fn exe_dir() -> Result<PathBuf> {
    let exe = current_exe().context("Failed to locate the running executable")?;
    exe.parent()
        .map(PathBuf::from)
        .context("Running executable has no parent directory")
}

#[derive(Subcommand)]
pub enum Commands {
    /// Remove a font's file and registry entry
    Uninstall(UninstallArgs),
    /// Download a font archive and install every font in it for all users
    InstallBundle(InstallBundleArgs),
    /// List the fonts registered at a scope
    List {
        #[arg(short, long, default_value_t = Scope::Machine)]
        scope: Scope,
    },
    /// Remove the cached archive and extracted fonts of a bundle
    Clean {
        /// Bundle whose cache entries are removed
        #[arg(long, default_value = BUNDLE_URL)]
        url: String,
        #[command(flatten)]
        cache: CacheArgs,
    },
}

impl Commands {
    pub fn run(self) -> Result<()> {
        match self {
            Commands::Uninstall(args) => {
                let mut gate = args.gate();
                commands::uninstall(
                    &args.request(),
                    &SystemRegistry,
                    &SystemFiles,
                    &SystemHost,
                    gate.as_mut(),
                )?;
            }
            Commands::InstallBundle(args) => {
                let config = args.config()?;
                let installer = args.installer()?;
                commands::install_bundle(&config, &HttpFetcher, &installer, &mut Prompt::stdin())?;
            }
            Commands::List { scope } => {
                commands::list(&SystemRegistry, scope)?;
            }
            Commands::Clean { url, cache } => {
                commands::clean(&BundleConfig::for_url(&cache.dir(), url))?;
            }
        }
        Ok(())
    }
}
