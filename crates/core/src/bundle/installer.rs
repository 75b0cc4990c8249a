//! The external single-font installer.

use std::{
    ffi::OsString,
    fmt,
    path::{Path, PathBuf},
    process::Command,
};

use log::debug;

use crate::{
    config::POWERSHELL,
    error::{Error, Result},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallScope {
    /// All users.
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallMethod {
    /// Copy the file and write the registry value directly.
    Manual,
}

impl fmt::Display for InstallScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InstallScope::System => "System",
        })
    }
}

impl fmt::Display for InstallMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InstallMethod::Manual => "Manual",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallOptions {
    pub scope: InstallScope,
    pub method: InstallMethod,
    /// Replace an installed font with the same name.
    pub uninstall_existing: bool,
}

impl InstallOptions {
    /// All users, manual method, replacing existing fonts.
    pub const BUNDLE: Self = Self {
        scope: InstallScope::System,
        method: InstallMethod::Manual,
        uninstall_existing: true,
    };
}

/// Installs a single font file.
pub trait FontInstaller {
    fn install(&self, font: &Path, options: &InstallOptions) -> Result<()>;
}

/// Runs an installer script through PowerShell.
///
/// The execution policy is bypassed for the child process only.
#[derive(Debug, Clone)]
pub struct ScriptInstaller {
    shell: OsString,
    script: PathBuf,
}

impl ScriptInstaller {
    pub fn new(script: impl Into<PathBuf>) -> Self {
        Self { shell: POWERSHELL.into(), script: script.into() }
    }

    pub fn shell(mut self, shell: impl Into<OsString>) -> Self {
        self.shell = shell.into();
        self
    }

    pub fn script(&self) -> &Path {
        &self.script
    }

    pub fn command(&self, font: &Path, options: &InstallOptions) -> Command {
        let mut cmd = Command::new(&self.shell);
        cmd.args(["-NoProfile", "-NonInteractive", "-ExecutionPolicy", "Bypass", "-File"])
            .arg(&self.script)
            .arg("-Path")
            .arg(font)
            .arg("-Scope")
            .arg(options.scope.to_string())
            .arg("-Method")
            .arg(options.method.to_string());
        if options.uninstall_existing {
            cmd.arg("-UninstallExisting");
        }
        cmd
    }
}

impl FontInstaller for ScriptInstaller {
    fn install(&self, font: &Path, options: &InstallOptions) -> Result<()> {
        let mut cmd = self.command(font, options);
        debug!("Running {cmd:?}");

        let output = cmd
            .output()
            .map_err(|e| Error::io(format!("failed to run {}", self.shell.to_string_lossy()), e))?;
        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let reason = match stderr.trim() {
            "" => format!("installer exited with {}", output.status),
            msg => format!("installer exited with {}: {msg}", output.status),
        };
        Err(Error::Installer { font: font.to_path_buf(), reason })
    }
}
