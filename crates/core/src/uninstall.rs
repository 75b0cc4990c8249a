//! Removal of a registered font: file first, then its registry value.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::{
    config::MIN_USER_SCOPE_BUILD,
    error::{Error, Result},
    files::{FileRemover, is_denied},
    gate::Gate,
    host::Host,
    registry::FontRegistry,
    scope::Scope,
};

const ACTION: &str = "Uninstall font";

/// A font to uninstall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UninstallRequest {
    /// Registry value name, e.g. `Georgia (TrueType)`.
    pub name: String,
    pub scope: Scope,
    /// Treat a missing registration as success.
    pub ignore_not_present: bool,
}

impl UninstallRequest {
    pub fn new(name: impl Into<String>, scope: Scope) -> Self {
        Self { name: name.into(), scope, ignore_not_present: false }
    }

    pub fn ignore_not_present(mut self, ignore: bool) -> Self {
        self.ignore_not_present = ignore;
        self
    }
}

/// What happened to the font file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileDisposition {
    Deleted,
    /// The file was already gone.
    Missing,
    /// The file was in use; it will be removed on next restart.
    DeferredUntilReboot,
    /// The file was in use and the reboot deletion was refused too.
    SkippedWithWarning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UninstallOutcome {
    /// Not registered, and the request allowed that.
    NotPresent,
    /// The gate declined or only simulated.
    Skipped { path: PathBuf },
    /// The registry value was removed.
    Removed { path: PathBuf, file: FileDisposition },
}

/// Uninstalls fonts using the given registry, filesystem and host.
pub struct Uninstaller<'a> {
    registry: &'a dyn FontRegistry,
    files: &'a dyn FileRemover,
    host: &'a dyn Host,
}

impl<'a> Uninstaller<'a> {
    pub fn new(
        registry: &'a dyn FontRegistry,
        files: &'a dyn FileRemover,
        host: &'a dyn Host,
    ) -> Self {
        Self { registry, files, host }
    }

    pub fn uninstall(
        &self,
        request: &UninstallRequest,
        gate: &mut dyn Gate,
    ) -> Result<UninstallOutcome> {
        let UninstallRequest { name, scope, ignore_not_present } = request;
        let scope = *scope;

        self.check_capabilities(scope, gate.is_simulation())?;

        let value = self
            .registry
            .lookup(scope, name)
            .map_err(|source| Error::RegistryUnavailable { scope, source })?;
        let Some(value) = value else {
            if *ignore_not_present {
                info!("Font not registered at {scope} scope, ignoring: {name}");
                return Ok(UninstallOutcome::NotPresent);
            }
            return Err(Error::NotRegistered { name: name.clone(), scope });
        };

        let path = self.resolve_path(scope, &value)?;
        debug!("{name} resolves to {}", path.display());

        let allowed = gate
            .should_process(name, ACTION)
            .map_err(|e| Error::io("failed to read confirmation", e))?;
        if !allowed {
            return Ok(UninstallOutcome::Skipped { path });
        }

        let file = self.remove_file(&path)?;

        self.registry
            .remove(scope, name)
            .map_err(|source| Error::RegistryUnavailable { scope, source })?;
        info!("Removed registration {name} from {} font registry", scope.hive());

        Ok(UninstallOutcome::Removed { path, file })
    }

    fn check_capabilities(&self, scope: Scope, simulation: bool) -> Result<()> {
        match scope {
            Scope::User => {
                let build = self
                    .host
                    .os_build()
                    .map_err(|e| Error::io("failed to query OS build", e))?;
                if build < MIN_USER_SCOPE_BUILD {
                    return Err(Error::UnsupportedPlatformVersion {
                        build,
                        required: MIN_USER_SCOPE_BUILD,
                    });
                }
            }
            Scope::Machine => {
                if !simulation && !self.host.is_elevated() {
                    return Err(Error::InsufficientPrivilege {
                        action: "uninstall a machine-scope font".into(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Machine values are names inside the fonts directory; user values are
    /// absolute. Joining keeps an already-absolute machine value as-is.
    fn resolve_path(&self, scope: Scope, value: &str) -> Result<PathBuf> {
        match scope {
            Scope::Machine => {
                let dir = self
                    .host
                    .fonts_dir()
                    .map_err(|e| Error::io("failed to locate fonts directory", e))?;
                Ok(dir.join(value))
            }
            Scope::User => Ok(PathBuf::from(value)),
        }
    }

    fn remove_file(&self, path: &Path) -> Result<FileDisposition> {
        let err = match self.files.remove(path) {
            Ok(()) => {
                info!("Deleted {}", path.display());
                return Ok(FileDisposition::Deleted);
            }
            Err(e) => e,
        };

        if err.kind() == std::io::ErrorKind::NotFound {
            warn!("Font file not found, removing registration only: {}", path.display());
            return Ok(FileDisposition::Missing);
        }
        if !is_denied(&err) {
            return Err(Error::GenericDeleteFailure { path: path.to_path_buf(), source: err });
        }

        if !self.host.is_elevated() {
            return Err(Error::FileDeleteDenied { path: path.to_path_buf() });
        }

        match self.files.remove_on_reboot(path) {
            Ok(()) => {
                warn!("Font file in use, scheduled for deletion on reboot: {}", path.display());
                Ok(FileDisposition::DeferredUntilReboot)
            }
            Err(e) if is_denied(&e) => {
                warn!("Unable to schedule deletion of {}, leaving file: {e}", path.display());
                Ok(FileDisposition::SkippedWithWarning)
            }
            Err(e) => Err(Error::GenericDeleteFailure { path: path.to_path_buf(), source: e }),
        }
    }
}
