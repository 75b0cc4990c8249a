use anyhow::{Context, Result};
use log::debug;
use winfont_core::{
    FileDisposition, FileRemover, FontRegistry, Gate, Host, UninstallOutcome, UninstallRequest,
    Uninstaller,
};

pub fn uninstall(
    request: &UninstallRequest,
    registry: &dyn FontRegistry,
    files: &dyn FileRemover,
    host: &dyn Host,
    gate: &mut dyn Gate,
) -> Result<UninstallOutcome> {
    let name = &request.name;
    debug!("Uninstalling {name} at {} scope", request.scope);
    let outcome = Uninstaller::new(registry, files, host)
        .uninstall(request, gate)
        .with_context(|| format!("Failed to uninstall font: {name}"))?;

    match &outcome {
        UninstallOutcome::NotPresent => {
            println!("Font not registered at {} scope: {name}", request.scope);
        }
        UninstallOutcome::Skipped { path } => {
            println!("Skipped {name} ({})", path.display());
        }
        UninstallOutcome::Removed { path, file } => {
            match file {
                FileDisposition::Deleted => println!("Deleted {}", path.display()),
                FileDisposition::Missing => println!("File already gone: {}", path.display()),
                FileDisposition::DeferredUntilReboot => {
                    println!("File in use, will be deleted on reboot: {}", path.display())
                }
                FileDisposition::SkippedWithWarning => {
                    println!("File in use, left in place: {}", path.display())
                }
            }
            println!("Uninstalled {name}");
        }
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use std::{fs::write, path::PathBuf};

    use winfont_core::{MemoryRegistry, Proceed, Scope, StaticHost, SystemFiles};

    use super::*;

    #[test]
    fn test_uninstall_reports_context() {
        let registry = MemoryRegistry::new();
        let host = StaticHost::new("fonts");
        let request = UninstallRequest::new("Missing (TrueType)", Scope::Machine);

        let err = uninstall(&request, &registry, &SystemFiles, &host, &mut Proceed).unwrap_err();

        assert_eq!(err.to_string(), "Failed to uninstall font: Missing (TrueType)");
        assert!(format!("{err:#}").contains("not registered"));
    }

    #[test]
    fn test_uninstall_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path().join("a.ttf"), "").unwrap();
        let registry = MemoryRegistry::new().with(Scope::Machine, "A", "a.ttf");
        let host = StaticHost::new(dir.path());

        let outcome = uninstall(
            &UninstallRequest::new("A", Scope::Machine),
            &registry,
            &SystemFiles,
            &host,
            &mut Proceed,
        )
        .unwrap();

        let path: PathBuf = dir.path().join("a.ttf");
        assert_eq!(
            outcome,
            UninstallOutcome::Removed { path: path.clone(), file: FileDisposition::Deleted }
        );
        assert!(!path.exists());
    }
}
