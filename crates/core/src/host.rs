//! Capability checks against the running system.
//!
//! Elevation, OS build and the fonts directory are queried through [`Host`] so
//! callers can substitute fixed answers instead of depending on the session
//! they happen to run in.

use std::{io, path::PathBuf};

/// Environment facts an operation needs before it mutates anything.
pub trait Host {
    /// Whether the process runs with administrator rights.
    fn is_elevated(&self) -> bool;

    /// Build number of the running OS.
    fn os_build(&self) -> io::Result<u32>;

    /// Machine-wide fonts directory.
    fn fonts_dir(&self) -> io::Result<PathBuf>;
}

/// Host with fixed answers.
#[derive(Debug, Clone)]
pub struct StaticHost {
    pub elevated: bool,
    pub build: u32,
    pub fonts_dir: PathBuf,
}

impl StaticHost {
    pub fn new(fonts_dir: impl Into<PathBuf>) -> Self {
        Self { elevated: true, build: u32::MAX, fonts_dir: fonts_dir.into() }
    }

    pub fn elevated(mut self, elevated: bool) -> Self {
        self.elevated = elevated;
        self
    }

    pub fn build(mut self, build: u32) -> Self {
        self.build = build;
        self
    }
}

impl Host for StaticHost {
    fn is_elevated(&self) -> bool {
        self.elevated
    }

    fn os_build(&self) -> io::Result<u32> {
        Ok(self.build)
    }

    fn fonts_dir(&self) -> io::Result<PathBuf> {
        Ok(self.fonts_dir.clone())
    }
}

/// The real system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHost;

#[cfg(windows)]
impl Host for SystemHost {
    fn is_elevated(&self) -> bool {
        use windows_sys::Win32::UI::Shell::IsUserAnAdmin;

        unsafe { IsUserAnAdmin() != 0 }
    }

    fn os_build(&self) -> io::Result<u32> {
        use winreg::{RegKey, enums::HKEY_LOCAL_MACHINE};

        use crate::config::{CURRENT_BUILD_VALUE, CURRENT_VERSION_KEY};

        let key = RegKey::predef(HKEY_LOCAL_MACHINE).open_subkey(CURRENT_VERSION_KEY)?;
        let build: String = key.get_value(CURRENT_BUILD_VALUE)?;
        build.trim().parse().map_err(|_| {
            io::Error::new(io::ErrorKind::InvalidData, format!("invalid build number: {build}"))
        })
    }

    fn fonts_dir(&self) -> io::Result<PathBuf> {
        std::env::var_os("WINDIR")
            .or_else(|| std::env::var_os("SystemRoot"))
            .map(|root| PathBuf::from(root).join("Fonts"))
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "WINDIR is not set"))
    }
}

#[cfg(not(windows))]
impl Host for SystemHost {
    fn is_elevated(&self) -> bool {
        false
    }

    fn os_build(&self) -> io::Result<u32> {
        Err(unsupported())
    }

    fn fonts_dir(&self) -> io::Result<PathBuf> {
        Err(unsupported())
    }
}

#[cfg(not(windows))]
pub(crate) fn unsupported() -> io::Error {
    io::Error::new(io::ErrorKind::Unsupported, "font registration requires Windows")
}
