//! File removal, immediate or deferred until reboot.

use std::{fs::remove_file, io, path::Path};

/// Removes font files from disk.
pub trait FileRemover {
    /// Delete the file now.
    fn remove(&self, path: &Path) -> io::Result<()>;

    /// Ask the OS to delete the file on next restart.
    fn remove_on_reboot(&self, path: &Path) -> io::Result<()>;
}

/// Whether an I/O error means the file is locked or access was refused.
pub fn is_denied(err: &io::Error) -> bool {
    if err.kind() == io::ErrorKind::PermissionDenied {
        return true;
    }
    #[cfg(windows)]
    {
        use windows_sys::Win32::Foundation::{ERROR_ACCESS_DENIED, ERROR_SHARING_VIOLATION};

        if let Some(code) = err.raw_os_error() {
            let code = code as u32;
            return code == ERROR_ACCESS_DENIED || code == ERROR_SHARING_VIOLATION;
        }
    }
    false
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemFiles;

impl FileRemover for SystemFiles {
    fn remove(&self, path: &Path) -> io::Result<()> {
        remove_file(path)
    }

    #[cfg(windows)]
    fn remove_on_reboot(&self, path: &Path) -> io::Result<()> {
        use std::{iter::once, os::windows::ffi::OsStrExt, ptr::null};

        use windows_sys::Win32::Storage::FileSystem::{MOVEFILE_DELAY_UNTIL_REBOOT, MoveFileExW};

        let wide: Vec<u16> = path.as_os_str().encode_wide().chain(once(0)).collect();
        // A null destination with DELAY_UNTIL_REBOOT queues a delete.
        let ok = unsafe { MoveFileExW(wide.as_ptr(), null(), MOVEFILE_DELAY_UNTIL_REBOOT) };
        if ok == 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }

    #[cfg(not(windows))]
    fn remove_on_reboot(&self, _path: &Path) -> io::Result<()> {
        Err(crate::host::unsupported())
    }
}
