//! Configuration constants for font registration and bundle installs.

/// Registry path of the font registration set, relative to HKLM or HKCU.
pub const FONTS_KEY: &str = r"SOFTWARE\Microsoft\Windows NT\CurrentVersion\Fonts";

/// Registry path holding the OS build number, relative to HKLM.
pub const CURRENT_VERSION_KEY: &str = r"SOFTWARE\Microsoft\Windows NT\CurrentVersion";

/// Registry value name of the OS build number.
pub const CURRENT_BUILD_VALUE: &str = "CurrentBuildNumber";

/// First Windows build with per-user font installation (Windows 10 1809).
pub const MIN_USER_SCOPE_BUILD: u32 = 17763;

/// Font bundle download URL (ZIP archive).
pub const BUNDLE_URL: &str =
    "https://github.com/microsoft/cascadia-code/releases/download/v2407.24/CascadiaCode-2407.24.zip";

/// Prefix of the cached archive and extraction directory names. The rest of
/// the name comes from the bundle URL.
pub const CACHE_PREFIX: &str = "winfont-";

/// Suffix appended to the archive path while a download is in flight.
pub const PARTIAL_SUFFIX: &str = "part";

/// File extensions treated as installable fonts (compared without case).
pub const FONT_EXTENSIONS: &[&str] = &["ttf", "ttc", "otf"];

/// Single-font installer script, looked up next to the running executable.
pub const INSTALLER_SCRIPT: &str = "Install-Font.ps1";

/// Log file written by the single-font installer.
pub const INSTALLER_LOG: &str = "Install-Font.log";

/// Shell used to run the installer script.
pub const POWERSHELL: &str = "powershell.exe";
