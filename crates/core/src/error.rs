//! Error types for font uninstall and bundle install operations.

use std::{io, path::PathBuf, result};

use crate::scope::Scope;

/// Errors that can occur while managing fonts.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unable to access the {scope} font registry ({}): {source}", .scope.hive())]
    RegistryUnavailable {
        scope: Scope,
        #[source]
        source: io::Error,
    },

    #[error("font is not registered at {scope} scope: {name}")]
    NotRegistered { name: String, scope: Scope },

    #[error("administrator rights are required to {action}")]
    InsufficientPrivilege { action: String },

    #[error("per-user fonts require Windows build {required} or newer (running build {build})")]
    UnsupportedPlatformVersion { build: u32, required: u32 },

    #[error(
        "font file is in use: {}; re-run from an elevated session to delete it on next reboot",
        .path.display()
    )]
    FileDeleteDenied { path: PathBuf },

    #[error("failed to delete font file {}: {source}", .path.display())]
    GenericDeleteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to fetch {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("failed to read archive {}: {source}", .path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("failed to install {}: {reason}", .font.display())]
    Installer { font: PathBuf, reason: String },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        Error::Io { context: context.into(), source }
    }
}

pub type Result<T> = result::Result<T, Error>;
