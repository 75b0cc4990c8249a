use std::{fs::File, path::Path};

use reqwest::blocking::get;

use crate::error::{Error, Result};

/// Downloads a URL to a local file.
pub trait Fetch {
    /// Writes the response body to `dest` and returns the byte count.
    fn fetch(&self, url: &str, dest: &Path) -> Result<u64>;
}

/// Blocking HTTP GET.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpFetcher;

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<u64> {
        let mut response =
            get(url).map_err(|source| Error::Download { url: url.to_owned(), source })?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus { url: url.to_owned(), status: status.as_u16() });
        }

        let mut file = File::create(dest)
            .map_err(|e| Error::io(format!("failed to create {}", dest.display()), e))?;
        response
            .copy_to(&mut file)
            .map_err(|source| Error::Download { url: url.to_owned(), source })
    }
}
