//! Hazard feeds saved to disk.

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use saferoute_core::{HazardPoint, HazardSource, HazardSourceError};

use super::wire::parse_hazard_feed;

/// [`HazardSource`] backed by a JSON feed file.
///
/// The file is re-read on every call, so edits are picked up without
/// rebuilding the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHazardSource {
    path: Utf8PathBuf,
}

impl FileHazardSource {
    /// Read hazards from the feed at `path`.
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the feed.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl HazardSource for FileHazardSource {
    fn list_hazards(&self) -> Result<Vec<HazardPoint>, HazardSourceError> {
        let body =
            saferoute_fs::read_utf8_file(&self.path).map_err(|err| HazardSourceError::Io {
                path: self.path.to_string(),
                message: err.to_string(),
            })?;
        let hazards = parse_hazard_feed(&body)?;
        debug!("loaded {} hazards from {}", hazards.len(), self.path);
        Ok(hazards)
    }
}
