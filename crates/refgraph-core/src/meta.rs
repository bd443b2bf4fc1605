//! Sidecar metadata reading

use std::fs;
use std::path::Path;

use crate::id::AssetId;

/// Parse the identifier a metadata file declares for its asset
///
/// The first line starting with `marker` is authoritative. Anything after
/// the fixed-length token is ignored.
pub fn parse_own_id(contents: &str, marker: &str) -> Option<AssetId> {
    if marker.is_empty() {
        return None;
    }

    let line = contents.lines().find(|line| line.starts_with(marker))?;
    let token = AssetId::take_token(&line[marker.len()..])?;
    AssetId::parse(token).ok()
}

/// Read a metadata file and return its own identifier
///
/// I/O failures are logged and reported as `None`.
pub fn read_own_id(path: &Path, marker: &str) -> Option<AssetId> {
    match fs::read_to_string(path) {
        Ok(contents) => parse_own_id(&contents, marker),
        Err(e) => {
            tracing::warn!("Failed to read metadata {:?}: {}", path, e);
            None
        }
    }
}
