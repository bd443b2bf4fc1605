//! Identifier to path lookup recorded during a scan

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::id::AssetId;

/// Maps asset identifiers to their primary files and back
///
/// Paths are stored relative to the scan root.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AssetIndex {
    paths: BTreeMap<AssetId, PathBuf>,
    #[serde(skip)]
    ids: HashMap<PathBuf, AssetId>,
}

impl AssetIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the primary file for `id`. The first path seen for an
    /// identifier is kept; later duplicates are logged.
    pub fn insert(&mut self, id: AssetId, path: PathBuf) {
        if let Some(existing) = self.paths.get(&id) {
            if existing != &path {
                tracing::warn!(
                    "Duplicate identifier {} for {:?} (already {:?})",
                    id,
                    path,
                    existing
                );
            }
            return;
        }
        self.ids.insert(path.clone(), id.clone());
        self.paths.insert(id, path);
    }

    pub fn path_for_id(&self, id: &AssetId) -> Option<&Path> {
        self.paths.get(id).map(PathBuf::as_path)
    }

    pub fn id_for_path(&self, path: &Path) -> Option<&AssetId> {
        self.ids.get(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Label for display: the path if known, otherwise the identifier
    pub fn label(&self, id: &AssetId) -> String {
        self.path_for_id(id)
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| id.to_string())
    }
}
