//! Graph builder - scans a directory tree and builds the asset graph
//!
//! Every sidecar metadata file names one asset. Assets whose primary file is
//! of a reference-capable type contribute outgoing edges for each identifier
//! found in their contents.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::extract::extract_references;
use crate::graph::AssetGraph;
use crate::id::AssetId;
use crate::index::AssetIndex;
use crate::limits::{validate_marker, validate_meta_suffix, ValidationError};
use crate::meta::read_own_id;

fn default_meta_suffix() -> String {
    ".meta".to_string()
}

fn default_marker() -> String {
    "guid: ".to_string()
}

fn default_reference_extensions() -> Vec<String> {
    [
        "unity",
        "prefab",
        "asset",
        "mat",
        "anim",
        "controller",
        "overrideController",
        "mask",
        "playable",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Options controlling how a tree is scanned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanOptions {
    /// Suffix identifying sidecar metadata files
    #[serde(default = "default_meta_suffix")]
    pub meta_suffix: String,

    /// Literal prefix preceding an identifier token
    #[serde(default = "default_marker")]
    pub marker: String,

    /// Primary file extensions allowed to declare references
    #[serde(default = "default_reference_extensions")]
    pub reference_extensions: Vec<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            meta_suffix: default_meta_suffix(),
            marker: default_marker(),
            reference_extensions: default_reference_extensions(),
        }
    }
}

impl ScanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    pub fn with_meta_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.meta_suffix = suffix.into();
        self
    }

    pub fn with_reference_extensions(mut self, extensions: Vec<String>) -> Self {
        self.reference_extensions = extensions;
        self
    }

    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        validate_marker(&self.marker)?;
        validate_meta_suffix(&self.meta_suffix)
    }

    /// Whether a primary file may declare references, by extension
    pub fn is_reference_capable(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.reference_extensions
            .iter()
            .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }

    /// Primary file path for a metadata file, if its name carries the suffix
    fn primary_path(&self, meta_path: &Path) -> Option<PathBuf> {
        let name = meta_path.file_name()?.to_str()?;
        let stem = name.strip_suffix(&self.meta_suffix)?;
        if stem.is_empty() {
            return None;
        }
        Some(meta_path.with_file_name(stem))
    }
}

/// Counters collected while scanning
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    pub metadata_files: usize,
    pub orphaned_metadata: usize,
    pub missing_identifier: usize,
    pub reference_files: usize,
    pub unreadable_files: usize,
    pub non_text_files: usize,
    pub references: usize,
    pub walk_errors: usize,
}

/// Outcome of a scan
#[derive(Debug, Clone)]
pub struct ScanResult {
    pub graph: AssetGraph,
    pub index: AssetIndex,
    pub stats: ScanStats,
    pub started_at: DateTime<Utc>,
    pub duration: Duration,
    /// False when the scan was cancelled and the graph is partial
    pub completed: bool,
}

impl ScanResult {
    /// Resolve an identifier string or a root-relative path to an identifier
    pub fn resolve(&self, asset: &str) -> Option<AssetId> {
        if let Ok(id) = AssetId::parse(asset) {
            return Some(id);
        }
        self.index.id_for_path(Path::new(asset)).cloned()
    }
}

/// Builds an [`AssetGraph`] from a directory tree
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    options: ScanOptions,
}

impl GraphBuilder {
    pub fn new(options: ScanOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Scan `root` to completion
    pub fn scan(&self, root: &Path) -> Result<ScanResult> {
        self.build(root, || false)
    }

    /// Scan `root`, calling `cancel` before each metadata file
    ///
    /// When `cancel` returns true the scan stops and the partial graph is
    /// returned with `completed == false`. Only a missing or unreadable root
    /// is an error; per-file failures are logged and counted.
    pub fn build<F>(&self, root: &Path, mut cancel: F) -> Result<ScanResult>
    where
        F: FnMut() -> bool,
    {
        self.options.validate()?;
        check_root(root)?;

        let started_at = Utc::now();
        let timer = Instant::now();
        let mut graph = AssetGraph::new();
        let mut index = AssetIndex::new();
        let mut stats = ScanStats::default();
        let mut completed = true;

        tracing::info!("Scanning {:?}", root);

        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry: {}", e);
                    stats.walk_errors += 1;
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }
            let Some(primary) = self.options.primary_path(entry.path()) else {
                continue;
            };

            if cancel() {
                tracing::info!("Scan cancelled after {} metadata files", stats.metadata_files);
                completed = false;
                break;
            }

            stats.metadata_files += 1;
            self.process_metadata(root, entry.path(), &primary, &mut graph, &mut index, &mut stats);
        }

        let duration = timer.elapsed();
        tracing::info!(
            "Scanned {} metadata files into {} nodes and {} edges in {}ms",
            stats.metadata_files,
            graph.len(),
            graph.edge_count(),
            duration.as_millis()
        );

        Ok(ScanResult {
            graph,
            index,
            stats,
            started_at,
            duration,
            completed,
        })
    }

    fn process_metadata(
        &self,
        root: &Path,
        meta_path: &Path,
        primary: &Path,
        graph: &mut AssetGraph,
        index: &mut AssetIndex,
        stats: &mut ScanStats,
    ) {
        if !primary.exists() {
            tracing::debug!("Orphaned metadata {:?}", meta_path);
            stats.orphaned_metadata += 1;
            return;
        }

        let Some(own_id) = read_own_id(meta_path, &self.options.marker) else {
            tracing::debug!("No identifier in {:?}", meta_path);
            stats.missing_identifier += 1;
            return;
        };

        graph.get_or_create(&own_id);
        let relative = primary.strip_prefix(root).unwrap_or(primary).to_path_buf();
        index.insert(own_id.clone(), relative);

        if !primary.is_file() || !self.options.is_reference_capable(primary) {
            return;
        }
        stats.reference_files += 1;

        let contents = match read_text(primary) {
            Ok(Some(contents)) => contents,
            Ok(None) => {
                tracing::debug!("Not a text file, no references read: {:?}", primary);
                stats.non_text_files += 1;
                return;
            }
            Err(e) => {
                tracing::warn!("{}", e);
                stats.unreadable_files += 1;
                return;
            }
        };

        for target in extract_references(&contents, &self.options.marker) {
            if graph.add_reference(&own_id, &target) {
                stats.references += 1;
            }
        }
    }
}

/// Convenience wrapper scanning with default options
pub fn build_graph(root: &Path) -> Result<ScanResult> {
    GraphBuilder::default().scan(root)
}

fn check_root(root: &Path) -> Result<()> {
    let metadata = fs::metadata(root).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::RootNotFound(root.to_path_buf()),
        _ => Error::io(root, e),
    })?;
    if !metadata.is_dir() {
        return Err(Error::RootNotDirectory(root.to_path_buf()));
    }
    fs::read_dir(root).map_err(|e| Error::io(root, e))?;
    Ok(())
}

/// Read a file as UTF-8; `Ok(None)` for binary content
fn read_text(path: &Path) -> Result<Option<String>> {
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    Ok(String::from_utf8(bytes).ok())
}
