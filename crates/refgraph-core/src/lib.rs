//! Refgraph Core - Asset reference graph engine
//!
//! This crate scans a project tree of assets and their sidecar metadata
//! files, builds a bidirectional "depends on" / "depended on by" graph keyed
//! by asset identifier, and enumerates what is reachable from any asset up
//! to a caller-chosen depth.
//!
//! ```rust,no_run
//! use refgraph_core::{build_graph, Direction, TraversalEngine};
//! use std::path::Path;
//!
//! let scan = build_graph(Path::new("Assets")).unwrap();
//! if let Some(start) = scan.resolve("Scenes/Main.unity") {
//!     let steps = TraversalEngine::traverse(&scan.graph, &start, Direction::Outgoing, 3);
//!     println!("{} steps", steps.len());
//! }
//! ```

pub mod builder;
pub mod error;
pub mod extract;
pub mod graph;
pub mod id;
pub mod index;
pub mod limits;
pub mod meta;
pub mod traversal;

pub use builder::{build_graph, GraphBuilder, ScanOptions, ScanResult, ScanStats};
pub use error::{Error, Result};
pub use extract::extract_references;
pub use graph::{AssetGraph, Node};
pub use id::AssetId;
pub use index::AssetIndex;
pub use meta::{parse_own_id, read_own_id};
pub use traversal::{node_ids, Direction, TraversalEngine, TraversalStep, TraversalSummary};
