//! Output formatting utilities

use refgraph_core::{AssetIndex, TraversalStep};
use serde::Serialize;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Table,
        }
    }
}

/// Serialize to pretty JSON
pub fn to_json<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string())
}

/// Render traversal steps as an indented tree
///
/// Each node is shown with its path when the index knows it.
pub fn render_tree(steps: &[TraversalStep], index: &AssetIndex) -> String {
    let mut out = String::new();
    for step in steps {
        let indent = "  ".repeat(step.depth() as usize + 1);
        match step {
            TraversalStep::Node { id, .. } => {
                out.push_str(&format!("{}{} ({})\n", indent, index.label(id), id));
            }
            TraversalStep::DepthLimit { .. } => {
                out.push_str(&format!("{}... (depth limit reached)\n", indent));
            }
        }
    }
    out
}

/// A traversal step with its path resolved, for JSON output
#[derive(Debug, Serialize)]
pub struct StepView<'a> {
    #[serde(flatten)]
    pub step: &'a TraversalStep,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

pub fn step_views<'a>(steps: &'a [TraversalStep], index: &AssetIndex) -> Vec<StepView<'a>> {
    steps
        .iter()
        .map(|step| StepView {
            step,
            path: step
                .node_id()
                .and_then(|id| index.path_for_id(id))
                .map(|p| p.display().to_string()),
        })
        .collect()
}
