//! Reference extraction from asset file contents
//!
//! Works line by line: each physical line is searched for the first
//! occurrence of the marker, and the fixed-length token after it is taken
//! as a candidate identifier.

use std::collections::HashSet;

use crate::id::AssetId;

/// Extract the ordered, deduplicated identifiers referenced by `contents`
///
/// A marker at column 0 declares the file's own identifier and is never a
/// reference, so such lines are skipped. Truncated or invalid tokens are
/// dropped without affecting the rest of the file.
pub fn extract_references(contents: &str, marker: &str) -> Vec<AssetId> {
    let mut seen: HashSet<AssetId> = HashSet::new();
    let mut references = Vec::new();

    if marker.is_empty() {
        return references;
    }

    for (line_no, line) in contents.lines().enumerate() {
        let Some(pos) = line.find(marker) else {
            continue;
        };
        if pos == 0 {
            continue;
        }

        let rest = &line[pos + marker.len()..];
        let Some(token) = AssetId::take_token(rest) else {
            tracing::trace!("Truncated reference on line {}", line_no + 1);
            continue;
        };

        match AssetId::parse(token) {
            Ok(id) => {
                if seen.insert(id.clone()) {
                    references.push(id);
                }
            }
            Err(_) => {
                tracing::trace!("Ignoring reference {:?} on line {}", token, line_no + 1);
            }
        }
    }

    references
}
