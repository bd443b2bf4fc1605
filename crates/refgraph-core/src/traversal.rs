//! Depth-bounded graph traversal
//!
//! Traversal is a depth-first pre-order walk with no visited set. The depth
//! bound alone guarantees termination, so on graphs with cycles or shared
//! descendants a node is emitted once for every path that reaches it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::{AssetGraph, Node};
use crate::id::AssetId;

/// Direction for graph traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// What the start node depends on
    #[default]
    Outgoing,
    /// What depends on the start node
    Incoming,
}

impl Direction {
    fn neighbors(self, node: &Node) -> &[AssetId] {
        match self {
            Direction::Outgoing => &node.outgoing,
            Direction::Incoming => &node.incoming,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Outgoing => write!(f, "outgoing"),
            Direction::Incoming => write!(f, "incoming"),
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "outgoing" | "out" | "dependencies" => Ok(Direction::Outgoing),
            "incoming" | "in" | "dependents" => Ok(Direction::Incoming),
            other => Err(format!("unknown direction: {}", other)),
        }
    }
}

/// One entry of a traversal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraversalStep {
    /// A node reached at `depth` (start's neighbours are depth 0)
    Node { id: AssetId, depth: u32 },
    /// `parent` has neighbours that were not descended into
    DepthLimit { depth: u32, parent: AssetId },
}

impl TraversalStep {
    pub fn depth(&self) -> u32 {
        match self {
            TraversalStep::Node { depth, .. } | TraversalStep::DepthLimit { depth, .. } => *depth,
        }
    }

    pub fn node_id(&self) -> Option<&AssetId> {
        match self {
            TraversalStep::Node { id, .. } => Some(id),
            TraversalStep::DepthLimit { .. } => None,
        }
    }

    pub fn is_depth_limit(&self) -> bool {
        matches!(self, TraversalStep::DepthLimit { .. })
    }
}

/// Traversal statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalSummary {
    pub node_entries: usize,
    pub unique_nodes: usize,
    pub depth_limits: usize,
    pub max_depth_reached: u32,
}

impl TraversalSummary {
    pub fn from_steps(steps: &[TraversalStep]) -> Self {
        let mut unique: HashSet<&AssetId> = HashSet::new();
        let mut summary = Self::default();

        for step in steps {
            match step {
                TraversalStep::Node { id, depth } => {
                    summary.node_entries += 1;
                    summary.max_depth_reached = summary.max_depth_reached.max(*depth);
                    unique.insert(id);
                }
                TraversalStep::DepthLimit { .. } => summary.depth_limits += 1,
            }
        }

        summary.unique_nodes = unique.len();
        summary
    }
}

/// Node identifiers of a traversal, in emission order
pub fn node_ids(steps: &[TraversalStep]) -> Vec<&AssetId> {
    steps.iter().filter_map(TraversalStep::node_id).collect()
}

/// Graph traversal engine
pub struct TraversalEngine;

impl TraversalEngine {
    /// Enumerate nodes reachable from `start`, up to `max_depth` levels
    ///
    /// The start node itself is not emitted. `max_depth == 0` yields nothing
    /// and an unknown start yields nothing.
    pub fn traverse(
        graph: &AssetGraph,
        start: &AssetId,
        direction: Direction,
        max_depth: u32,
    ) -> Vec<TraversalStep> {
        tracing::debug!(
            "Executing traversal: start={}, direction={}, depth={}",
            start,
            direction,
            max_depth
        );

        let mut steps = Vec::new();
        if max_depth == 0 {
            return steps;
        }
        let Some(node) = graph.lookup(start) else {
            return steps;
        };

        // Explicit stack keeps deep traversals off the call stack
        let mut pending: Vec<(&AssetId, u32)> = direction
            .neighbors(node)
            .iter()
            .rev()
            .map(|next| (next, 0))
            .collect();

        while let Some((id, depth)) = pending.pop() {
            steps.push(TraversalStep::Node {
                id: id.clone(),
                depth,
            });

            let Some(node) = graph.lookup(id) else {
                continue;
            };
            let neighbors = direction.neighbors(node);
            if neighbors.is_empty() {
                continue;
            }

            if depth + 1 >= max_depth {
                steps.push(TraversalStep::DepthLimit {
                    depth: depth + 1,
                    parent: id.clone(),
                });
                continue;
            }

            pending.extend(neighbors.iter().rev().map(|next| (next, depth + 1)));
        }

        tracing::debug!("Traversal emitted {} steps", steps.len());
        steps
    }

    /// Like [`TraversalEngine::traverse`] but fails on an unknown start
    pub fn traverse_from(
        graph: &AssetGraph,
        start: &AssetId,
        direction: Direction,
        max_depth: u32,
    ) -> Result<Vec<TraversalStep>> {
        if !graph.contains(start) {
            return Err(Error::AssetNotFound(start.to_string()));
        }
        Ok(Self::traverse(graph, start, direction, max_depth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(c: char) -> AssetId {
        AssetId::parse(&c.to_string().repeat(32)).unwrap()
    }

    // A -> B -> C -> D
    //      |
    //      v
    //      E
    fn create_test_graph() -> AssetGraph {
        let mut graph = AssetGraph::new();
        graph.add_reference(&id('a'), &id('b'));
        graph.add_reference(&id('b'), &id('c'));
        graph.add_reference(&id('c'), &id('d'));
        graph.add_reference(&id('b'), &id('e'));
        graph
    }

    #[test]
    fn test_depth_zero_is_empty() {
        let graph = create_test_graph();
        assert!(TraversalEngine::traverse(&graph, &id('a'), Direction::Outgoing, 0).is_empty());
    }

    #[test]
    fn test_depth_one_is_immediate_neighbors() {
        let graph = create_test_graph();
        let steps = TraversalEngine::traverse(&graph, &id('c'), Direction::Outgoing, 1);
        assert_eq!(
            steps,
            vec![TraversalStep::Node {
                id: id('d'),
                depth: 0
            }]
        );
    }

    #[test]
    fn test_preorder_with_depths() {
        let graph = create_test_graph();
        let steps = TraversalEngine::traverse(&graph, &id('a'), Direction::Outgoing, 10);

        let got: Vec<(String, u32)> = steps
            .iter()
            .map(|s| (s.node_id().unwrap().to_string(), s.depth()))
            .collect();
        assert_eq!(
            got,
            vec![
                (id('b').to_string(), 0),
                (id('c').to_string(), 1),
                (id('d').to_string(), 2),
                (id('e').to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_depth_limit_marker_replaces_descent() {
        let graph = create_test_graph();
        let steps = TraversalEngine::traverse(&graph, &id('a'), Direction::Outgoing, 2);

        assert_eq!(
            steps,
            vec![
                TraversalStep::Node { id: id('b'), depth: 0 },
                TraversalStep::Node { id: id('c'), depth: 1 },
                TraversalStep::DepthLimit { depth: 2, parent: id('c') },
                TraversalStep::Node { id: id('e'), depth: 1 },
            ]
        );
    }

    #[test]
    fn test_incoming_direction() {
        let graph = create_test_graph();
        let steps = TraversalEngine::traverse(&graph, &id('d'), Direction::Incoming, 10);
        let ids: Vec<&AssetId> = node_ids(&steps);
        assert_eq!(ids, vec![&id('c'), &id('b'), &id('a')]);
    }

    #[test]
    fn test_unknown_start() {
        let graph = create_test_graph();
        assert!(TraversalEngine::traverse(&graph, &id('z'), Direction::Outgoing, 5).is_empty());
        assert!(matches!(
            TraversalEngine::traverse_from(&graph, &id('z'), Direction::Outgoing, 5),
            Err(Error::AssetNotFound(_))
        ));
    }

    #[test]
    fn test_summary() {
        let graph = create_test_graph();
        let steps = TraversalEngine::traverse(&graph, &id('a'), Direction::Outgoing, 2);
        let summary = TraversalSummary::from_steps(&steps);
        assert_eq!(summary.node_entries, 3);
        assert_eq!(summary.unique_nodes, 3);
        assert_eq!(summary.depth_limits, 1);
        assert_eq!(summary.max_depth_reached, 1);
    }

    #[test]
    fn test_self_loop_at_large_depth_terminates() {
        let mut graph = AssetGraph::new();
        graph.add_reference(&id('a'), &id('a'));

        let max_depth = 200_000;
        let steps = TraversalEngine::traverse(&graph, &id('a'), Direction::Outgoing, max_depth);

        assert_eq!(steps.len(), max_depth as usize + 1);
        assert_eq!(steps[0].depth(), 0);
        assert_eq!(
            steps.last(),
            Some(&TraversalStep::DepthLimit {
                depth: max_depth,
                parent: id('a'),
            })
        );
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!("outgoing".parse::<Direction>(), Ok(Direction::Outgoing));
        assert_eq!("Incoming".parse::<Direction>(), Ok(Direction::Incoming));
        assert!("sideways".parse::<Direction>().is_err());
    }
}
