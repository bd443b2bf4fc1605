//! In-memory asset graph store

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::id::AssetId;

/// A node in the asset graph
///
/// Neighbours are held by identifier only; all lookups go through the
/// owning [`AssetGraph`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Identifier of the asset this node stands for
    pub id: AssetId,

    /// Assets this node depends on, in first-seen order
    pub outgoing: Vec<AssetId>,

    /// Assets depending on this node, in first-seen order
    pub incoming: Vec<AssetId>,
}

impl Node {
    pub fn new(id: AssetId) -> Self {
        Self {
            id,
            outgoing: Vec::new(),
            incoming: Vec::new(),
        }
    }

    pub fn depends_on(&self, id: &AssetId) -> bool {
        self.outgoing.contains(id)
    }

    pub fn is_depended_on_by(&self, id: &AssetId) -> bool {
        self.incoming.contains(id)
    }

    fn push_outgoing(&mut self, id: &AssetId) -> bool {
        if self.outgoing.contains(id) {
            return false;
        }
        self.outgoing.push(id.clone());
        true
    }

    fn push_incoming(&mut self, id: &AssetId) {
        if !self.incoming.contains(id) {
            self.incoming.push(id.clone());
        }
    }
}

/// Graph of asset nodes keyed by identifier
///
/// Built fresh on every scan. The builder is the only writer; once a scan
/// returns, the graph is only read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetGraph {
    nodes: BTreeMap<AssetId, Node>,
}

impl AssetGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the node for `id`, creating an empty one if absent
    pub fn get_or_create(&mut self, id: &AssetId) -> &mut Node {
        self.nodes
            .entry(id.clone())
            .or_insert_with(|| Node::new(id.clone()))
    }

    /// Look up a node without creating it
    pub fn lookup(&self, id: &AssetId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &AssetId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Record that `from` depends on `to`
    ///
    /// Both nodes are created if needed and the edge is inserted on both
    /// sides. Returns `false` if the edge already existed.
    pub fn add_reference(&mut self, from: &AssetId, to: &AssetId) -> bool {
        if !self.get_or_create(from).push_outgoing(to) {
            return false;
        }
        self.get_or_create(to).push_incoming(from);
        true
    }

    /// Nodes in identifier order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Identifiers in order
    pub fn ids(&self) -> impl Iterator<Item = &AssetId> {
        self.nodes.keys()
    }

    /// Total number of dependency edges
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|n| n.outgoing.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(c: char) -> AssetId {
        AssetId::parse(&c.to_string().repeat(32)).unwrap()
    }

    #[test]
    fn test_get_or_create_is_idempotent() {
        let mut graph = AssetGraph::new();
        graph.get_or_create(&id('a'));
        graph.get_or_create(&id('a'));

        assert_eq!(graph.len(), 1);
        assert!(graph.lookup(&id('a')).is_some());
        assert!(graph.lookup(&id('b')).is_none());
    }

    #[test]
    fn test_add_reference_is_pairwise() {
        let mut graph = AssetGraph::new();
        assert!(graph.add_reference(&id('a'), &id('b')));
        assert!(!graph.add_reference(&id('a'), &id('b')));

        let a = graph.lookup(&id('a')).unwrap();
        let b = graph.lookup(&id('b')).unwrap();
        assert_eq!(a.outgoing, vec![id('b')]);
        assert!(a.incoming.is_empty());
        assert_eq!(b.incoming, vec![id('a')]);
        assert!(b.outgoing.is_empty());
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_self_reference() {
        let mut graph = AssetGraph::new();
        graph.add_reference(&id('a'), &id('a'));

        let a = graph.lookup(&id('a')).unwrap();
        assert!(a.depends_on(&id('a')));
        assert!(a.is_depended_on_by(&id('a')));
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut graph = AssetGraph::new();
        graph.add_reference(&id('a'), &id('c'));
        graph.add_reference(&id('a'), &id('b'));

        let a = graph.lookup(&id('a')).unwrap();
        assert_eq!(a.outgoing, vec![id('c'), id('b')]);

        let ids: Vec<_> = graph.ids().cloned().collect();
        assert_eq!(ids, vec![id('a'), id('b'), id('c')]);
    }
}
