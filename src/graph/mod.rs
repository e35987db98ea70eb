pub mod analytics;
pub mod builder;
pub mod query;

use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Serialize, Serializer};
use std::borrow::Borrow;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// Canonical identifier of a lexical sense; the node key of the graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SenseId(Arc<str>);

/// Label of a directed relation. Open domain, interned per graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelationType(Arc<str>);

macro_rules! shared_str {
    ($name:ident) => {
        impl $name {
            pub fn new(value: &str) -> Self {
                Self(Arc::from(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.0)
            }
        }
    };
}

shared_str!(SenseId);
shared_str!(RelationType);

/// A directed typed edge candidate, as produced by the importer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedEdge {
    pub source: SenseId,
    pub target: SenseId,
    pub relation: RelationType,
}

impl TypedEdge {
    pub fn new(source: SenseId, target: SenseId, relation: RelationType) -> Self {
        Self {
            source,
            target,
            relation,
        }
    }
}

/// Borrowed view of one edge instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeView<'a> {
    pub source: &'a SenseId,
    pub target: &'a SenseId,
    pub relation: &'a RelationType,
}

/// All parallel edges from one node to one successor, in insertion order.
#[derive(Debug, Clone)]
struct Bucket {
    target: usize,
    relations: Vec<RelationType>,
}

#[derive(Debug, Clone)]
struct Node {
    id: SenseId,
    out: Vec<Bucket>,
    out_pos: HashMap<usize, usize>,
    preds: Vec<usize>,
    pred_set: HashSet<usize>,
}

impl Node {
    fn new(id: SenseId) -> Self {
        Self {
            id,
            out: Vec::new(),
            out_pos: HashMap::new(),
            preds: Vec::new(),
            pred_set: HashSet::new(),
        }
    }
}

/// Directed multigraph of senses with typed edges.
///
/// Nodes iterate in insertion order. A node's successors iterate in the order
/// their first edge was added, and parallel edges to one successor iterate in
/// insertion order. Predecessors follow the same rule from the other side.
#[derive(Debug, Clone, Default)]
pub struct SenseGraph {
    index: HashMap<SenseId, usize>,
    nodes: Vec<Node>,
    relation_types: HashSet<RelationType>,
    edge_count: usize,
}

impl SenseGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn contains(&self, sense: &str) -> bool {
        self.index.contains_key(sense)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &SenseId> {
        self.nodes.iter().map(|n| &n.id)
    }

    /// Add one edge instance. Existing edges with the same endpoints and type
    /// are left in place; the new instance is appended after them.
    pub(crate) fn add_edge(&mut self, edge: &TypedEdge) {
        let source = self.ensure_node(&edge.source);
        let target = self.ensure_node(&edge.target);
        let relation = self.intern(&edge.relation);

        let node = &mut self.nodes[source];
        match node.out_pos.get(&target) {
            Some(&pos) => node.out[pos].relations.push(relation),
            None => {
                node.out_pos.insert(target, node.out.len());
                node.out.push(Bucket {
                    target,
                    relations: vec![relation],
                });
            }
        }

        let target_node = &mut self.nodes[target];
        if target_node.pred_set.insert(source) {
            target_node.preds.push(source);
        }
        self.edge_count += 1;
    }

    /// Remove every parallel edge that repeats the type of an earlier edge
    /// between the same ordered pair. Returns the number of edges removed.
    pub(crate) fn dedup_parallel_edges(&mut self) -> usize {
        let mut removed = 0;
        for node in &mut self.nodes {
            for bucket in &mut node.out {
                let before = bucket.relations.len();
                let mut seen: HashSet<RelationType> = HashSet::with_capacity(before);
                bucket.relations.retain(|r| seen.insert(r.clone()));
                removed += before - bucket.relations.len();
            }
        }
        self.edge_count -= removed;
        removed
    }

    fn ensure_node(&mut self, id: &SenseId) -> usize {
        if let Some(&ix) = self.index.get(id) {
            return ix;
        }
        let ix = self.nodes.len();
        self.nodes.push(Node::new(id.clone()));
        self.index.insert(id.clone(), ix);
        ix
    }

    fn intern(&mut self, relation: &RelationType) -> RelationType {
        match self.relation_types.get(relation.as_str()) {
            Some(existing) => existing.clone(),
            None => {
                self.relation_types.insert(relation.clone());
                relation.clone()
            }
        }
    }

    /// Successors of `sense` with the relation types of the parallel edges
    /// leading to each. Empty for unknown senses.
    pub fn successors<'a>(
        &'a self,
        sense: &str,
    ) -> impl Iterator<Item = (&'a SenseId, &'a [RelationType])> + 'a {
        let node = self.index.get(sense).map(|&ix| &self.nodes[ix]);
        node.into_iter().flat_map(move |n| {
            n.out
                .iter()
                .map(move |b| (&self.nodes[b.target].id, b.relations.as_slice()))
        })
    }

    /// Predecessors of `sense` with the relation types of the parallel edges
    /// leading from each into `sense`. Empty for unknown senses.
    pub fn predecessors<'a>(
        &'a self,
        sense: &str,
    ) -> impl Iterator<Item = (&'a SenseId, &'a [RelationType])> + 'a {
        let target = self.index.get(sense).copied();
        target.into_iter().flat_map(move |t| {
            self.nodes[t].preds.iter().map(move |&p| {
                let pred = &self.nodes[p];
                let relations = pred
                    .out_pos
                    .get(&t)
                    .map(|&pos| pred.out[pos].relations.as_slice())
                    .unwrap_or(&[]);
                (&pred.id, relations)
            })
        })
    }

    /// Parallel edge types from `source` to `target`, in insertion order.
    #[allow(dead_code)]
    pub fn relations_between(&self, source: &str, target: &str) -> &[RelationType] {
        let (Some(&s), Some(&t)) = (self.index.get(source), self.index.get(target)) else {
            return &[];
        };
        let node = &self.nodes[s];
        node.out_pos
            .get(&t)
            .map(|&pos| node.out[pos].relations.as_slice())
            .unwrap_or(&[])
    }

    /// Every edge instance, grouped by source then successor.
    pub fn edges(&self) -> impl Iterator<Item = EdgeView<'_>> {
        self.nodes.iter().flat_map(move |n| {
            n.out.iter().flat_map(move |b| {
                let target = &self.nodes[b.target].id;
                b.relations.iter().map(move |relation| EdgeView {
                    source: &n.id,
                    target,
                    relation,
                })
            })
        })
    }

    /// Every ordered pair that carries at least one edge, with its edge types.
    pub fn adjacent_pairs(
        &self,
    ) -> impl Iterator<Item = (&SenseId, &SenseId, &[RelationType])> {
        self.nodes.iter().flat_map(move |n| {
            n.out
                .iter()
                .map(move |b| (&n.id, &self.nodes[b.target].id, b.relations.as_slice()))
        })
    }

    pub fn out_degree(&self, sense: &str) -> usize {
        self.successors(sense).map(|(_, r)| r.len()).sum()
    }

    pub fn in_degree(&self, sense: &str) -> usize {
        self.predecessors(sense).map(|(_, r)| r.len()).sum()
    }

    /// In plus out edge count, parallel edges counted individually. A
    /// self-loop contributes two.
    pub fn degree(&self, sense: &str) -> usize {
        self.out_degree(sense) + self.in_degree(sense)
    }

    /// Project onto a petgraph graph, one petgraph edge per edge instance.
    pub fn to_petgraph(&self) -> DiGraph<String, RelationType> {
        let mut graph = DiGraph::with_capacity(self.node_count(), self.edge_count());
        let indices: Vec<NodeIndex> = self
            .nodes
            .iter()
            .map(|n| graph.add_node(n.id.to_string()))
            .collect();
        for (ix, node) in self.nodes.iter().enumerate() {
            for bucket in &node.out {
                for relation in &bucket.relations {
                    graph.add_edge(indices[ix], indices[bucket.target], relation.clone());
                }
            }
        }
        graph
    }
}
