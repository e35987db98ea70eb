use tracing::{debug, info};

use super::{SenseGraph, TypedEdge};

/// Outcome of one import pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassReport {
    /// Edge candidates added to the graph.
    pub added: usize,
    /// Edges removed by the deduplication pass that followed.
    pub duplicates_removed: usize,
}

/// Builder for constructing the sense relation graph.
///
/// Owns the graph for the duration of ingestion. Each call to
/// [`GraphBuilder::add_pass`] appends one source collection and then
/// deduplicates the whole graph before returning, so the next pass always
/// starts from a consistent snapshot.
pub struct GraphBuilder {
    graph: SenseGraph,
    passes: usize,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            graph: SenseGraph::new(),
            passes: 0,
        }
    }

    /// Add every edge from one source collection, then run the dedup pass.
    pub fn add_pass<I>(&mut self, edges: I) -> PassReport
    where
        I: IntoIterator<Item = TypedEdge>,
    {
        let mut added = 0;
        for edge in edges {
            self.graph.add_edge(&edge);
            added += 1;
        }
        let duplicates_removed = self.dedup();
        self.passes += 1;

        info!(
            pass = self.passes,
            added,
            duplicates_removed,
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            "Import pass complete"
        );

        PassReport {
            added,
            duplicates_removed,
        }
    }

    /// Remove repeated relation types between the same ordered pair.
    pub fn dedup(&mut self) -> usize {
        let removed = self.graph.dedup_parallel_edges();
        if removed > 0 {
            debug!(removed, "Removed duplicate parallel edges");
        }
        removed
    }

    /// Read-only view of the graph built so far.
    #[allow(dead_code)]
    pub fn graph(&self) -> &SenseGraph {
        &self.graph
    }

    /// Number of passes applied so far.
    #[allow(dead_code)]
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Hand the finished graph to downstream consumers.
    pub fn finish(self) -> SenseGraph {
        self.graph
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
