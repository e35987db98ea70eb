//! Read-only reporting helpers over a finished graph.

use std::collections::BTreeMap;

use super::{RelationType, SenseGraph, SenseId};
use crate::registry::DefinitionTable;

/// Graph nodes without a definition.
pub fn count_undefined(graph: &SenseGraph, definitions: &DefinitionTable) -> usize {
    graph
        .nodes()
        .filter(|n| !definitions.is_defined(n.as_str()))
        .count()
}

/// Undefined graph nodes whose total degree exceeds `min_degree`.
pub fn count_undefined_with_degree_above(
    graph: &SenseGraph,
    definitions: &DefinitionTable,
    min_degree: usize,
) -> usize {
    graph
        .nodes()
        .filter(|n| graph.degree(n.as_str()) > min_degree && !definitions.is_defined(n.as_str()))
        .count()
}

/// Number of edges carrying each relation type.
pub fn relation_type_counts(graph: &SenseGraph) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for edge in graph.edges() {
        *counts.entry(edge.relation.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Ordered pairs whose parallel edges include every type in `types`.
///
/// With a single type this lists the edges of that type; with several it
/// finds pairs related in more than one way, such as both `hiperonimia` and
/// `hiponimia`. An empty `types` slice matches nothing.
pub fn edges_with_types<'a, S: AsRef<str>>(
    graph: &'a SenseGraph,
    types: &[S],
) -> Vec<(&'a SenseId, &'a SenseId)> {
    if types.is_empty() {
        return Vec::new();
    }
    graph
        .adjacent_pairs()
        .filter(|(_, _, relations)| {
            types
                .iter()
                .all(|t| relations.iter().any(|r| r.as_str() == t.as_ref()))
        })
        .map(|(source, target, _)| (source, target))
        .collect()
}

/// Successors of `sense` with the relation types leading to each.
pub fn node_connections<'a>(graph: &'a SenseGraph, sense: &str) -> Vec<(&'a SenseId, &'a [RelationType])> {
    graph.successors(sense).collect()
}

/// Predecessors of `sense` with the relation types leading from each.
pub fn node_incoming<'a>(graph: &'a SenseGraph, sense: &str) -> Vec<(&'a SenseId, &'a [RelationType])> {
    graph.predecessors(sense).collect()
}
