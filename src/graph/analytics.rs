use petgraph::algo::connected_components;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

use super::RelationType;

/// Graph analytics results
#[derive(Debug, Clone)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub connected_components: usize,
    pub density: f64,
    pub avg_degree: f64,
    pub max_degree: usize,
    pub self_loops: usize,
    pub top_degree: Vec<(String, usize)>,
}

/// Compute degree (in + out) for each node.
pub fn node_degrees(graph: &DiGraph<String, RelationType>) -> HashMap<NodeIndex, usize> {
    graph
        .node_indices()
        .map(|ni| {
            let in_deg = graph
                .edges_directed(ni, petgraph::Direction::Incoming)
                .count();
            let out_deg = graph
                .edges_directed(ni, petgraph::Direction::Outgoing)
                .count();
            (ni, in_deg + out_deg)
        })
        .collect()
}

/// Compute full graph statistics.
///
/// Components are weakly connected: edge direction is ignored.
pub fn compute_stats(graph: &DiGraph<String, RelationType>) -> GraphStats {
    let node_count = graph.node_count();
    let edge_count = graph.edge_count();

    let connected = connected_components(graph);

    let density = if node_count > 1 {
        edge_count as f64 / (node_count as f64 * (node_count as f64 - 1.0))
    } else {
        0.0
    };

    let degrees = node_degrees(graph);
    let avg_degree = if node_count > 0 {
        degrees.values().sum::<usize>() as f64 / node_count as f64
    } else {
        0.0
    };
    let max_degree = degrees.values().copied().max().unwrap_or(0);

    let self_loops = graph
        .edge_references()
        .filter(|e| e.source() == e.target())
        .count();

    // Top nodes by degree, ties broken by label
    let mut degree_vec: Vec<(String, usize)> = degrees
        .iter()
        .map(|(&ni, &d)| (graph[ni].clone(), d))
        .collect();
    degree_vec.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    degree_vec.truncate(10);

    GraphStats {
        node_count,
        edge_count,
        connected_components: connected,
        density,
        avg_degree,
        max_degree,
        self_loops,
        top_degree: degree_vec,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_simple_graph() -> DiGraph<String, RelationType> {
        let mut g = DiGraph::new();
        let a = g.add_node("a".into());
        let b = g.add_node("b".into());
        let c = g.add_node("c".into());
        g.add_edge(a, b, "hiperonimia".into());
        g.add_edge(a, b, "synonimia".into());
        g.add_edge(b, c, "hiperonimia".into());
        g.add_edge(a, c, "meronimia".into());
        g
    }

    #[test]
    fn test_node_degrees_count_parallel_edges() {
        let g = build_simple_graph();
        let deg = node_degrees(&g);
        let a_idx = g.node_indices().find(|&ni| g[ni] == "a").unwrap();
        let b_idx = g.node_indices().find(|&ni| g[ni] == "b").unwrap();
        assert_eq!(deg[&a_idx], 3);
        assert_eq!(deg[&b_idx], 3);
    }

    #[test]
    fn test_compute_stats() {
        let g = build_simple_graph();
        let stats = compute_stats(&g);
        assert_eq!(stats.node_count, 3);
        assert_eq!(stats.edge_count, 4);
        assert_eq!(stats.connected_components, 1);
        assert_eq!(stats.max_degree, 3);
        assert_eq!(stats.self_loops, 0);
        assert!(stats.density > 0.0);
        assert_eq!(stats.top_degree[0], ("a".to_string(), 3));
        assert_eq!(stats.top_degree[1], ("b".to_string(), 3));
    }

    #[test]
    fn test_compute_stats_disconnected() {
        let mut g = DiGraph::new();
        let a = g.add_node("a".into());
        let b = g.add_node("b".into());
        let c = g.add_node("c".into());
        let d = g.add_node("d".into());
        g.add_edge(a, b, "r".into());
        g.add_edge(c, d, "r".into());
        g.add_edge(d, d, "r".into());

        let stats = compute_stats(&g);
        assert_eq!(stats.connected_components, 2);
        assert_eq!(stats.self_loops, 1);
    }

    #[test]
    fn test_compute_stats_empty() {
        let g: DiGraph<String, RelationType> = DiGraph::new();
        let stats = compute_stats(&g);
        assert_eq!(stats.node_count, 0);
        assert_eq!(stats.density, 0.0);
        assert_eq!(stats.avg_degree, 0.0);
        assert!(stats.top_degree.is_empty());
    }
}
