use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::graph::SenseGraph;
use crate::prompt::display_form;
use crate::registry::DefinitionTable;

/// A node as written to exported files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportNode {
    pub id: String,
    pub label: String,
    pub degree: usize,
    pub defined: bool,
}

/// An edge as written to exported files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportEdge {
    pub source: String,
    pub target: String,
    pub relation: String,
}

/// Export format for JSON
#[derive(Serialize, Deserialize)]
struct JsonExport {
    nodes: Vec<ExportNode>,
    edges: Vec<ExportEdge>,
}

/// One generated prompt, as a JSON Lines record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptRecord {
    pub sense: String,
    pub prompt: String,
}

pub fn collect_nodes(graph: &SenseGraph, definitions: &DefinitionTable, suffix_len: usize) -> Vec<ExportNode> {
    graph
        .nodes()
        .map(|n| ExportNode {
            id: n.to_string(),
            label: display_form(n.as_str(), suffix_len),
            degree: graph.degree(n.as_str()),
            defined: definitions.is_defined(n.as_str()),
        })
        .collect()
}

pub fn collect_edges(graph: &SenseGraph) -> Vec<ExportEdge> {
    graph
        .edges()
        .map(|e| ExportEdge {
            source: e.source.to_string(),
            target: e.target.to_string(),
            relation: e.relation.to_string(),
        })
        .collect()
}

/// Export the graph to a JSON file
pub fn export_json(
    graph: &SenseGraph,
    definitions: &DefinitionTable,
    suffix_len: usize,
    path: &Path,
) -> Result<()> {
    let export = JsonExport {
        nodes: collect_nodes(graph, definitions, suffix_len),
        edges: collect_edges(graph),
    };

    let file =
        File::create(path).with_context(|| format!("Failed to create file: {}", path.display()))?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, &export).context("Failed to write JSON")?;

    Ok(())
}

/// Export the graph to node and edge CSV files
pub fn export_csv(
    graph: &SenseGraph,
    definitions: &DefinitionTable,
    suffix_len: usize,
    nodes_path: &Path,
    edges_path: &Path,
) -> Result<()> {
    let file = File::create(nodes_path)
        .with_context(|| format!("Failed to create file: {}", nodes_path.display()))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "id,label,degree,defined")?;
    for node in collect_nodes(graph, definitions, suffix_len) {
        writeln!(
            writer,
            "\"{}\",\"{}\",{},{}",
            escape_csv(&node.id),
            escape_csv(&node.label),
            node.degree,
            node.defined
        )?;
    }
    writer.flush()?;

    let file = File::create(edges_path)
        .with_context(|| format!("Failed to create file: {}", edges_path.display()))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "source,target,relation")?;
    for edge in collect_edges(graph) {
        writeln!(
            writer,
            "\"{}\",\"{}\",\"{}\"",
            escape_csv(&edge.source),
            escape_csv(&edge.target),
            escape_csv(&edge.relation)
        )?;
    }
    writer.flush()?;

    Ok(())
}

/// Write one JSON object per line.
pub fn write_prompt_record<W: Write>(writer: &mut W, record: &PromptRecord) -> Result<()> {
    serde_json::to_writer(&mut *writer, record).context("Failed to serialize prompt")?;
    writeln!(writer)?;
    Ok(())
}

/// Escape special characters for CSV
fn escape_csv(s: &str) -> String {
    s.replace('"', "\"\"")
}
