pub mod importer;
pub mod reader;

use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::Result;
use crate::graph::SenseGraph;
use crate::graph::builder::{GraphBuilder, PassReport};
use crate::registry::SenseRegistry;

pub use importer::{ImportStats, RelationImporter};

/// What happened to one relation source file.
#[derive(Debug, Clone)]
pub struct SourceReport {
    pub path: PathBuf,
    pub import: ImportStats,
    pub pass: PassReport,
}

/// Build the relation graph from the given source files, in order.
///
/// Each file is read, translated and merged as its own pass; the builder
/// deduplicates after every pass.
pub fn build_graph<P: AsRef<Path>>(
    sources: &[P],
    registry: &SenseRegistry,
) -> Result<(SenseGraph, Vec<SourceReport>)> {
    let importer = RelationImporter::new(registry);
    let mut builder = GraphBuilder::new();
    let mut reports = Vec::with_capacity(sources.len());

    for source in sources {
        let path = source.as_ref();
        let records = reader::read_relations(path)?;
        let (edges, import) = importer.import(&records);
        info!(
            path = %path.display(),
            records = import.records,
            accepted = import.accepted,
            dropped = import.dropped,
            "Imported relation source"
        );
        let pass = builder.add_pass(edges);
        reports.push(SourceReport {
            path: path.to_path_buf(),
            import,
            pass,
        });
    }

    Ok((builder.finish(), reports))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IngestError;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_same_relation_in_two_files_yields_one_edge() {
        let dir = tempdir().unwrap();
        let p1 = dir.path().join("relacje-p1.txt");
        let p2 = dir.path().join("relacje-p2.txt");
        fs::write(&p1, "A1\tA2\thiperonimia\n").unwrap();
        fs::write(&p2, "A1\tA2\thiperonimia\n").unwrap();

        let registry = SenseRegistry::from_pairs([("A1", "s_kot"), ("A2", "s_zwierze")]);
        let (graph, reports) = build_graph(&[p1, p2], &registry).unwrap();

        assert_eq!(graph.edge_count(), 1);
        let types = graph.relations_between("s_kot", "s_zwierze");
        assert_eq!(types.len(), 1);
        assert_eq!(types[0].as_str(), "hiperonimia");
        assert_eq!(reports[0].pass.duplicates_removed, 0);
        assert_eq!(reports[1].pass.duplicates_removed, 1);
    }

    #[test]
    fn test_unknown_ids_leave_no_edge() {
        let dir = tempdir().unwrap();
        let p1 = dir.path().join("rels.txt");
        fs::write(&p1, "A1\tA2\thiperonimia\nA1\tZZ\thiponimia\nQQ\tA2\tmeronimia\n").unwrap();

        let registry = SenseRegistry::from_pairs([("A1", "s_kot"), ("A2", "s_zwierze")]);
        let (graph, reports) = build_graph(&[p1], &registry).unwrap();

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(reports[0].import.dropped, 2);
    }

    #[test]
    fn test_malformed_file_is_fatal() {
        let dir = tempdir().unwrap();
        let p1 = dir.path().join("rels.txt");
        fs::write(&p1, "A1\tA2\n").unwrap();

        let registry = SenseRegistry::from_pairs([("A1", "s_kot"), ("A2", "s_zwierze")]);
        let err = build_graph(&[p1], &registry).unwrap_err();
        assert!(matches!(err, IngestError::MalformedRelation { .. }));
    }
}
