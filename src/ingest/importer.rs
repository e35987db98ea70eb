use tracing::debug;

use super::reader::RawRelation;
use crate::graph::{RelationType, TypedEdge};
use crate::registry::SenseRegistry;

/// Counters for one import of a source collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub records: usize,
    pub accepted: usize,
    pub dropped: usize,
}

/// Translates raw relation records into typed edges between canonical senses.
///
/// Records referring to a raw id outside the registry are dropped; relation
/// source files routinely reference senses outside the working vocabulary.
pub struct RelationImporter<'a> {
    registry: &'a SenseRegistry,
}

impl<'a> RelationImporter<'a> {
    pub fn new(registry: &'a SenseRegistry) -> Self {
        Self { registry }
    }

    /// Translate a single record, or `None` if either endpoint is unknown.
    pub fn translate(&self, record: &RawRelation) -> Option<TypedEdge> {
        let source = self.registry.resolve(&record.raw_id_1)?;
        let target = self.registry.resolve(&record.raw_id_2)?;
        Some(TypedEdge::new(
            source.clone(),
            target.clone(),
            RelationType::new(&record.relation_type),
        ))
    }

    /// Translate a whole source collection.
    pub fn import<'r, I>(&self, records: I) -> (Vec<TypedEdge>, ImportStats)
    where
        I: IntoIterator<Item = &'r RawRelation>,
    {
        let mut stats = ImportStats::default();
        let mut edges = Vec::new();

        for record in records {
            stats.records += 1;
            match self.translate(record) {
                Some(edge) => {
                    stats.accepted += 1;
                    edges.push(edge);
                }
                None => {
                    stats.dropped += 1;
                    debug!(
                        raw_id_1 = %record.raw_id_1,
                        raw_id_2 = %record.raw_id_2,
                        "Dropping relation with unknown sense"
                    );
                }
            }
        }

        (edges, stats)
    }
}
