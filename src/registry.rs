//! Sense mapping and definition tables.
//!
//! Both tables are loaded once and only read afterwards.

use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{IngestError, Result};
use crate::graph::SenseId;
use crate::ingest::reader::for_each_line;

/// Raw dataset identifier to canonical sense identifier.
#[derive(Debug, Clone, Default)]
pub struct SenseRegistry {
    canonical: HashMap<String, SenseId>,
    senses: Vec<SenseId>,
    known: HashSet<SenseId>,
}

impl SenseRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from `(raw_id, sense_id)` pairs. A repeated raw id
    /// keeps its last mapping.
    pub fn from_pairs<I, A, B>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<String>,
        B: AsRef<str>,
    {
        let mut registry = Self::new();
        for (raw, sense) in pairs {
            registry.insert(raw.into(), sense.as_ref());
        }
        registry
    }

    fn insert(&mut self, raw_id: String, sense: &str) {
        let sense = SenseId::new(sense);
        if self.known.insert(sense.clone()) {
            self.senses.push(sense.clone());
        }
        if let Some(previous) = self.canonical.insert(raw_id, sense.clone())
            && previous != sense
        {
            warn!(previous = %previous, current = %sense, "Raw id remapped to a different sense");
        }
    }

    /// Load the mapping from a CSV file whose first two columns are
    /// `raw_id,sense_id`. Additional columns are ignored.
    pub fn load(path: &Path) -> Result<Self> {
        let mut pairs: Vec<(String, String)> = Vec::new();
        for_each_line(path, |line_no, line| {
            if line.trim().is_empty() {
                return Ok(());
            }
            let fields = split_csv_line(line).map_err(|message| IngestError::MalformedSense {
                path: path.to_path_buf(),
                line: line_no,
                message,
            })?;
            let mut fields = fields.into_iter();
            match (fields.next(), fields.next()) {
                (Some(raw), Some(sense)) => {
                    pairs.push((raw, sense));
                    Ok(())
                }
                _ => Err(IngestError::MalformedSense {
                    path: path.to_path_buf(),
                    line: line_no,
                    message: "expected at least 2 comma-separated fields".to_string(),
                }),
            }
        })?;

        let registry = Self::from_pairs(pairs);
        debug!(
            path = %path.display(),
            raw_ids = registry.len(),
            senses = registry.senses.len(),
            "Loaded sense mapping"
        );
        Ok(registry)
    }

    /// Canonical sense for a raw dataset id.
    pub fn resolve(&self, raw_id: &str) -> Option<&SenseId> {
        self.canonical.get(raw_id)
    }

    /// Distinct canonical senses, in first-seen order.
    pub fn senses(&self) -> &[SenseId] {
        &self.senses
    }

    /// Number of raw ids.
    pub fn len(&self) -> usize {
        self.canonical.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }
}

/// Split a CSV line, honouring double-quoted fields and `""` escapes.
fn split_csv_line(line: &str) -> std::result::Result<Vec<String>, String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.is_empty() => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    if in_quotes {
        return Err("unterminated quoted field".to_string());
    }
    fields.push(field);
    Ok(fields)
}

#[derive(Deserialize)]
struct DefinitionRecord {
    #[serde(alias = "sense")]
    pl_sense: String,
    text: String,
}

/// Canonical sense identifier to definition text.
#[derive(Debug, Clone, Default)]
pub struct DefinitionTable {
    definitions: HashMap<SenseId, String>,
}

impl DefinitionTable {
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, A, B>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: AsRef<str>,
        B: Into<String>,
    {
        Self {
            definitions: pairs
                .into_iter()
                .map(|(sense, text)| (SenseId::new(sense.as_ref()), text.into()))
                .collect(),
        }
    }

    /// Load definitions from a JSON Lines file of
    /// `{"pl_sense": ..., "text": ...}` objects. Later lines win.
    pub fn load(path: &Path) -> Result<Self> {
        let mut definitions = HashMap::new();
        for_each_line(path, |line_no, line| {
            if line.trim().is_empty() {
                return Ok(());
            }
            let record: DefinitionRecord =
                serde_json::from_str(line).map_err(|source| IngestError::MalformedDefinition {
                    path: path.to_path_buf(),
                    line: line_no,
                    source,
                })?;
            definitions.insert(SenseId::new(&record.pl_sense), record.text);
            Ok(())
        })?;
        debug!(path = %path.display(), definitions = definitions.len(), "Loaded definitions");
        Ok(Self { definitions })
    }

    pub fn get(&self, sense: &str) -> Option<&str> {
        self.definitions.get(sense).map(String::as_str)
    }

    pub fn is_defined(&self, sense: &str) -> bool {
        self.definitions.contains_key(sense)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Registry senses with no definition, in registry order.
    pub fn undefined_senses<'a>(&self, registry: &'a SenseRegistry) -> Vec<&'a SenseId> {
        registry
            .senses()
            .iter()
            .filter(|s| !self.is_defined(s.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_split_csv_plain() {
        assert_eq!(split_csv_line("1,kot_1_n").unwrap(), vec!["1", "kot_1_n"]);
    }

    #[test]
    fn test_split_csv_quoted() {
        assert_eq!(
            split_csv_line(r#""1","a, b","say ""hi""""#).unwrap(),
            vec!["1", "a, b", r#"say "hi""#]
        );
    }

    #[test]
    fn test_split_csv_unterminated() {
        assert!(split_csv_line(r#"1,"oops"#).is_err());
    }

    #[test]
    fn test_registry_resolve_and_order() {
        let registry = SenseRegistry::from_pairs([("A1", "s_kot"), ("A2", "s_zwierze"), ("A3", "s_kot")]);
        assert_eq!(registry.resolve("A1").map(|s| s.as_str()), Some("s_kot"));
        assert_eq!(registry.resolve("A3").map(|s| s.as_str()), Some("s_kot"));
        assert!(registry.resolve("A9").is_none());
        assert_eq!(registry.len(), 3);
        let senses: Vec<&str> = registry.senses().iter().map(|s| s.as_str()).collect();
        assert_eq!(senses, vec!["s_kot", "s_zwierze"]);
    }

    #[test]
    fn test_registry_load_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("senses.csv");
        fs::write(&path, "100,kot_1_n,extra\n\n101,\"pies, domowy_1_n\"\n").unwrap();

        let registry = SenseRegistry::load(&path).unwrap();
        assert_eq!(registry.resolve("100").unwrap().as_str(), "kot_1_n");
        assert_eq!(registry.resolve("101").unwrap().as_str(), "pies, domowy_1_n");
    }

    #[test]
    fn test_registry_load_rejects_single_column() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("senses.csv");
        fs::write(&path, "100,kot_1_n\n101\n").unwrap();

        let err = SenseRegistry::load(&path).unwrap_err();
        assert!(matches!(err, IngestError::MalformedSense { line: 2, .. }));
    }

    #[test]
    fn test_definitions_load_jsonl() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("defs.jsonl");
        fs::write(
            &path,
            "{\"pl_sense\": \"kot_1_n\", \"text\": \"zwierzę domowe\"}\n\
             {\"sense\": \"pies_1_n\", \"text\": \"przyjaciel człowieka\"}\n\
             {\"pl_sense\": \"kot_1_n\", \"text\": \"mały drapieżnik\"}\n",
        )
        .unwrap();

        let defs = DefinitionTable::load(&path).unwrap();
        assert_eq!(defs.len(), 2);
        assert_eq!(defs.get("kot_1_n"), Some("mały drapieżnik"));
        assert_eq!(defs.get("pies_1_n"), Some("przyjaciel człowieka"));
        assert!(!defs.is_defined("ryba_1_n"));
    }

    #[test]
    fn test_definitions_load_rejects_bad_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("defs.jsonl");
        fs::write(&path, "{\"pl_sense\": \"kot_1_n\"}\n").unwrap();

        let err = DefinitionTable::load(&path).unwrap_err();
        assert!(matches!(err, IngestError::MalformedDefinition { line: 1, .. }));
    }

    #[test]
    fn test_undefined_senses() {
        let registry = SenseRegistry::from_pairs([("1", "a"), ("2", "b"), ("3", "c"), ("4", "b")]);
        let defs = DefinitionTable::from_pairs([("a", "def a")]);
        let undefined: Vec<&str> = defs
            .undefined_senses(&registry)
            .into_iter()
            .map(|s| s.as_str())
            .collect();
        assert_eq!(undefined, vec!["b", "c"]);
    }
}
