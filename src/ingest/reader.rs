//! Line-oriented readers for the dataset files.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{IngestError, Result};

/// A relation record exactly as it appears in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRelation {
    pub raw_id_1: String,
    pub raw_id_2: String,
    pub relation_type: String,
}

impl RawRelation {
    pub fn new(raw_id_1: &str, raw_id_2: &str, relation_type: &str) -> Self {
        Self {
            raw_id_1: raw_id_1.to_string(),
            raw_id_2: raw_id_2.to_string(),
            relation_type: relation_type.to_string(),
        }
    }
}

/// Call `f` with the 1-based number and content of every line in `path`,
/// without the line terminator. Lines must be valid UTF-8.
pub(crate) fn for_each_line<F>(path: &Path, mut f: F) -> Result<()>
where
    F: FnMut(usize, &str) -> Result<()>,
{
    let file = File::open(path).map_err(|e| IngestError::io(path, e))?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();
    let mut line_no = 0;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| IngestError::io(path, e))?;
        if read == 0 {
            return Ok(());
        }
        line_no += 1;

        if buf.last() == Some(&b'\n') {
            buf.pop();
        }
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
        let line = std::str::from_utf8(&buf).map_err(|_| IngestError::InvalidEncoding {
            path: path.to_path_buf(),
            line: line_no,
        })?;
        f(line_no, line)?;
    }
}

/// Split one tab-separated relation line. Returns `None` for blank lines.
pub fn parse_relation_line(path: &Path, line_no: usize, line: &str) -> Result<Option<RawRelation>> {
    if line.trim().is_empty() {
        return Ok(None);
    }
    let fields: Vec<&str> = line.split('\t').collect();
    match fields.as_slice() {
        [id_1, id_2, relation_type] => Ok(Some(RawRelation::new(id_1, id_2, relation_type))),
        _ => Err(IngestError::MalformedRelation {
            path: path.to_path_buf(),
            line: line_no,
            found: fields.len(),
        }),
    }
}

/// Read a whole relation source file.
///
/// Any malformed line fails the file as a whole.
pub fn read_relations(path: &Path) -> Result<Vec<RawRelation>> {
    let mut records = Vec::new();
    for_each_line(path, |line_no, line| {
        if let Some(record) = parse_relation_line(path, line_no, line)? {
            records.push(record);
        }
        Ok(())
    })?;
    tracing::debug!(path = %path.display(), records = records.len(), "Read relation file");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_parse_relation_line() {
        let path = Path::new("rels.txt");
        let record = parse_relation_line(path, 1, "10\t20\thiperonimia").unwrap();
        assert_eq!(record, Some(RawRelation::new("10", "20", "hiperonimia")));
    }

    #[test]
    fn test_parse_relation_line_keeps_spaces_in_type() {
        let path = Path::new("rels.txt");
        let record = parse_relation_line(path, 1, "10\t20\tmeronimia (część)").unwrap().unwrap();
        assert_eq!(record.relation_type, "meronimia (część)");
    }

    #[test]
    fn test_blank_line_skipped() {
        let path = Path::new("rels.txt");
        assert_eq!(parse_relation_line(path, 1, "").unwrap(), None);
        assert_eq!(parse_relation_line(path, 1, "   ").unwrap(), None);
    }

    #[test]
    fn test_wrong_field_count_is_error() {
        let path = Path::new("rels.txt");
        let err = parse_relation_line(path, 3, "10\t20").unwrap_err();
        assert!(matches!(err, IngestError::MalformedRelation { line: 3, found: 2, .. }));

        let err = parse_relation_line(path, 4, "10\t20\tx\ty").unwrap_err();
        assert!(matches!(err, IngestError::MalformedRelation { line: 4, found: 4, .. }));
    }

    #[test]
    fn test_read_relations_strips_line_endings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rels.txt");
        fs::write(&path, "1\t2\ta\r\n3\t4\tb\n\n5\t6\tc").unwrap();

        let records = read_relations(&path).unwrap();
        assert_eq!(
            records,
            vec![
                RawRelation::new("1", "2", "a"),
                RawRelation::new("3", "4", "b"),
                RawRelation::new("5", "6", "c"),
            ]
        );
    }

    #[test]
    fn test_read_relations_fails_on_malformed_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rels.txt");
        fs::write(&path, "1\t2\ta\n3 4 b\n").unwrap();

        let err = read_relations(&path).unwrap_err();
        assert!(matches!(err, IngestError::MalformedRelation { line: 2, found: 1, .. }));
    }

    #[test]
    fn test_read_relations_rejects_invalid_utf8() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rels.txt");
        fs::write(&path, b"1\t2\ta\n3\t4\t\xff\xfe\n").unwrap();

        let err = read_relations(&path).unwrap_err();
        assert!(matches!(err, IngestError::InvalidEncoding { line: 2, .. }));
    }

    #[test]
    fn test_read_relations_missing_file() {
        let err = read_relations(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, IngestError::Io { .. }));
    }
}
