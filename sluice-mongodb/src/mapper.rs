//! Bidirectional mapping between BSON documents and flat records.
//!
//! The read path flattens a document into a record aligned to the caller's
//! column list, resolving dotted column names as nested lookups. The write
//! path rebuilds a document from a record, either for the full column list or
//! for a restricted update-column subset.

use bson::Document;
use sluice_record::{Record, Value};

use crate::error::{MongoError, MongoResult};
use crate::types::{bson_to_value, value_to_bson};

/// Separator splitting a column name into nested lookup segments.
pub const PATH_SEPARATOR: char = '.';

/// Dotted-notation decomposition of a column name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Split a column name on [`PATH_SEPARATOR`].
    ///
    /// Always succeeds; a name without separator yields a single segment.
    pub fn parse(column: &str) -> Self {
        Self {
            segments: column.split(PATH_SEPARATOR).map(str::to_string).collect(),
        }
    }

    /// The lookup segments in order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Whether this path addresses a nested field.
    pub fn is_nested(&self) -> bool {
        self.segments.len() > 1
    }
}

/// Flatten a document into a record aligned to `columns`.
///
/// Missing fields yield [`Value::Null`]; flattening never fails. The result
/// has exactly one value per column, in column order.
pub fn document_to_record(doc: &Document, columns: &[String]) -> Record {
    let values = columns
        .iter()
        .map(|column| {
            let path = FieldPath::parse(column);
            if path.is_nested() {
                lookup_path(doc, &path)
            } else {
                doc.get(column).map(bson_to_value).unwrap_or(Value::Null)
            }
        })
        .collect();

    Record::from_values(values)
}

/// Walk a nested path through the document.
///
/// All but the last segment descend into sub-documents; descent stops early
/// at the first absent or non-document segment, leaving the cursor at the
/// last resolved level. The final segment is then read off that cursor.
fn lookup_path(doc: &Document, path: &FieldPath) -> Value {
    let segments = path.segments();

    let mut current = doc;
    for segment in &segments[..segments.len() - 1] {
        match current.get_document(segment) {
            Ok(nested) => current = nested,
            Err(_) => break,
        }
    }

    let leaf = &segments[segments.len() - 1];
    current.get(leaf).map(bson_to_value).unwrap_or(Value::Null)
}

/// Rebuild a document from a record.
///
/// With no `update_columns`, the document maps `columns[i]` to the record's
/// i-th value. With a non-empty `update_columns`, only those columns are
/// written, taking values from the *start* of the record: `update_columns[i]`
/// maps to the record's i-th value, not to the column's position in
/// `columns`. Partial-update callers are expected to pack the record
/// accordingly (behavior retained from the original connector).
///
/// Fails when the column list being written is longer than the record's
/// arity; the error is scoped to this record and leaves the rest of a batch
/// untouched.
pub fn record_to_document(
    record: &Record,
    columns: &[String],
    update_columns: Option<&[String]>,
) -> MongoResult<Document> {
    let selected = match update_columns {
        Some(update) if !update.is_empty() => update,
        _ => columns,
    };

    if selected.len() > record.len() {
        return Err(MongoError::record_conversion(format!(
            "{} columns to write but record has arity {}",
            selected.len(),
            record.len()
        )));
    }

    let mut doc = Document::new();
    for (column, value) in selected.iter().zip(record.values()) {
        doc.insert(column.clone(), value_to_bson(value));
    }

    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use pretty_assertions::assert_eq;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn test_field_path_parse() {
        let path = FieldPath::parse("a.b.c");
        assert_eq!(path.segments(), &["a", "b", "c"]);
        assert!(path.is_nested());

        let path = FieldPath::parse("name");
        assert_eq!(path.segments(), &["name"]);
        assert!(!path.is_nested());
    }

    #[test]
    fn test_top_level_fields() {
        let doc = doc! { "x": 1i64, "y": "two" };
        let record = document_to_record(&doc, &columns(&["x", "y", "z"]));

        assert_eq!(
            record.values(),
            &[
                Value::Int(1),
                Value::String("two".to_string()),
                Value::Null,
            ]
        );
    }

    #[test]
    fn test_nested_lookup_hit() {
        let doc = doc! { "a": { "b": 5i64 } };
        let record = document_to_record(&doc, &columns(&["a.b"]));
        assert_eq!(record.values(), &[Value::Int(5)]);
    }

    #[test]
    fn test_nested_lookup_missing_leaf() {
        let doc = doc! { "a": { "b": 5i64 } };
        let record = document_to_record(&doc, &columns(&["a.c"]));
        assert_eq!(record.values(), &[Value::Null]);
    }

    #[test]
    fn test_nested_lookup_deep() {
        let doc = doc! { "a": { "b": { "c": true } } };
        let record = document_to_record(&doc, &columns(&["a.b.c"]));
        assert_eq!(record.values(), &[Value::Bool(true)]);
    }

    #[test]
    fn test_nested_lookup_stops_at_missing_intermediate() {
        // "m" is absent, so the cursor stays at the root and the leaf is
        // read there.
        let doc = doc! { "c": 7i64, "a": { "b": 1i64 } };
        let record = document_to_record(&doc, &columns(&["m.c"]));
        assert_eq!(record.values(), &[Value::Int(7)]);
    }

    #[test]
    fn test_nested_lookup_stops_at_scalar_intermediate() {
        // "a" exists but is not a document; descent stops, leaf read at root.
        let doc = doc! { "a": 1i64 };
        let record = document_to_record(&doc, &columns(&["a.b"]));
        assert_eq!(record.values(), &[Value::Null]);
    }

    #[test]
    fn test_full_row_document() {
        let record = Record::from_values(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        let doc = record_to_document(&record, &columns(&["x", "y", "z"]), None).unwrap();

        assert_eq!(doc, doc! { "x": 1i64, "y": 2i64, "z": 3i64 });
    }

    #[test]
    fn test_update_columns_align_from_record_start() {
        // "y" takes the record's first value, not the value at y's position
        // in the full column list.
        let record = Record::from_values(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        let update = columns(&["y"]);
        let doc =
            record_to_document(&record, &columns(&["x", "y", "z"]), Some(&update)).unwrap();

        assert_eq!(doc, doc! { "y": 1i64 });
    }

    #[test]
    fn test_empty_update_columns_writes_full_row() {
        let record = Record::from_values(vec![Value::Int(1), Value::Int(2)]);
        let update: Vec<String> = Vec::new();
        let doc = record_to_document(&record, &columns(&["x", "y"]), Some(&update)).unwrap();

        assert_eq!(doc, doc! { "x": 1i64, "y": 2i64 });
    }

    #[test]
    fn test_update_columns_longer_than_record() {
        let record = Record::from_values(vec![Value::Int(1)]);
        let update = columns(&["x", "y"]);
        let err = record_to_document(&record, &columns(&["x", "y"]), Some(&update)).unwrap_err();

        assert!(matches!(err, MongoError::RecordConversion(_)));
    }

    #[test]
    fn test_column_list_longer_than_record() {
        let record = Record::from_values(vec![Value::Int(1)]);
        let err = record_to_document(&record, &columns(&["x", "y"]), None).unwrap_err();

        assert!(matches!(err, MongoError::RecordConversion(_)));
    }

    #[test]
    fn test_flat_round_trip() {
        let cols = columns(&["id", "name", "active"]);
        let record = Record::from_values(vec![
            Value::Int(7),
            Value::String("alice".to_string()),
            Value::Bool(true),
        ]);

        let doc = record_to_document(&record, &cols, None).unwrap();
        let back = document_to_record(&doc, &cols);

        assert_eq!(back, record);
    }
}
