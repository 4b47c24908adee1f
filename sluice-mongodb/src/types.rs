//! Type conversions between record values and BSON.

use bson::{Bson, Document};
use sluice_record::Value;

/// Convert a record value to BSON.
pub fn value_to_bson(value: &Value) -> Bson {
    match value {
        Value::Null => Bson::Null,
        Value::Bool(b) => Bson::Boolean(*b),
        Value::Int(i) => Bson::Int64(*i),
        Value::Float(f) => Bson::Double(*f),
        Value::String(s) => Bson::String(s.clone()),
        Value::Bytes(bytes) => Bson::Binary(bson::Binary {
            subtype: bson::spec::BinarySubtype::Generic,
            bytes: bytes.clone(),
        }),
        Value::DateTime(dt) => Bson::DateTime(bson::DateTime::from_chrono(*dt)),
        Value::Array(items) => Bson::Array(items.iter().map(value_to_bson).collect()),
        Value::Map(entries) => {
            let mut doc = Document::new();
            for (key, value) in entries {
                doc.insert(key.clone(), value_to_bson(value));
            }
            Bson::Document(doc)
        }
    }
}

/// Convert BSON to a record value.
///
/// Total conversion: BSON types without a record counterpart fall back to
/// their string rendering rather than failing, so a single odd field never
/// poisons a whole batch.
pub fn bson_to_value(bson: &Bson) -> Value {
    match bson {
        Bson::Null | Bson::Undefined => Value::Null,
        Bson::Boolean(b) => Value::Bool(*b),
        Bson::Int32(i) => Value::Int(i64::from(*i)),
        Bson::Int64(i) => Value::Int(*i),
        Bson::Double(f) => Value::Float(*f),
        Bson::String(s) => Value::String(s.clone()),
        Bson::Binary(binary) => Value::Bytes(binary.bytes.clone()),
        Bson::DateTime(dt) => Value::DateTime(dt.to_chrono()),
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::Array(items) => Value::Array(items.iter().map(bson_to_value).collect()),
        Bson::Document(doc) => Value::Map(
            doc.iter()
                .map(|(key, value)| (key.clone(), bson_to_value(value)))
                .collect(),
        ),
        other => Value::String(other.to_string()),
    }
}
