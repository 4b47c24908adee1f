//! # sluice-record
//!
//! Flat record abstraction for the Sluice data-sync pipeline.
//!
//! A [`Record`] is an ordered, fixed-arity tuple of [`Value`]s aligned
//! positionally to a caller-supplied list of column names. Connector crates
//! translate between records and their store-native representations; the
//! pipeline engine only ever sees records.
//!
//! ```rust
//! use sluice_record::{Record, Value};
//!
//! let mut record = Record::new(2);
//! record.set(0, Value::Int(42))?;
//! record.set(1, "alice".into())?;
//!
//! assert_eq!(record.get(0), Some(&Value::Int(42)));
//! # Ok::<(), sluice_record::RecordError>(())
//! ```

pub mod error;
pub mod record;
pub mod value;

pub use error::RecordError;
pub use record::Record;
pub use value::Value;
