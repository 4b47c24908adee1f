//! Fixed-arity positional record.

use crate::error::RecordError;
use crate::value::Value;

/// An ordered, fixed-arity tuple of values.
///
/// The arity is fixed at construction; fields are addressed by position and
/// aligned to whatever column list the surrounding pipeline stage carries.
/// Unset fields hold [`Value::Null`].
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    values: Vec<Value>,
}

impl Record {
    /// Create a record of the given arity with all fields set to null.
    pub fn new(arity: usize) -> Self {
        Self {
            values: vec![Value::Null; arity],
        }
    }

    /// Create a record from an existing value list; the arity is the list length.
    pub fn from_values(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// The record's arity.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true for a zero-arity record.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get the value at `index`, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Set the value at `index`.
    pub fn set(&mut self, index: usize, value: Value) -> Result<(), RecordError> {
        let arity = self.values.len();
        match self.values.get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(RecordError::IndexOutOfBounds { index, arity }),
        }
    }

    /// Borrow all values in positional order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Consume the record, yielding its values in positional order.
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

impl From<Vec<Value>> for Record {
    fn from(values: Vec<Value>) -> Self {
        Self::from_values(values)
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
