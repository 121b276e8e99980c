//! Structured records: values bound positionally to a shared schema.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::sync::Arc;

use crate::schema::Schema;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Slot left unfilled (e.g. a short row in a sample).
    Null,
    Text(String),
    Integer(i64),
}

impl Value {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

/// Immutable record; `values()[i]` belongs to `schema().fields()[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredRecord {
    schema: Arc<Schema>,
    values: Vec<Value>,
}

impl StructuredRecord {
    pub fn builder(schema: Arc<Schema>) -> RecordBuilder {
        let values = vec![Value::Null; schema.len()];
        RecordBuilder { schema, values }
    }

    /// Binds `tokens[i]` to field `i`. Missing trailing values stay `Null`;
    /// tokens beyond the schema are dropped.
    pub fn from_tokens(schema: Arc<Schema>, tokens: &[&str]) -> Self {
        let mut builder = Self::builder(schema);
        for (i, token) in tokens.iter().enumerate() {
            builder.set(i, *token);
        }
        builder.build()
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Value of the first field called `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.schema.index_of(name).map(|i| &self.values[i])
    }
}

/// Serializes as a JSON-style object keyed by field name, in schema order.
impl Serialize for StructuredRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (field, value) in self.schema.fields().iter().zip(&self.values) {
            map.serialize_entry(&field.name, value)?;
        }
        map.end()
    }
}

pub struct RecordBuilder {
    schema: Arc<Schema>,
    values: Vec<Value>,
}

impl RecordBuilder {
    /// Sets slot `index`; indices past the schema are ignored.
    pub fn set(&mut self, index: usize, value: impl Into<Value>) -> &mut Self {
        if let Some(slot) = self.values.get_mut(index) {
            *slot = value.into();
        }
        self
    }

    pub fn build(self) -> StructuredRecord {
        StructuredRecord {
            schema: self.schema,
            values: self.values,
        }
    }
}
