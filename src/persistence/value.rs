use std::cmp::Ordering;
use std::fmt::Display;

use serde::Serialize;

/// The declared type of a column, and the type tag of a [`Value`].
///
/// Declaration order matters: it is the primary key of [`Value`]'s ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Integer,
    Decimal,
    Text,
}

impl ValueType {
    pub fn from_name(name: &str) -> Option<ValueType> {
        //! Resolve the type names used by `create_table`.

        match name {
            "integer" => Some(ValueType::Integer),
            "decimal" => Some(ValueType::Decimal),
            "string" => Some(ValueType::Text),
            _ => None,
        }
    }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let datatype = match self {
            ValueType::Integer => "INT",
            ValueType::Decimal => "DEC",
            ValueType::Text => "TXT",
        };
        write!(f, "{}", datatype)
    }
}

/// A single cell, filter operand or histogram key.
///
/// There is no coercion between variants: `Integer(1)` and `Decimal(1.0)` are
/// different values. Values order by type tag first (`Integer < Decimal <
/// Text`), then by payload.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Decimal(f64),
    Text(String),
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Integer(_) => ValueType::Integer,
            Value::Decimal(_) => ValueType::Decimal,
            Value::Text(_) => ValueType::Text,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
            // adding 0.0 folds -0.0 into 0.0; total_cmp orders NaN
            (Value::Decimal(a), Value::Decimal(b)) => (a + 0.0).total_cmp(&(b + 0.0)),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            _ => self.value_type().cmp(&other.value_type()),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer(value) => write!(f, "{}", value),
            Value::Decimal(value) => write!(f, "{}", value),
            Value::Text(value) => write!(f, "{}", value),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Decimal(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}
