use std::fmt::Display;

use crate::error::{Error, Result};
use crate::persistence::value::{Value, ValueType};

/// A named, typed column. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    value_type: ValueType,
}

impl Column {
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Column {
        Column {
            name: name.into(),
            value_type,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }
}

/// The ordered column list that gives a table its shape.
///
/// A column's position is its identity for storage; its name is only a
/// lookup key. Names are not checked for uniqueness, lookups return the
/// first match.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema(Vec<Column>);

impl Schema {
    pub fn new(columns: Vec<Column>) -> Schema {
        Schema(columns)
    }

    pub fn columns(&self) -> &[Column] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<&Column> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        //! Linear scan in declaration order, first match wins.

        self.0.iter().position(|column| column.name == name)
    }

    pub(crate) fn check_cells(&self, cells: &[Value]) -> Result<()> {
        //! Verify a full row of cells against this schema, position by
        //! position.

        if cells.len() != self.0.len() {
            return Err(Error::SchemaMismatch(format!(
                "expected {} cells, found {}",
                self.0.len(),
                cells.len()
            )));
        }

        for (column, cell) in self.0.iter().zip(cells) {
            if cell.value_type() != column.value_type {
                return Err(Error::SchemaMismatch(format!(
                    "column '{}' expects {}, found {} '{}'",
                    column.name,
                    column.value_type,
                    cell.value_type(),
                    cell
                )));
            }
        }

        Ok(())
    }

    pub(crate) fn check_cell(&self, index: usize, value: &Value) -> Result<()> {
        //! Verify a single value against the column at `index`.

        let column = self.0.get(index).ok_or(Error::IndexOutOfRange {
            kind: "column",
            index,
            len: self.0.len(),
        })?;

        if value.value_type() != column.value_type {
            return Err(Error::TypeMismatch {
                column: column.name.clone(),
                expected: column.value_type,
                found: value.value_type(),
            });
        }

        Ok(())
    }
}

impl FromIterator<Column> for Schema {
    fn from_iter<I: IntoIterator<Item = Column>>(iter: I) -> Self {
        Schema(iter.into_iter().collect())
    }
}

impl Display for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let schema: Vec<String> = self
            .0
            .iter()
            .map(|column| format!("{} ({})", column.name, column.value_type))
            .collect();
        write!(f, "{}", schema.join(" | "))
    }
}
