use std::fmt::Display;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::persistence::schema::Schema;
use crate::persistence::value::Value;

/// One record of a [`super::Table`].
///
/// A row does not hold on to its schema. The owning table passes its schema
/// in for every check, which is why rows are only built and mutated from
/// inside this module tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row(Vec<Value>);

impl Row {
    pub(super) fn new(cells: Vec<Value>, schema: &Schema) -> Result<Row> {
        schema.check_cells(&cells)?;
        Ok(Row(cells))
    }

    pub fn cells(&self) -> &[Value] {
        &self.0
    }

    pub fn cell(&self, index: usize) -> Result<&Value> {
        self.0.get(index).ok_or(Error::IndexOutOfRange {
            kind: "column",
            index,
            len: self.0.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(super) fn set_cell(&mut self, index: usize, value: Value, schema: &Schema) -> Result<()> {
        schema.check_cell(index, &value)?;
        // check_cell guarantees the index is in bounds
        self.0[index] = value;
        Ok(())
    }
}

impl Display for Row {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let row: Vec<String> = self.0.iter().map(|value| value.to_string()).collect();
        write!(f, "{}", row.join(" | "))
    }
}
