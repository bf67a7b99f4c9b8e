use super::row::Row;
use super::schema::{Column, Schema};
use super::value::{Value, ValueType};

use crate::error::{Error, Result};

use std::fmt::Display;

/// A named [`Schema`] plus the rows that follow it.
///
/// The schema is fixed for the lifetime of the table. Row positions are not
/// stable: erasing a row shifts every later row down by one, so callers must
/// re-resolve indices after an erase.
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    schema: Schema,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(name: impl Into<String>, schema: Schema) -> Table {
        //! Create an empty table. The schema is taken as is, an empty schema
        //! or repeated column names are accepted.

        Table {
            name: name.into(),
            schema,
            rows: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn columns(&self) -> &[Column] {
        self.schema.columns()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Result<&Row> {
        self.rows.get(index).ok_or(Error::IndexOutOfRange {
            kind: "row",
            index,
            len: self.rows.len(),
        })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index_by_name(&self, name: &str) -> Result<usize> {
        self.schema
            .position(name)
            .ok_or_else(|| Error::UnknownColumn {
                table: self.name.clone(),
                column: name.to_string(),
            })
    }

    pub fn column_type(&self, index: usize) -> Result<ValueType> {
        self.column(index).map(Column::value_type)
    }

    pub fn column_name(&self, index: usize) -> Result<&str> {
        self.column(index).map(Column::name)
    }

    fn column(&self, index: usize) -> Result<&Column> {
        self.schema.get(index).ok_or(Error::IndexOutOfRange {
            kind: "column",
            index,
            len: self.schema.len(),
        })
    }

    pub fn append(&mut self, cells: Vec<Value>) -> Result<()> {
        //! Append a row after checking its length and every cell's type
        //! against the schema. A rejected row leaves the table untouched.

        let row = Row::new(cells, &self.schema)?;
        self.rows.push(row);
        Ok(())
    }

    pub fn erase(&mut self, index: usize) -> Result<Row> {
        //! Remove the row at `index`, shifting later rows down by one.
        //!
        //! Returns the removed [`Row`].

        if index >= self.rows.len() {
            return Err(Error::IndexOutOfRange {
                kind: "row",
                index,
                len: self.rows.len(),
            });
        }

        Ok(self.rows.remove(index))
    }

    pub fn update_cell(&mut self, row_index: usize, column_index: usize, value: Value) -> Result<()> {
        //! Replace exactly one cell. The value must carry the column's
        //! declared type.

        let len = self.rows.len();
        let row = self.rows.get_mut(row_index).ok_or(Error::IndexOutOfRange {
            kind: "row",
            index: row_index,
            len,
        })?;

        row.set_cell(column_index, value, &self.schema)
    }

    pub(crate) fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&Row) -> bool,
    {
        //! Drop every row for which `keep` is false, in one pass and keeping
        //! the order of the survivors.
        //!
        //! Returns the number of rows removed.

        let before = self.rows.len();
        self.rows.retain(|row| keep(row));
        before - self.rows.len()
    }
}

impl Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rows: Vec<String> = self.rows.iter().map(|row| format!("{}", row)).collect();

        writeln!(f, "{}\n{}", self.schema, rows.join("\n"))
    }
}
