use std::collections::BTreeMap;

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::persistence::{Row, RowFilter, Schema, Table, Value};

/// Distinct values of one column mapped to the number of rows holding them,
/// iterated in [`Value`] order.
pub type Histogram = BTreeMap<Value, usize>;

/// The collective of multiple [`Table`] objects, keyed by name.
///
/// A [`Database`] is the smart side: it resolves tables, binds filters and
/// composes the single-row primitives of [`Table`] into bulk operations.
/// [`Table`] is the dumb side that only knows how to keep its own rows
/// consistent with its schema.
///
/// Every operation runs to completion before returning and fails fast.
/// Nothing here locks; an embedding application that shares a database
/// between threads has to wrap the whole instance in one lock.
#[derive(Debug, Default)]
pub struct Database {
    tables: IndexMap<String, Table>,
}

impl Database {
    pub fn new() -> Database {
        //! Create a new database with no tables.

        Database {
            tables: IndexMap::new(),
        }
    }

    pub fn create_table(&mut self, name: &str, schema: Schema) -> Result<()> {
        if self.tables.contains_key(name) {
            return Err(Error::TableAlreadyExists(name.to_string()));
        }

        self.tables.insert(name.to_string(), Table::new(name, schema));
        Ok(())
    }

    pub fn drop_table(&mut self, name: &str) -> Result<()> {
        //! Remove the table and every row in it.

        self.tables
            .shift_remove(name)
            .map(|_| ())
            .ok_or_else(|| Error::TableNotFound(name.to_string()))
    }

    pub fn lookup_table(&self, name: &str) -> Result<&Table> {
        self.tables
            .get(name)
            .ok_or_else(|| Error::TableNotFound(name.to_string()))
    }

    pub fn lookup_table_mut(&mut self, name: &str) -> Result<&mut Table> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| Error::TableNotFound(name.to_string()))
    }

    pub fn table_names(&self) -> Vec<String> {
        //! Names of all tables, in creation order.

        self.tables.keys().cloned().collect()
    }

    pub fn contains_table(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    pub fn append_row(&mut self, table_name: &str, cells: Vec<Value>) -> Result<()> {
        self.lookup_table_mut(table_name)?.append(cells)
    }

    pub fn erase_row(&mut self, table_name: &str, row_index: usize) -> Result<Row> {
        self.lookup_table_mut(table_name)?.erase(row_index)
    }

    pub fn erase_rows(&mut self, table_name: &str, filter: &RowFilter) -> Result<usize> {
        //! Remove every row matching `filter`.
        //!
        //! Matching is decided on the rows as they were before the call,
        //! and survivors keep their relative order.
        //!
        //! Returns the number of removed rows.

        let table = self.lookup_table_mut(table_name)?;
        let bound = filter.bind(table)?;

        Ok(table.retain(|row| !bound.matches(row)))
    }

    pub fn update_cell(
        &mut self,
        table_name: &str,
        row_index: usize,
        column_index: usize,
        value: Value,
    ) -> Result<()> {
        self.lookup_table_mut(table_name)?
            .update_cell(row_index, column_index, value)
    }

    pub fn update_rows(
        &mut self,
        table_name: &str,
        filter: &RowFilter,
        changes: &IndexMap<String, Value>,
    ) -> Result<usize> {
        //! Set the columns named in `changes` on every row matching `filter`.
        //!
        //! All changes are resolved and type checked before the first cell
        //! is written, so an invalid change leaves the table untouched.
        //!
        //! Returns the number of updated rows.

        let table = self.lookup_table_mut(table_name)?;
        let bound = filter.bind(table)?;

        let mut resolved = Vec::with_capacity(changes.len());
        for (column_name, value) in changes {
            let column_index = table.column_index_by_name(column_name)?;
            table.schema().check_cell(column_index, value)?;
            resolved.push((column_index, value));
        }

        let matching: Vec<usize> = table
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, row)| bound.matches(row))
            .map(|(index, _)| index)
            .collect();

        for &row_index in matching.iter() {
            for (column_index, value) in resolved.iter() {
                table.update_cell(row_index, *column_index, (*value).clone())?;
            }
        }

        Ok(matching.len())
    }

    pub fn query_table<F>(
        &self,
        table_name: &str,
        filter: Option<&RowFilter>,
        mut visit: F,
    ) -> Result<usize>
    where
        F: FnMut(&Row),
    {
        //! Call `visit` once for every row matching `filter`, or for every
        //! row when there is no filter, in table order.
        //!
        //! Returns the number of visited rows.

        let table = self.lookup_table(table_name)?;
        let bound = filter.map(|filter| filter.bind(table)).transpose()?;

        let mut n_visited = 0;
        for row in table.rows() {
            if bound.as_ref().is_none_or(|bound| bound.matches(row)) {
                visit(row);
                n_visited += 1;
            }
        }

        Ok(n_visited)
    }

    pub fn query_column_histogram(
        &self,
        table_name: &str,
        column_name: &str,
        filter: Option<&RowFilter>,
    ) -> Result<Histogram> {
        //! Count how many matching rows hold each distinct value of
        //! `column_name`.

        let table = self.lookup_table(table_name)?;
        let bound = filter.map(|filter| filter.bind(table)).transpose()?;
        let column_index = table.column_index_by_name(column_name)?;

        let mut histogram = Histogram::new();
        for row in table.rows() {
            if bound.as_ref().is_none_or(|bound| bound.matches(row)) {
                let key = row.cell(column_index)?;
                *histogram.entry(key.clone()).or_insert(0) += 1;
            }
        }

        Ok(histogram)
    }
}
