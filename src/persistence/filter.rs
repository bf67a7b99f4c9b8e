//! Exact-match row filters.
//!
//! A [`RowFilter`] is built from column names alone and knows nothing about
//! any table. Before it can test rows it has to be bound to one with
//! [`RowFilter::bind`], which resolves every name to a column position once
//! and yields a [`BoundRowFilter`]. Only the bound form can be evaluated.

use indexmap::IndexMap;

use crate::error::Result;
use crate::persistence::row::Row;
use crate::persistence::table::Table;
use crate::persistence::value::Value;

/// A conjunction of `column = value` constraints.
///
/// At most one constraint per column: naming a column again is ignored and
/// the first value stays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowFilter {
    constraints: IndexMap<String, Value>,
}

/// A [`RowFilter`] whose column names have been resolved against a table.
#[derive(Debug)]
pub struct BoundRowFilter<'f> {
    constraints: Vec<(usize, &'f Value)>,
}

impl RowFilter {
    pub fn new() -> RowFilter {
        RowFilter::default()
    }

    pub fn with(mut self, column: impl Into<String>, expected: impl Into<Value>) -> RowFilter {
        self.constraints
            .entry(column.into())
            .or_insert_with(|| expected.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn bind(&self, table: &Table) -> Result<BoundRowFilter<'_>> {
        //! Resolve every constraint's column name in `table`.
        //!
        //! The first unknown name aborts the whole bind with
        //! [`crate::Error::UnknownColumn`].

        let constraints = self
            .constraints
            .iter()
            .map(|(name, expected)| Ok((table.column_index_by_name(name)?, expected)))
            .collect::<Result<Vec<_>>>()?;

        Ok(BoundRowFilter { constraints })
    }
}

impl<K, V> FromIterator<(K, V)> for RowFilter
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(RowFilter::new(), |filter, (column, expected)| {
                filter.with(column, expected)
            })
    }
}

impl BoundRowFilter<'_> {
    pub fn matches(&self, row: &Row) -> bool {
        //! True iff every constraint's cell equals its expected value
        //! exactly. No constraints matches every row.

        self.constraints
            .iter()
            .all(|(index, expected)| row.cells().get(*index) == Some(*expected))
    }
}
