//! The in-memory store is made of the following components
//! - Value (a typed cell: integer, decimal or text, ordered by type then payload)
//! - Schema (ordered column names and their declared types, fixed per table)
//! - Row (cells that must always agree with the owning table's schema)
//! - Table (a schema and its rows, addressed by position)
//! - RowFilter (exact-match constraints, bound to a table before use)
//! - Database (tables by name, plus the bulk query/update/erase operations)
//!

//  All modules of this lib
mod database;
mod filter;
mod row;
mod schema;
mod table;
mod value;

//  External API
pub use database::{Database, Histogram};
pub use filter::{BoundRowFilter, RowFilter};
pub use row::Row;
pub use schema::{Column, Schema};
pub use table::Table;
pub use value::{Value, ValueType};
