//! An in-memory table store driven by a small command language.
//!
//! - [`persistence`] is the data model: values, schemas, rows, tables,
//!   filters and the [`persistence::Database`] that ties them together.
//! - [`cli`] parses command lines into typed arguments, dispatches them to
//!   the database and runs the REPL.
//! - [`sessions`] keeps per-session state such as the command history.

pub mod cli;
pub mod error;
pub mod persistence;
pub mod sessions;

pub use error::{Error, Result};
