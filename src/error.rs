//! Error handling for the engine.
//!
//! Every failure the engine can report is a variant of [`Error`]. Nothing in
//! [`crate::persistence`] or the command parser prints or logs; errors travel
//! back to the caller through [`Result`] and the command layer renders them.

use std::fmt;
use std::result;

use crate::persistence::ValueType;

/// A specialized `Result` type for engine operations.
pub type Result<T> = result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Malformed command text. `context` is the input that was left when the
    /// parser gave up, empty if the input ran out.
    Syntax { message: String, context: String },

    TableAlreadyExists(String),

    TableNotFound(String),

    /// A filter, update or histogram named a column the table does not have.
    UnknownColumn { table: String, column: String },

    /// Row or column position out of bounds.
    IndexOutOfRange { kind: &'static str, index: usize, len: usize },

    /// A value was assigned to a cell whose column declares another type.
    TypeMismatch {
        column: String,
        expected: ValueType,
        found: ValueType,
    },

    /// A row's cells do not line up with the table's columns.
    SchemaMismatch(String),

    UnknownCommand(String),

    /// A command was given the wrong number or shape of arguments.
    InvalidArgument(String),
}

impl Error {
    pub(crate) fn syntax(message: impl Into<String>, context: &str) -> Error {
        Error::Syntax {
            message: message.into(),
            context: context.to_string(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Syntax { message, context } if context.is_empty() => {
                write!(f, "syntax error: {}", message)
            }
            Error::Syntax { message, context } => {
                write!(f, "syntax error: {} near '{}'", message, context)
            }
            Error::TableAlreadyExists(name) => write!(f, "table '{}' already exists", name),
            Error::TableNotFound(name) => write!(f, "table '{}' does not exist", name),
            Error::UnknownColumn { table, column } => {
                write!(f, "table '{}' has no column '{}'", table, column)
            }
            Error::IndexOutOfRange { kind, index, len } => {
                write!(f, "{} index {} out of range; length is {}", kind, index, len)
            }
            Error::TypeMismatch {
                column,
                expected,
                found,
            } => write!(
                f,
                "invalid value for column '{}': expected {}, found {}",
                column, expected, found
            ),
            Error::SchemaMismatch(detail) => write!(f, "row does not match schema: {}", detail),
            Error::UnknownCommand(name) => {
                write!(f, "unknown command '{}'; try 'help'", name)
            }
            Error::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
