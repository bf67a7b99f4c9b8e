//! This module is where all the commands are stored.
//!
//! Once the user is inside the REPL, every line is parsed by
//! [`super::command_parser::parse_command`] and handed to the matching
//! handler in [`COMMANDS`]. The syntax of each command:
//!
//! - create_table <table> {<column>=<integer|decimal|string>,...}
//! - drop_table <table>
//! - append_row <table> [<value>,...]
//! - update_rows <table> {<filter>} {<column>=<value>,...}
//! - update_cell <table> <row index> <column index> <value>
//! - query_table <table> {<filter>}?
//! - query_column_histogram <table> <column> {<filter>}?
//! - erase_row <table> <row index>
//! - erase_rows <table> {<filter>}
//! - list_tables
//!
//! A filter is a key-value list of `column=value` pairs; a row matches when
//! every named cell equals its value exactly.

use std::fmt::Display;

use indexmap::IndexMap;
use log::debug;
use serde::Serialize;

use crate::cli::command_parser::{Argument, Primitive, parse_command};
use crate::cli::parsers::OutputFormat;
use crate::error::{Error, Result};
use crate::persistence::{Column, Database, Row, RowFilter, Schema, Value, ValueType};

pub type CommandHandler = fn(&mut Database, Vec<Argument>) -> Result<CommandResult>;

/// Name, usage line and handler of every command the executor knows.
///
/// To add a command, add another entry.
pub const COMMANDS: [(&str, &str, CommandHandler); 10] = [
    (
        "create_table",
        "create_table <table> {<column>=<integer|decimal|string>,...}",
        execute_create_table,
    ),
    ("drop_table", "drop_table <table>", execute_drop_table),
    (
        "append_row",
        "append_row <table> [<value>,...]",
        execute_append_row,
    ),
    (
        "update_rows",
        "update_rows <table> {<filter>} {<column>=<value>,...}",
        execute_update_rows,
    ),
    (
        "update_cell",
        "update_cell <table> <row index> <column index> <value>",
        execute_update_cell,
    ),
    (
        "query_table",
        "query_table <table> [{<filter>}]",
        execute_query_table,
    ),
    (
        "query_column_histogram",
        "query_column_histogram <table> <column> [{<filter>}]",
        execute_query_column_histogram,
    ),
    (
        "erase_row",
        "erase_row <table> <row index>",
        execute_erase_row,
    ),
    (
        "erase_rows",
        "erase_rows <table> {<filter>}",
        execute_erase_rows,
    ),
    ("list_tables", "list_tables", execute_list_tables),
];

/// The executor that runs command lines against a [`Database`].
///
/// It owns nothing but the borrow of the database; every call parses one
/// line, looks the command up in [`COMMANDS`] and runs it to completion.
pub struct CommandExecutor<'db> {
    database: &'db mut Database,
}

/// What a command hands back to be displayed on the terminal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandResult {
    Message(String),
    Rows {
        columns: Vec<String>,
        rows: Vec<Row>,
    },
    Histogram {
        column: String,
        entries: Vec<(Value, usize)>,
    },
    Tables(Vec<String>),
}

impl<'db> CommandExecutor<'db> {
    pub fn new(database: &'db mut Database) -> CommandExecutor<'db> {
        CommandExecutor { database }
    }

    pub fn execute(&mut self, line: &str) -> Result<CommandResult> {
        let (command, arguments) = parse_command(line)?;
        debug!(
            "running '{}' with {} argument(s)",
            command,
            arguments.len()
        );

        let handler = COMMANDS
            .iter()
            .find(|(name, _, _)| *name == command)
            .map(|(_, _, handler)| *handler)
            .ok_or(Error::UnknownCommand(command.clone()))?;

        handler(&mut *self.database, arguments)
    }
}

impl CommandResult {
    pub fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => self.to_string(),
            OutputFormat::Json => match serde_json::to_string(self) {
                Ok(json) => json,
                Err(error) => serde_json::json!({ "error": error.to_string() }).to_string(),
            },
        }
    }
}

impl Display for CommandResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Message(message) => write!(f, "{}", message),
            Self::Rows { columns, rows } => {
                write!(f, "{}", columns.join(" | "))?;
                for row in rows {
                    write!(f, "\n{}", row)?;
                }
                Ok(())
            }
            Self::Histogram { column, entries } => {
                write!(f, "{} | count", column)?;
                for (value, count) in entries {
                    write!(f, "\n{} {}", value, count)?;
                }
                Ok(())
            }
            Self::Tables(names) => write!(f, "{}", names.join("\n")),
        }
    }
}

fn arguments_exactly<const N: usize>(command: &str, arguments: Vec<Argument>) -> Result<[Argument; N]> {
    let count = arguments.len();
    arguments.try_into().map_err(|_| {
        Error::InvalidArgument(format!(
            "{} expects {} argument(s), got {}",
            command, N, count
        ))
    })
}

fn text_argument(argument: Argument, what: &str) -> Result<String> {
    match argument {
        Argument::Text(text) => Ok(text),
        other => Err(Error::InvalidArgument(format!(
            "expected text for {}, got {}",
            what,
            other.kind()
        ))),
    }
}

fn index_argument(argument: Argument, what: &str) -> Result<usize> {
    match argument {
        Argument::Integer(index) => usize::try_from(index).map_err(|_| {
            Error::InvalidArgument(format!("{} must not be negative, got {}", what, index))
        }),
        other => Err(Error::InvalidArgument(format!(
            "expected integer for {}, got {}",
            what,
            other.kind()
        ))),
    }
}

fn primitive_argument(argument: Argument, what: &str) -> Result<Primitive> {
    let kind = argument.kind();
    argument.into_primitive().ok_or_else(|| {
        Error::InvalidArgument(format!("expected a single value for {}, got {}", what, kind))
    })
}

fn list_argument(argument: Argument, what: &str) -> Result<Vec<Primitive>> {
    match argument {
        Argument::List(items) => Ok(items),
        other => Err(Error::InvalidArgument(format!(
            "expected list for {}, got {}",
            what,
            other.kind()
        ))),
    }
}

fn key_value_argument(argument: Argument, what: &str) -> Result<Vec<(String, Primitive)>> {
    match argument {
        Argument::KeyValueList(pairs) => Ok(pairs),
        other => Err(Error::InvalidArgument(format!(
            "expected key-value list for {}, got {}",
            what,
            other.kind()
        ))),
    }
}

fn filter_argument(argument: Argument) -> Result<RowFilter> {
    Ok(key_value_argument(argument, "filter")?.into_iter().collect())
}

fn execute_create_table(database: &mut Database, arguments: Vec<Argument>) -> Result<CommandResult> {
    let [name, columns] = arguments_exactly::<2>("create_table", arguments)?;
    let name = text_argument(name, "table name")?;

    let schema = key_value_argument(columns, "columns")?
        .into_iter()
        .map(|(column, type_name)| match &type_name {
            Value::Text(type_name) => ValueType::from_name(type_name)
                .map(|value_type| Column::new(column.as_str(), value_type))
                .ok_or_else(|| {
                    Error::InvalidArgument(format!(
                        "unknown type '{}' for column '{}'; use integer, decimal or string",
                        type_name, column
                    ))
                }),
            other => Err(Error::InvalidArgument(format!(
                "unknown type '{}' for column '{}'; use integer, decimal or string",
                other, column
            ))),
        })
        .collect::<Result<Schema>>()?;

    let n_columns = schema.len();
    database.create_table(&name, schema)?;

    Ok(CommandResult::Message(format!(
        "table '{}' created with {} column(s)",
        name, n_columns
    )))
}

fn execute_drop_table(database: &mut Database, arguments: Vec<Argument>) -> Result<CommandResult> {
    let [name] = arguments_exactly::<1>("drop_table", arguments)?;
    let name = text_argument(name, "table name")?;

    database.drop_table(&name)?;

    Ok(CommandResult::Message(format!("table '{}' dropped", name)))
}

fn execute_append_row(database: &mut Database, arguments: Vec<Argument>) -> Result<CommandResult> {
    let [name, cells] = arguments_exactly::<2>("append_row", arguments)?;
    let name = text_argument(name, "table name")?;

    database.append_row(&name, list_argument(cells, "row values")?)?;

    Ok(CommandResult::Message(format!("1 row appended to '{}'", name)))
}

fn execute_update_rows(database: &mut Database, arguments: Vec<Argument>) -> Result<CommandResult> {
    let [name, filter, changes_argument] = arguments_exactly::<3>("update_rows", arguments)?;
    let name = text_argument(name, "table name")?;
    let filter = filter_argument(filter)?;
    let mut changes: IndexMap<String, Value> = IndexMap::new();
    for (column, value) in key_value_argument(changes_argument, "changes")? {
        // a repeated column keeps its first value
        changes.entry(column).or_insert(value);
    }

    let n_updated = database.update_rows(&name, &filter, &changes)?;

    Ok(CommandResult::Message(format!("{} row(s) updated", n_updated)))
}

fn execute_update_cell(database: &mut Database, arguments: Vec<Argument>) -> Result<CommandResult> {
    let [name, row_index, column_index, value] = arguments_exactly::<4>("update_cell", arguments)?;
    let name = text_argument(name, "table name")?;
    let row_index = index_argument(row_index, "row index")?;
    let column_index = index_argument(column_index, "column index")?;

    database.update_cell(
        &name,
        row_index,
        column_index,
        primitive_argument(value, "new value")?,
    )?;

    Ok(CommandResult::Message("1 cell updated".to_string()))
}

fn execute_query_table(database: &mut Database, arguments: Vec<Argument>) -> Result<CommandResult> {
    let (name, filter) = match arguments.len() {
        1 => {
            let [name] = arguments_exactly::<1>("query_table", arguments)?;
            (name, None)
        }
        _ => {
            let [name, filter] = arguments_exactly::<2>("query_table", arguments)?;
            (name, Some(filter_argument(filter)?))
        }
    };
    let name = text_argument(name, "table name")?;

    let mut rows = Vec::new();
    database.query_table(&name, filter.as_ref(), |row| rows.push(row.clone()))?;

    let columns = database
        .lookup_table(&name)?
        .columns()
        .iter()
        .map(|column| column.name().to_string())
        .collect();

    Ok(CommandResult::Rows { columns, rows })
}

fn execute_query_column_histogram(
    database: &mut Database,
    arguments: Vec<Argument>,
) -> Result<CommandResult> {
    let (name, column, filter) = match arguments.len() {
        2 => {
            let [name, column] = arguments_exactly::<2>("query_column_histogram", arguments)?;
            (name, column, None)
        }
        _ => {
            let [name, column, filter] = arguments_exactly::<3>("query_column_histogram", arguments)?;
            (name, column, Some(filter_argument(filter)?))
        }
    };
    let name = text_argument(name, "table name")?;
    let column = text_argument(column, "column name")?;

    let entries = database
        .query_column_histogram(&name, &column, filter.as_ref())?
        .into_iter()
        .collect();

    Ok(CommandResult::Histogram { column, entries })
}

fn execute_erase_row(database: &mut Database, arguments: Vec<Argument>) -> Result<CommandResult> {
    let [name, row_index] = arguments_exactly::<2>("erase_row", arguments)?;
    let name = text_argument(name, "table name")?;
    let row_index = index_argument(row_index, "row index")?;

    database.erase_row(&name, row_index)?;

    Ok(CommandResult::Message(format!("row {} erased", row_index)))
}

fn execute_erase_rows(database: &mut Database, arguments: Vec<Argument>) -> Result<CommandResult> {
    let [name, filter] = arguments_exactly::<2>("erase_rows", arguments)?;
    let name = text_argument(name, "table name")?;

    let n_erased = database.erase_rows(&name, &filter_argument(filter)?)?;

    Ok(CommandResult::Message(format!("{} row(s) erased", n_erased)))
}

fn execute_list_tables(database: &mut Database, arguments: Vec<Argument>) -> Result<CommandResult> {
    arguments_exactly::<0>("list_tables", arguments)?;

    Ok(CommandResult::Tables(database.table_names()))
}
