//! Line formatting shared by the REPL, error output and the logger, so
//! every line the CLI prints has the same `[source] message` shape.

use colored::Colorize;

use crate::cli::colors::MINIDB_TEAL;

pub fn highlight_argument(argument: &str) -> String {
    //! Table names, command names and similar in the theme color.

    format!("{}", argument.color(MINIDB_TEAL))
}

pub fn system_message(source_name: &str, message: String) -> String {
    //! Prefix `message` with a padded, colored `[source]` tag such as
    //! `[system]`, `[error ]` or `[debug ]`.

    let source_formatted = format!("{:6}", source_name.color(MINIDB_TEAL).bold());

    format!("[{}] {}", source_formatted, message)
}
