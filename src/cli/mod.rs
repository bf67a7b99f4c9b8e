use std::io::{self, BufRead, Write};

use colored::Colorize;
use log::{debug, error};

use crate::{
    cli::{
        colors::MINIDB_TEAL,
        commands::{COMMANDS, CommandExecutor},
        messages::{highlight_argument, system_message},
        parsers::{CliParser, OutputFormat},
    },
    error::Error,
    sessions::session::Session,
};

mod colors;
pub mod command_parser;
pub mod commands;
pub mod logger;
mod messages;
pub mod parsers;
mod splash_screen;

pub use command_parser::{Argument, Primitive, parse_command};
pub use commands::CommandResult;

const DEFAULT_LAST_COMMAND_DELIMITER: &str = "!";

const MINIDB_SESSION_COMMANDS_LIST: [(&str, &str); 4] = [
    ("!", "execute the last command, add more to go further back"),
    ("help", "list all available commands"),
    ("history", "list command history for this session"),
    ("exit", "leave the session; all tables are discarded"),
];

pub fn run_client(config: &CliParser) {
    if !config.quiet {
        splash_screen::splash_screen();
    }

    let mut session = Session::client(config.history_limit);

    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(error) = start_repl(&mut session, config.output, stdin.lock(), stdout.lock()) {
        error!("terminal i/o failed: {}", error);
    }
}

pub fn show_help<W: Write>(output: &mut W) -> io::Result<()> {
    writeln!(
        output,
        "{}",
        system_message(
            "info",
            format!(
                "Filters and changes are written as {}.",
                highlight_argument("{column=value,...}")
            )
        )
    )?;

    writeln!(output)?;
    writeln!(output, "{:24} {}", "COMMAND".color(MINIDB_TEAL), "USAGE")?;
    for (command, usage, _) in COMMANDS.iter() {
        writeln!(output, "{:24} {}", command.color(MINIDB_TEAL), usage)?;
    }
    for (command, details) in MINIDB_SESSION_COMMANDS_LIST {
        writeln!(output, "{:24} {}", command.color(MINIDB_TEAL), details)?;
    }

    Ok(())
}

fn render_error(error: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => system_message("error", error.to_string()),
        OutputFormat::Json => serde_json::json!({ "error": error.to_string() }).to_string(),
    }
}

pub fn start_repl<R: BufRead, W: Write>(
    session: &mut Session,
    format: OutputFormat,
    mut input: R,
    mut output: W,
) -> io::Result<()> {
    //! Read command lines from `input` until `exit` or end of input, and
    //! write every result or error to `output`.

    writeln!(
        output,
        "{}",
        system_message(
            "system",
            format!(
                "Use '{}' to quit and '{}' to know all commands available.",
                highlight_argument("exit"),
                highlight_argument("help"),
            ),
        )
    )?;

    writeln!(
        output,
        "{}",
        system_message(
            "system",
            format!(
                "New session initiated at '{}'.",
                highlight_argument(&session.start_time_string())
            ),
        )
    )?;

    loop {
        writeln!(output)?;
        write!(output, "{:6} > ", "minidb".color(MINIDB_TEAL).bold())?;
        output.flush()?;

        let mut buffer = String::new();
        if input.read_line(&mut buffer)? == 0 {
            break;
        }

        let mut line = buffer.trim().to_string();
        if line.is_empty() {
            continue;
        }

        if line.starts_with(DEFAULT_LAST_COMMAND_DELIMITER) {
            let last = line.matches(DEFAULT_LAST_COMMAND_DELIMITER).count();

            match session.get_last_command(last) {
                Some(last_command) => line = last_command.to_string(),
                None => {
                    writeln!(
                        output,
                        "{}",
                        system_message(
                            "system",
                            format!(
                                "No command {} steps back.",
                                highlight_argument(&last.to_string())
                            ),
                        )
                    )?;
                    continue;
                }
            }
        }

        session.add_to_command_history(&line);

        match line.as_str() {
            "history" => {
                for entry in session.command_history_lines(None) {
                    writeln!(output, "{}", entry)?;
                }
            }
            "help" => show_help(&mut output)?,
            "exit" => break,
            command_line => {
                let mut executor = CommandExecutor::new(session.database_mut());
                match executor.execute(command_line) {
                    Ok(result) => writeln!(output, "{}", result.render(format))?,
                    Err(error) => {
                        debug!("command failed: {:?}", error);
                        writeln!(output, "{}", render_error(&error, format))?;
                    }
                }
            }
        }
    }

    writeln!(output, "Goodbye!")
}
