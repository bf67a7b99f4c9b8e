//! The only point of truth for all information that is related to the
//! current user session in the engine. A session owns the database the user
//! is working on and the history of the command lines they typed.
//!
//! At the end of a session everything is discarded; nothing is written to
//! disk.

use std::{collections::VecDeque, fmt::Display, time::SystemTime};

use chrono::{DateTime, Local};

use crate::persistence::Database;

struct CommandHistory {
    command: String,
    command_time: SystemTime,
}

impl CommandHistory {
    pub fn command_time_string(&self) -> String {
        let datetime: DateTime<Local> = self.command_time.into();
        datetime.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

impl Display for CommandHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.command_time_string(), self.command)
    }
}

pub struct Session {
    command_history: VecDeque<CommandHistory>,
    history_limit: usize,
    start_time: SystemTime,
    database: Database,
}

impl Session {
    pub fn client(history_limit: usize) -> Session {
        //! Returns a new session with an empty database.

        Session {
            command_history: VecDeque::new(),
            history_limit,
            start_time: SystemTime::now(),
            database: Database::new(),
        }
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn database_mut(&mut self) -> &mut Database {
        &mut self.database
    }

    pub fn add_to_command_history(&mut self, command: &str) {
        //! Remember a command line, forgetting the oldest one once the
        //! history limit is reached.

        if self.history_limit == 0 {
            return;
        }

        while self.command_history.len() >= self.history_limit {
            self.command_history.pop_front();
        }

        self.command_history.push_back(CommandHistory {
            command: command.to_string(),
            command_time: SystemTime::now(),
        });
    }

    pub fn history_len(&self) -> usize {
        self.command_history.len()
    }

    pub fn start_time_string(&self) -> String {
        //! Convert the [`SystemTime`] object into a string representation
        //! to be more readable.

        let datetime: DateTime<Local> = self.start_time.into();
        datetime.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    pub fn command_history_lines(&self, n_prev: Option<usize>) -> Vec<String> {
        //! The most recent commands first, numbered from 1 so that line
        //! `n` is what `n` exclamation marks re-run.
        //! Use `n_prev` to limit the number of commands you see.

        let limit = n_prev.unwrap_or(self.command_history.len());

        self.command_history
            .iter()
            .rev()
            .take(limit)
            .enumerate()
            .map(|(index, command)| format!("{:3} | {}", index + 1, command))
            .collect()
    }

    pub fn get_last_command(&self, nth_back: usize) -> Option<&str> {
        //! Gets the `nth_back`th last command from the history, 1 being
        //! the most recent one.

        self.command_history
            .iter()
            .nth_back(nth_back.checked_sub(1)?)
            .map(|cmd| cmd.command.as_str())
    }
}
