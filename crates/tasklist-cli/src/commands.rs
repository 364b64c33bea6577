use clap::{Parser, Subcommand};
use tasklist_core::TaskId;
use thiserror::Error;

/// One line typed into a session.
#[derive(Parser, Debug)]
#[command(name = "tasklist", no_binary_name = true, disable_version_flag = true)]
#[command(about = "Commands available inside a tasklist session", long_about = None)]
pub struct Line {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Add a task at the end of the list
    Add {
        /// Task name, quote it if it has spaces
        name: String,

        /// Cost, e.g. 12.50
        #[arg(allow_hyphen_values = true)]
        cost: String,

        /// Due date (YYYY-MM-DD), defaults to today
        due: Option<String>,
    },

    /// Show all tasks in display order
    List {
        /// Print the tasks as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single task
    Show {
        /// Task ID
        id: TaskId,
    },

    /// Edit a task in place
    Edit {
        /// Task ID
        id: TaskId,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New cost
        #[arg(long, allow_hyphen_values = true)]
        cost: Option<String>,

        /// New due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
    },

    /// Delete a task
    Delete {
        /// Task ID
        id: TaskId,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Drag a task onto another task's position
    Move {
        /// Task to move
        id: TaskId,

        /// Task whose position it takes
        over: TaskId,
    },

    /// End the session
    #[command(alias = "exit")]
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LineError {
    #[error("Unterminated quote in: {0}")]
    UnterminatedQuote(String),
}

/// Splits a command line on whitespace. Single or double quotes at the start
/// of a word group it until the matching quote.
pub fn split_words(line: &str) -> Result<Vec<String>, LineError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if (c == '"' || c == '\'') && !in_word => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        return Err(LineError::UnterminatedQuote(line.to_string()));
    }
    if in_word {
        words.push(current);
    }

    Ok(words)
}
