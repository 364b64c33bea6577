use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use std::io::{BufRead, Write};
use tasklist_core::{move_onto, Error as StoreError, TaskId, TaskStore};
use thiserror::Error;

use crate::commands::{split_words, Command, Line, LineError};
use crate::config::Settings;
use crate::form::{self, FormError, TaskEdits};
use crate::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Failures of a single command. Everything except `Io` is reported to the
/// user and the session goes on.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Line(#[from] LineError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Interactive front end over a `TaskStore`. The store lives as long as the
/// session and is never written anywhere.
pub struct Session<R, W> {
    store: TaskStore,
    settings: Settings,
    input: R,
    output: W,
    prompt: Option<String>,
    assume_yes: bool,
    today: NaiveDate,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(settings: Settings, input: R, output: W) -> Self {
        Self {
            store: TaskStore::new(),
            settings,
            input,
            output,
            prompt: None,
            assume_yes: false,
            today: Local::now().date_naive(),
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Skip delete confirmations
    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    /// Date used when the creation form leaves the due date out
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Reads commands until `quit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        tracing::info!("Session started");

        while let Some(line) = self.read_line()? {
            if self.handle_line(&line)? == Flow::Quit {
                break;
            }
        }

        tracing::info!("Session ended with {} task(s)", self.store.len());
        Ok(())
    }

    pub fn handle_line(&mut self, line: &str) -> Result<Flow> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Flow::Continue);
        }

        tracing::debug!("Command: {}", line);

        match self.dispatch(line) {
            Ok(flow) => Ok(flow),
            Err(CommandError::Io(err)) => Err(err).context("Session output failed"),
            Err(err) => {
                tracing::debug!("Command rejected: {}", err);
                self.print(&render::failure(&err.to_string()))?;
                Ok(Flow::Continue)
            }
        }
    }

    fn dispatch(&mut self, line: &str) -> Result<Flow, CommandError> {
        let words = split_words(line)?;
        let command = match Line::try_parse_from(words) {
            Ok(parsed) => parsed.command,
            Err(err) => {
                // Usage errors and `help` both land here
                write!(self.output, "{}", err.render())?;
                return Ok(Flow::Continue);
            }
        };

        match command {
            Command::Add { name, cost, due } => {
                let draft = form::parse_draft(&name, &cost, due.as_deref(), self.today)?;
                let task = self.store.add(draft)?;
                self.print(&render::success(&format!(
                    "Task added: {} (id {}, position {})",
                    task.name, task.id, task.order
                )))?;
                self.after_change()?;
            }

            Command::List { json } => {
                let tasks = self.store.list();
                if json {
                    let snapshot = serde_json::to_string_pretty(&tasks)?;
                    self.print(&snapshot)?;
                } else {
                    let view = render::list_view(&tasks, &self.settings);
                    self.print(&view)?;
                }
            }

            Command::Show { id } => {
                let task = self.store.get(id).ok_or(StoreError::NotFound(id))?;
                let view = render::item_view(task, &self.settings);
                self.print(&view)?;
            }

            Command::Edit { id, name, cost, due } => {
                let current = self.store.get(id).ok_or(StoreError::NotFound(id))?;
                let edited = form::apply_edits(current, &TaskEdits { name, cost, due })?;
                let task = self.store.update(edited)?;
                self.print(&render::success(&format!("Task updated: {}", task.name)))?;
                self.after_change()?;
            }

            Command::Delete { id, yes } => {
                let name = self
                    .store
                    .get(id)
                    .map(|t| t.name.clone())
                    .ok_or(StoreError::NotFound(id))?;

                let needs_confirmation = self.settings.confirm_deletes && !yes && !self.assume_yes;
                if needs_confirmation && !self.confirm(&format!("Delete task '{}'? [y/N] ", name))? {
                    self.print(&render::note("Deletion cancelled"))?;
                    return Ok(Flow::Continue);
                }

                self.store.delete(id);
                self.print(&render::success(&format!("Task deleted: {}", name)))?;
                self.after_change()?;
            }

            Command::Move { id, over } => {
                self.require(id)?;
                self.require(over)?;

                match move_onto(&self.store.list(), id, over) {
                    Some(sequence) => {
                        self.store.reorder(sequence);
                        let position = self.store.get(id).map(|t| t.order).unwrap_or_default();
                        self.print(&render::success(&format!(
                            "Task moved to position {}",
                            position
                        )))?;
                        self.after_change()?;
                    }
                    None => self.print(&render::note("Task is already in that position"))?,
                }
            }

            Command::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    fn require(&self, id: TaskId) -> Result<(), StoreError> {
        match self.store.get(id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound(id)),
        }
    }

    fn confirm(&mut self, question: &str) -> std::io::Result<bool> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            return Ok(false);
        }
        let answer = answer.trim().to_lowercase();
        Ok(answer == "y" || answer == "yes")
    }

    fn after_change(&mut self) -> std::io::Result<()> {
        if self.settings.show_list_after_change {
            let view = render::list_view(&self.store.list(), &self.settings);
            self.print(&view)?;
        }
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        if let Some(prompt) = &self.prompt {
            write!(self.output, "{}", prompt)?;
            self.output.flush()?;
        }

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read session input")?;

        Ok((read > 0).then_some(line))
    }

    fn print(&mut self, text: &str) -> std::io::Result<()> {
        writeln!(self.output, "{}", text)
    }
}
