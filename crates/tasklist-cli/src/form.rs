use chrono::NaiveDate;
use tasklist_core::{Cost, ParseCostError, Task, TaskDraft};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FormError {
    #[error("Task name is required")]
    MissingName,

    #[error(transparent)]
    Cost(#[from] ParseCostError),

    #[error("Invalid due date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Nothing to change, pass --name, --cost or --due")]
    NoChanges,
}

/// Fields typed into the inline editor. `None` keeps the current value.
#[derive(Debug, Default, Clone)]
pub struct TaskEdits {
    pub name: Option<String>,
    pub cost: Option<String>,
    pub due: Option<String>,
}

impl TaskEdits {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.cost.is_none() && self.due.is_none()
    }
}

/// Creation form. The due date falls back to `today` when left out.
pub fn parse_draft(
    name: &str,
    cost: &str,
    due: Option<&str>,
    today: NaiveDate,
) -> Result<TaskDraft, FormError> {
    let name = parse_name(name)?;
    let cost: Cost = cost.parse()?;
    let due_date = match due {
        Some(raw) => parse_date(raw)?,
        None => today,
    };

    Ok(TaskDraft::new(name, cost, due_date))
}

/// Applies the editor fields to a copy of `task`; id and order are kept.
pub fn apply_edits(task: &Task, edits: &TaskEdits) -> Result<Task, FormError> {
    if edits.is_empty() {
        return Err(FormError::NoChanges);
    }

    let mut edited = task.clone();
    if let Some(name) = &edits.name {
        edited = edited.with_name(parse_name(name)?);
    }
    if let Some(cost) = &edits.cost {
        edited = edited.with_cost(cost.parse()?);
    }
    if let Some(due) = &edits.due {
        edited = edited.with_due_date(parse_date(due)?);
    }

    Ok(edited)
}

fn parse_name(raw: &str) -> Result<String, FormError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(FormError::MissingName);
    }
    Ok(name.to_string())
}

fn parse_date(raw: &str) -> Result<NaiveDate, FormError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| FormError::InvalidDate(raw.trim().to_string()))
}
