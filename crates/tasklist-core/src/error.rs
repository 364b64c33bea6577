use crate::task::TaskId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("A task named '{0}' already exists")]
    DuplicateName(String),

    #[error("Task not found: {0}")]
    NotFound(TaskId),
}

pub type Result<T> = std::result::Result<T, Error>;
