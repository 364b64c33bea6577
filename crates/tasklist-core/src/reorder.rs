use crate::{Task, TaskId};

/// Result of dropping `active` onto `over` in a displayed list.
///
/// `tasks` is the current display order (as returned by `TaskStore::list`).
/// The dragged task is removed from its slot and inserted at the index the
/// drop target occupied, then every task is renumbered from 1. Returns `None`
/// when the gesture does not move anything.
pub fn move_onto(tasks: &[Task], active: TaskId, over: TaskId) -> Option<Vec<Task>> {
    if active == over {
        return None;
    }

    let from = tasks.iter().position(|t| t.id == active)?;
    let to = tasks.iter().position(|t| t.id == over)?;

    let mut moved = tasks.to_vec();
    let task = moved.remove(from);
    moved.insert(to, task);

    for (index, task) in moved.iter_mut().enumerate() {
        task.order = index + 1;
    }

    Some(moved)
}
