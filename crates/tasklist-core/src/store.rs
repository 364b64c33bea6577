use crate::{Error, Result, Task, TaskDraft, TaskId};

/// In-memory, ordered task collection.
///
/// Keeps `order` dense (`1..=len`) across add and delete, and owns the id
/// counter so ids stay unique even after tasks are removed.
#[derive(Debug, Clone)]
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u64,
}

impl TaskStore {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
        }
    }

    /// Add a task at the end of the list
    pub fn add(&mut self, draft: TaskDraft) -> Result<Task> {
        if self.name_taken(&draft.name, None) {
            tracing::debug!("Rejected duplicate task name: {}", draft.name);
            return Err(Error::DuplicateName(draft.name));
        }

        let id = TaskId(self.next_id);
        self.next_id += 1;

        let task = Task::from_draft(id, self.tasks.len() + 1, draft);
        self.tasks.push(task.clone());

        tracing::info!("Added task: {} ({}) at position {}", task.name, task.id, task.order);

        Ok(task)
    }

    /// Overwrite the stored task that has the same id
    pub fn update(&mut self, task: Task) -> Result<Task> {
        if self.name_taken(&task.name, Some(task.id)) {
            tracing::debug!("Rejected rename of {} to duplicate name: {}", task.id, task.name);
            return Err(Error::DuplicateName(task.name));
        }

        let slot = self
            .tasks
            .iter_mut()
            .find(|t| t.id == task.id)
            .ok_or(Error::NotFound(task.id))?;
        *slot = task.clone();

        tracing::debug!("Updated task: {} ({})", task.name, task.id);

        Ok(task)
    }

    /// Remove a task and close the gap in `order`. Absent ids are ignored.
    pub fn delete(&mut self, id: TaskId) {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);

        if self.tasks.len() == before {
            tracing::debug!("Delete ignored, no task with id {}", id);
            return;
        }

        self.tasks.sort_by_key(|t| t.order);
        renumber(&mut self.tasks);

        tracing::info!("Deleted task {} ({} remaining)", id, self.tasks.len());
    }

    /// Replace the whole collection with `sequence`, numbering it in the given order
    pub fn reorder(&mut self, sequence: Vec<Task>) {
        if sequence.len() != self.tasks.len() {
            tracing::warn!(
                "Reorder replaced {} tasks with a sequence of {}",
                self.tasks.len(),
                sequence.len()
            );
        }

        self.tasks = sequence;
        renumber(&mut self.tasks);

        tracing::debug!("Reordered {} tasks", self.tasks.len());
    }

    /// All tasks, ascending by `order`
    pub fn list(&self) -> Vec<Task> {
        let mut tasks = self.tasks.clone();
        tasks.sort_by_key(|t| t.order);
        tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn name_taken(&self, name: &str, except: Option<TaskId>) -> bool {
        self.tasks
            .iter()
            .any(|t| t.name == name && Some(t.id) != except)
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

fn renumber(tasks: &mut [Task]) {
    for (index, task) in tasks.iter_mut().enumerate() {
        task.order = index + 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cost;
    use chrono::NaiveDate;

    fn draft(name: &str, units: u64) -> TaskDraft {
        TaskDraft::new(
            name,
            Cost::from_units(units),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
    }

    fn orders(store: &TaskStore) -> Vec<usize> {
        store.list().iter().map(|t| t.order).collect()
    }

    #[test]
    fn test_store_creation() {
        let store = TaskStore::new();
        assert!(store.is_empty());
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_add_assigns_id_and_order() {
        let mut store = TaskStore::new();

        let a = store.add(draft("A", 10)).unwrap();
        let b = store.add(draft("B", 20)).unwrap();

        assert_eq!(a.order, 1);
        assert_eq!(b.order, 2);
        assert_ne!(a.id, b.id);
        assert_eq!(store.get(b.id), Some(&b));
    }

    #[test]
    fn test_add_duplicate_name() {
        let mut store = TaskStore::new();
        store.add(draft("X", 1)).unwrap();

        let err = store.add(draft("X", 2)).unwrap_err();
        assert_eq!(err, Error::DuplicateName("X".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut store = TaskStore::new();
        store.add(draft("task", 1)).unwrap();
        assert!(store.add(draft("Task", 1)).is_ok());
    }

    #[test]
    fn test_update_preserves_id_and_order() {
        let mut store = TaskStore::new();
        store.add(draft("A", 1)).unwrap();
        let b = store.add(draft("B", 1)).unwrap();

        let edited = b.clone().with_cost(Cost::from_units(99));
        let updated = store.update(edited).unwrap();

        assert_eq!(updated.id, b.id);
        assert_eq!(updated.order, 2);
        assert_eq!(store.get(b.id).unwrap().cost, Cost::from_units(99));
    }

    #[test]
    fn test_update_keeps_own_name() {
        let mut store = TaskStore::new();
        let a = store.add(draft("A", 1)).unwrap();
        assert!(store.update(a.with_cost(Cost::ZERO)).is_ok());
    }

    #[test]
    fn test_update_rejects_other_tasks_name() {
        let mut store = TaskStore::new();
        store.add(draft("A", 1)).unwrap();
        let b = store.add(draft("B", 1)).unwrap();

        let err = store.update(b.clone().with_name("A")).unwrap_err();
        assert_eq!(err, Error::DuplicateName("A".to_string()));
        assert_eq!(store.get(b.id).unwrap().name, "B");
    }

    #[test]
    fn test_update_missing_task() {
        let mut store = TaskStore::new();
        let a = store.add(draft("A", 1)).unwrap();
        store.delete(a.id);

        let err = store.update(a.clone()).unwrap_err();
        assert_eq!(err, Error::NotFound(a.id));
        assert!(store.is_empty());
    }

    #[test]
    fn test_delete_renumbers() {
        let mut store = TaskStore::new();
        let a = store.add(draft("A", 1)).unwrap();
        let b = store.add(draft("B", 1)).unwrap();
        let c = store.add(draft("C", 1)).unwrap();

        store.delete(b.id);

        let ids: Vec<TaskId> = store.list().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![a.id, c.id]);
        assert_eq!(orders(&store), vec![1, 2]);
    }

    #[test]
    fn test_delete_absent_is_noop() {
        let mut store = TaskStore::new();
        store.add(draft("A", 1)).unwrap();

        store.delete(TaskId(42));
        store.delete(TaskId(42));

        assert_eq!(store.len(), 1);
        assert_eq!(orders(&store), vec![1]);
    }

    #[test]
    fn test_delete_only_task() {
        let mut store = TaskStore::new();
        let a = store.add(draft("A", 1)).unwrap();
        store.delete(a.id);
        assert!(store.is_empty());
    }

    #[test]
    fn test_delete_follows_display_order() {
        let mut store = TaskStore::new();
        let a = store.add(draft("A", 1)).unwrap();
        let b = store.add(draft("B", 1)).unwrap();
        let c = store.add(draft("C", 1)).unwrap();

        // C, A, B
        store.reorder(vec![c.clone(), a.clone(), b.clone()]);
        store.delete(a.id);

        let names: Vec<String> = store.list().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["C", "B"]);
        assert_eq!(orders(&store), vec![1, 2]);
    }

    #[test]
    fn test_ids_not_reused() {
        let mut store = TaskStore::new();
        let a = store.add(draft("A", 1)).unwrap();
        store.delete(a.id);

        let again = store.add(draft("A", 1)).unwrap();
        assert_ne!(again.id, a.id);
        assert_eq!(again.order, 1);
    }

    #[test]
    fn test_reorder_is_idempotent() {
        let mut store = TaskStore::new();
        let a = store.add(draft("A", 1)).unwrap();
        let b = store.add(draft("B", 1)).unwrap();

        store.reorder(vec![b.clone(), a.clone()]);
        let first = store.list();
        store.reorder(first.clone());

        assert_eq!(store.list(), first);
        assert_eq!(first[0].id, b.id);
        assert_eq!(first[0].order, 1);
    }

    #[test]
    fn test_list_sort_is_stable() {
        let mut store = TaskStore::new();
        let a = store.add(draft("A", 1)).unwrap();
        let b = store.add(draft("B", 1)).unwrap();

        // Force a tie through the full-overwrite path
        let mut tie = b.clone();
        tie.order = 1;
        store.update(tie).unwrap();

        let ids: Vec<TaskId> = store.list().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
    }
}
