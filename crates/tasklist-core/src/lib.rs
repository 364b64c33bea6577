pub mod task;
pub mod store;
pub mod reorder;
pub mod error;

// Re-exports
pub use task::{Cost, ParseCostError, Task, TaskDraft, TaskId};
pub use store::TaskStore;
pub use reorder::move_onto;
pub use error::{Error, Result};
