pub mod commands;
pub mod config;
pub mod form;
pub mod render;
pub mod session;

// Re-exports
pub use config::Settings;
pub use session::{Flow, Session};
