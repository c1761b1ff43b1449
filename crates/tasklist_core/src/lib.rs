//! Core domain logic for the tasklist desktop app.
//! This crate is the single source of truth for task state and persistence.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::task::{Task, TaskId};
pub use repo::task_repo::{FileTaskStore, LoadOutcome, StoreError, StoreResult, TaskRepository};
pub use service::task_service::TaskService;
pub use storage::{StorageError, StorageResult};

/// Default backing file name used by desktop front ends.
pub const DEFAULT_TASK_FILE_NAME: &str = "tasks.txt";

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
