//! Repository layer: the in-memory task collection and its persistence.
//!
//! # Responsibility
//! - Define the task CRUD contract used by services.
//! - Keep file format details inside the storage boundary.
//!
//! # Invariants
//! - Every mutation is persisted before the call returns.
//! - Mutations address tasks by `TaskId`; unknown ids are no-ops.

pub mod task_repo;
