//! Domain model for to-do records.
//!
//! # Responsibility
//! - Define the task record shared by store, service and FFI layers.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId` assigned by the store.
//! - Deletion is a hard delete; no tombstones are kept.

pub mod task;
