//! Task use-case service.
//!
//! # Responsibility
//! - Provide the collaborator interface the UI calls after every user action.
//! - Delegate state and persistence to repository implementations.
//!
//! # Invariants
//! - The service holds no display state; callers pick `list_all` or
//!   `list_completed` themselves.
//! - Input validation (non-empty titles) belongs to the caller.

use crate::model::task::{Task, TaskId};
use crate::repo::task_repo::{StoreResult, TaskRepository};

/// Use-case service wrapper for task CRUD operations.
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Borrows the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Lists every task in display order.
    pub fn list_all(&self) -> Vec<Task> {
        self.repo.get_all_tasks()
    }

    /// Lists completed tasks in display order.
    pub fn list_completed(&self) -> Vec<Task> {
        self.repo.get_completed_tasks()
    }

    /// Creates a task with a fresh id.
    pub fn create(&mut self, title: &str, description: &str) -> StoreResult<Task> {
        self.repo.add_task(title, description)
    }

    /// Replaces title and description. Unknown ids are a no-op.
    pub fn edit(&mut self, id: TaskId, title: &str, description: &str) -> StoreResult<()> {
        self.repo.update_task(id, title, description).map(|_| ())
    }

    /// Deletes a task. Unknown ids are a no-op.
    pub fn remove(&mut self, id: TaskId) -> StoreResult<()> {
        self.repo.delete_task(id).map(|_| ())
    }

    /// Flips completion state. Unknown ids are a no-op.
    pub fn toggle(&mut self, id: TaskId) -> StoreResult<()> {
        self.repo.toggle_completed(id).map(|_| ())
    }
}
