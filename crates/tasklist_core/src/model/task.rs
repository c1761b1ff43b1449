//! Task domain model.
//!
//! # Responsibility
//! - Define the single to-do record (id, title, description, completed).
//! - Derive the human-readable list label from current state.
//!
//! # Invariants
//! - `id` is fixed at construction and has no setter.
//! - The entity performs no validation; non-empty titles are enforced by
//!   callers.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Integer identifier assigned once by the store and never reused.
pub type TaskId = i64;

const DONE_PREFIX: &str = "(Done) ";
const IN_PROGRESS_PREFIX: &str = "(In Progress) ";

/// One to-do record.
///
/// Fields are private so `id` stays immutable; use accessors and mutators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    completed: bool,
}

impl Task {
    /// Creates a task in the not-completed state.
    pub fn new(id: TaskId, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            completed: false,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }

    /// Flips the completion flag in place.
    pub fn toggle_completed(&mut self) {
        self.completed = !self.completed;
    }

    /// Returns the list label, `(Done) <title>` or `(In Progress) <title>`.
    ///
    /// Recomputed on every call.
    pub fn label(&self) -> String {
        let prefix = if self.completed {
            DONE_PREFIX
        } else {
            IN_PROGRESS_PREFIX
        };
        format!("{prefix}{}", self.title)
    }
}

impl Display for Task {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}
