//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the task list/create/edit/remove/toggle surface to Dart via FRB.
//! - Own the single process-wide task store for the desktop session.
//! - Apply the input rules of the desktop form (trim, non-empty title).
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every command response is followed by a fresh list fetch on the UI side;
//!   the store never pushes notifications.

use session_store::{with_task_service, StoreAccessError};
use tasklist_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    LoadOutcome, Task, TaskId,
};

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One row of the task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub completed: bool,
    /// `(Done) <title>` or `(In Progress) <title>`.
    pub label: String,
}

/// List response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListResponse {
    /// Whether the store could be reached.
    pub ok: bool,
    /// Tasks in display order (empty on failure).
    pub items: Vec<TaskItem>,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Generic action response envelope for task commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Created or targeted task, when known.
    pub task_id: Option<i64>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl TaskActionResponse {
    fn success(message: impl Into<String>, task_id: TaskId) -> Self {
        Self {
            ok: true,
            task_id: Some(task_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            task_id: None,
            message: message.into(),
        }
    }
}

/// Store health envelope returned by `task_store_status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskStoreStatus {
    /// Backing file path in display form.
    pub path: String,
    /// `missing|loaded|failed`.
    pub load_state: String,
    /// Load error or summary text.
    pub message: String,
    pub task_count: u32,
}

/// Lists tasks, optionally only completed ones.
///
/// # FFI contract
/// - Sync call, memory-backed after the first access.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn tasks_list(completed_only: bool) -> TaskListResponse {
    let result = with_task_service(|service| {
        if completed_only {
            service.list_completed()
        } else {
            service.list_all()
        }
    });

    match result {
        Ok(tasks) => TaskListResponse {
            ok: true,
            message: format!("{} task(s).", tasks.len()),
            items: tasks.into_iter().map(to_task_item).collect(),
        },
        Err(err) => TaskListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("tasks_list failed: {err}"),
        },
    }
}

/// Creates a task from the add form.
///
/// # FFI contract
/// - Title and description are trimmed; an empty title is rejected before
///   reaching the store.
/// - Returns created task ID on success.
#[flutter_rust_bridge::frb(sync)]
pub fn task_create(title: String, description: String) -> TaskActionResponse {
    let Some(title) = normalize_title(&title) else {
        return TaskActionResponse::failure("Task title cannot be empty.");
    };
    let description = description.trim();

    match with_task_service(|service| service.create(title, description)) {
        Ok(Ok(task)) => TaskActionResponse::success("Task created.", task.id()),
        Ok(Err(err)) => TaskActionResponse::failure(format!("task_create failed: {err}")),
        Err(err) => TaskActionResponse::failure(format!("task_create failed: {err}")),
    }
}

/// Replaces title and description of a selected task.
///
/// Unknown ids succeed as no-ops.
#[flutter_rust_bridge::frb(sync)]
pub fn task_edit(id: i64, title: String, description: String) -> TaskActionResponse {
    let Some(title) = normalize_title(&title) else {
        return TaskActionResponse::failure("Task title cannot be empty.");
    };
    let description = description.trim();

    command_response(
        "task_edit",
        "Task updated.",
        id,
        with_task_service(|service| service.edit(id, title, description)),
    )
}

/// Deletes a selected task. The UI confirms before calling.
///
/// Unknown ids succeed as no-ops.
#[flutter_rust_bridge::frb(sync)]
pub fn task_remove(id: i64) -> TaskActionResponse {
    command_response(
        "task_remove",
        "Task deleted.",
        id,
        with_task_service(|service| service.remove(id)),
    )
}

/// Flips completion state of a selected task.
///
/// Unknown ids succeed as no-ops.
#[flutter_rust_bridge::frb(sync)]
pub fn task_toggle(id: i64) -> TaskActionResponse {
    command_response(
        "task_toggle",
        "Task status updated.",
        id,
        with_task_service(|service| service.toggle(id)),
    )
}

/// Reports where tasks live and how the startup load went.
///
/// Lets the UI surface a load failure once instead of silently showing an
/// empty list.
#[flutter_rust_bridge::frb(sync)]
pub fn task_store_status() -> TaskStoreStatus {
    let result = with_task_service(|service| {
        let store = service.repo();
        let (load_state, message) = match store.load_outcome() {
            LoadOutcome::Missing => ("missing", "No task file yet.".to_string()),
            LoadOutcome::Loaded {
                tasks,
                skipped_lines,
            } => (
                "loaded",
                format!("Loaded {tasks} task(s), skipped {skipped_lines} line(s)."),
            ),
            LoadOutcome::Failed { message } => ("failed", message.clone()),
        };
        TaskStoreStatus {
            path: store.path().display().to_string(),
            load_state: load_state.to_string(),
            message,
            task_count: u32::try_from(store.len()).unwrap_or(u32::MAX),
        }
    });

    result.unwrap_or_else(|err| TaskStoreStatus {
        path: String::new(),
        load_state: "failed".to_string(),
        message: format!("task_store_status failed: {err}"),
        task_count: 0,
    })
}

fn command_response(
    operation: &str,
    message: &str,
    id: TaskId,
    result: Result<tasklist_core::StoreResult<()>, StoreAccessError>,
) -> TaskActionResponse {
    match result {
        Ok(Ok(())) => TaskActionResponse::success(message, id),
        Ok(Err(err)) => TaskActionResponse::failure(format!("{operation} failed: {err}")),
        Err(err) => TaskActionResponse::failure(format!("{operation} failed: {err}")),
    }
}

fn normalize_title(title: &str) -> Option<&str> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

fn to_task_item(task: Task) -> TaskItem {
    TaskItem {
        id: task.id(),
        label: task.label(),
        completed: task.is_completed(),
        title: task.title().to_string(),
        description: task.description().to_string(),
    }
}

mod session_store {
    use log::warn;
    use std::fmt::{Display, Formatter};
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};
    use tasklist_core::{FileTaskStore, TaskService, DEFAULT_TASK_FILE_NAME};

    #[cfg_attr(test, allow(dead_code))]
    const STORE_PATH_ENV: &str = "TASKLIST_STORE_PATH";

    static TASK_SERVICE: OnceLock<Mutex<TaskService<FileTaskStore>>> = OnceLock::new();

    /// The process-wide store could not be borrowed.
    #[derive(Debug)]
    pub(super) struct StoreAccessError;

    impl Display for StoreAccessError {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            f.write_str("task store is unavailable after an earlier panic")
        }
    }

    pub(super) fn with_task_service<T>(
        f: impl FnOnce(&mut TaskService<FileTaskStore>) -> T,
    ) -> Result<T, StoreAccessError> {
        let service = TASK_SERVICE.get_or_init(|| {
            Mutex::new(TaskService::new(FileTaskStore::open(resolve_store_path())))
        });
        let mut guard = service.lock().map_err(|_| {
            warn!("event=task_store_lock module=ffi status=error error_code=poisoned");
            StoreAccessError
        })?;
        Ok(f(&mut guard))
    }

    #[cfg(not(test))]
    pub(super) fn resolve_store_path() -> PathBuf {
        if let Ok(raw) = std::env::var(STORE_PATH_ENV) {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                return PathBuf::from(trimmed);
            }
        }
        std::env::temp_dir().join(DEFAULT_TASK_FILE_NAME)
    }

    // Tests never touch the configured or shared default task file.
    #[cfg(test)]
    pub(super) fn resolve_store_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("tasklist-ffi-test-{}", std::process::id()))
            .join(DEFAULT_TASK_FILE_NAME)
    }
}
