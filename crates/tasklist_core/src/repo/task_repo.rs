//! Task repository contract and file-backed implementation.
//!
//! # Responsibility
//! - Own the ordered task collection and the next-id counter.
//! - Rewrite the whole backing file after every mutation.
//!
//! # Invariants
//! - `next_id` is strictly greater than every id assigned or loaded; once the
//!   id space is used up, adds fail instead of reusing an id.
//! - Query results are owned snapshots; mutating them never touches the store.
//! - A failed load leaves the store empty, never partially populated.
//! - A failed save keeps the in-memory change as the source of truth.

use crate::model::task::{Task, TaskId};
use crate::storage::{read_task_file, write_task_file, ParsedRecords, StorageError};
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const FIRST_TASK_ID: TaskId = 1;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error for load and save paths.
#[derive(Debug)]
pub enum StoreError {
    /// Construction-time load failed; the store was left empty.
    Load(StorageError),
    /// Persisting a mutation failed; the in-memory change was kept.
    Save(StorageError),
    /// Every id up to `TaskId::MAX` is taken; nothing was added.
    IdExhausted,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Load(err) => write!(f, "error loading tasks: {err}"),
            Self::Save(err) => write!(f, "error saving tasks: {err}"),
            Self::IdExhausted => f.write_str("error adding task: no task ids left"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Load(err) => Some(err),
            Self::Save(err) => Some(err),
            Self::IdExhausted => None,
        }
    }
}

/// How the construction-time load went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No backing file existed; the store started empty.
    Missing,
    /// The file was read; malformed lines were skipped.
    Loaded { tasks: usize, skipped_lines: usize },
    /// The file could not be loaded; the store started empty.
    Failed { message: String },
}

/// Repository interface for task CRUD operations.
pub trait TaskRepository {
    /// All tasks in insertion order.
    fn get_all_tasks(&self) -> Vec<Task>;
    /// Completed tasks in insertion order.
    fn get_completed_tasks(&self) -> Vec<Task>;
    fn get_task(&self, id: TaskId) -> Option<Task>;
    fn add_task(&mut self, title: &str, description: &str) -> StoreResult<Task>;
    /// Returns the updated snapshot, or `None` when `id` is unknown.
    fn update_task(
        &mut self,
        id: TaskId,
        new_title: &str,
        new_description: &str,
    ) -> StoreResult<Option<Task>>;
    /// Returns whether a task was removed. Persists either way.
    fn delete_task(&mut self, id: TaskId) -> StoreResult<bool>;
    /// Returns the toggled snapshot, or `None` when `id` is unknown.
    fn toggle_completed(&mut self, id: TaskId) -> StoreResult<Option<Task>>;
}

/// Task store backed by one `|`-delimited text file.
#[derive(Debug)]
pub struct FileTaskStore {
    path: PathBuf,
    tasks: Vec<Task>,
    /// `None` once `TaskId::MAX` has been assigned or loaded.
    next_id: Option<TaskId>,
    load_outcome: LoadOutcome,
}

impl FileTaskStore {
    /// Opens the store, recovering from load failures.
    ///
    /// A missing file yields an empty store. An unreadable file or an invalid
    /// id is logged at `error` level and also yields an empty store; inspect
    /// `load_outcome()` to tell the cases apart.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::try_open(path.as_path()) {
            Ok(store) => store,
            Err(err) => {
                error!(
                    "event=task_store_open module=store status=error error_code=load_failed error={}",
                    err
                );
                let message = err.to_string();
                Self::empty(path, LoadOutcome::Failed { message })
            }
        }
    }

    /// Opens the store and returns load failures to the caller.
    ///
    /// # Errors
    /// - `StoreError::Load` when the file exists but cannot be read, or when
    ///   any record carries a non-integer id.
    pub fn try_open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let store = match read_task_file(&path).map_err(StoreError::Load)? {
            None => Self::empty(path, LoadOutcome::Missing),
            Some(parsed) => Self::from_records(path, parsed),
        };

        info!(
            "event=task_store_open module=store status=ok tasks={} next_id={:?}",
            store.tasks.len(),
            store.next_id
        );
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.load_outcome
    }

    /// Id the next `add_task` call will assign, `None` when ids are exhausted.
    pub fn next_id(&self) -> Option<TaskId> {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn empty(path: PathBuf, load_outcome: LoadOutcome) -> Self {
        Self {
            path,
            tasks: Vec::new(),
            next_id: Some(FIRST_TASK_ID),
            load_outcome,
        }
    }

    fn from_records(path: PathBuf, parsed: ParsedRecords) -> Self {
        let max_id = parsed
            .tasks
            .iter()
            .map(Task::id)
            .fold(FIRST_TASK_ID - 1, TaskId::max);
        let load_outcome = LoadOutcome::Loaded {
            tasks: parsed.tasks.len(),
            skipped_lines: parsed.skipped_lines,
        };
        Self {
            path,
            tasks: parsed.tasks,
            next_id: max_id.checked_add(1),
            load_outcome,
        }
    }

    fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id() == id)
    }

    fn persist(&self) -> StoreResult<()> {
        write_task_file(&self.path, &self.tasks).map_err(StoreError::Save)
    }
}

impl TaskRepository for FileTaskStore {
    fn get_all_tasks(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    fn get_completed_tasks(&self) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|task| task.is_completed())
            .cloned()
            .collect()
    }

    fn get_task(&self, id: TaskId) -> Option<Task> {
        self.tasks.iter().find(|task| task.id() == id).cloned()
    }

    fn add_task(&mut self, title: &str, description: &str) -> StoreResult<Task> {
        let Some(id) = self.next_id else {
            error!("event=task_add module=store status=error error_code=id_exhausted");
            return Err(StoreError::IdExhausted);
        };
        let task = Task::new(id, title, description);
        self.next_id = id.checked_add(1);
        self.tasks.push(task.clone());
        debug!(
            "event=task_add module=store status=ok task_id={}",
            task.id()
        );

        self.persist()?;
        Ok(task)
    }

    fn update_task(
        &mut self,
        id: TaskId,
        new_title: &str,
        new_description: &str,
    ) -> StoreResult<Option<Task>> {
        let Some(index) = self.position(id) else {
            debug!("event=task_update module=store status=not_found task_id={id}");
            return Ok(None);
        };

        let task = &mut self.tasks[index];
        task.set_title(new_title);
        task.set_description(new_description);
        let snapshot = task.clone();
        debug!("event=task_update module=store status=ok task_id={id}");

        self.persist()?;
        Ok(Some(snapshot))
    }

    fn delete_task(&mut self, id: TaskId) -> StoreResult<bool> {
        let removed = match self.position(id) {
            Some(index) => {
                self.tasks.remove(index);
                true
            }
            None => false,
        };
        debug!(
            "event=task_delete module=store status={} task_id={id}",
            if removed { "ok" } else { "not_found" }
        );

        self.persist()?;
        Ok(removed)
    }

    fn toggle_completed(&mut self, id: TaskId) -> StoreResult<Option<Task>> {
        let Some(index) = self.position(id) else {
            debug!("event=task_toggle module=store status=not_found task_id={id}");
            return Ok(None);
        };

        let task = &mut self.tasks[index];
        task.toggle_completed();
        let snapshot = task.clone();
        debug!(
            "event=task_toggle module=store status=ok task_id={id} completed={}",
            snapshot.is_completed()
        );

        self.persist()?;
        Ok(Some(snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::{FileTaskStore, LoadOutcome, TaskRepository};

    #[test]
    fn open_missing_file_reports_missing_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTaskStore::open(dir.path().join("tasks.txt"));

        assert_eq!(store.load_outcome(), &LoadOutcome::Missing);
        assert!(store.is_empty());
        assert_eq!(store.next_id(), Some(1));
    }

    #[test]
    fn snapshots_do_not_alias_store_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileTaskStore::open(dir.path().join("tasks.txt"));
        store.add_task("a", "").unwrap();

        let mut snapshot = store.get_all_tasks();
        snapshot[0].set_title("changed");
        snapshot.clear();

        let current = store.get_all_tasks();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].title(), "a");
    }

    #[test]
    fn save_failure_keeps_in_memory_change() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("occupied");
        std::fs::create_dir(&target).unwrap();

        let mut store = FileTaskStore::open(&target);
        let err = store.add_task("kept", "").unwrap_err();

        assert!(err.to_string().starts_with("error saving tasks"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.next_id(), Some(2));
    }
}
