//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `tasklist_core` linkage.
//! - Print the task list of a file for quick local sanity checks.
//!
//! Usage: `tasklist_cli [path] [--completed]` (path defaults to `tasks.txt`).

use std::process::ExitCode;
use tasklist_core::{FileTaskStore, LoadOutcome, TaskService, DEFAULT_TASK_FILE_NAME};

fn main() -> ExitCode {
    println!("tasklist_core ping={}", tasklist_core::ping());
    println!("tasklist_core version={}", tasklist_core::core_version());

    let mut path = DEFAULT_TASK_FILE_NAME.to_string();
    let mut completed_only = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--completed" => completed_only = true,
            other if other.starts_with("--") => {
                eprintln!("unknown flag `{other}`; usage: tasklist_cli [path] [--completed]");
                return ExitCode::from(2);
            }
            other => path = other.to_string(),
        }
    }

    let service = TaskService::new(FileTaskStore::open(&path));
    if let LoadOutcome::Failed { message } = service.repo().load_outcome() {
        eprintln!("{message}");
        return ExitCode::FAILURE;
    }

    let tasks = if completed_only {
        service.list_completed()
    } else {
        service.list_all()
    };
    for task in &tasks {
        println!("{:>4} {task}", task.id());
    }
    println!("tasks={} path={}", tasks.len(), path);
    ExitCode::SUCCESS
}
