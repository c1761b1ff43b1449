use tasklist_core::{FileTaskStore, TaskService};

fn service_in(dir: &tempfile::TempDir) -> TaskService<FileTaskStore> {
    TaskService::new(FileTaskStore::open(dir.path().join("tasks.txt")))
}

#[test]
fn create_edit_toggle_remove_flow() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = service_in(&dir);

    let milk = service.create("Buy milk", "2%").unwrap();
    let dog = service.create("Walk dog", "").unwrap();

    service.edit(milk.id(), "Buy oat milk", "barista").unwrap();
    service.toggle(dog.id()).unwrap();

    let labels: Vec<_> = service.list_all().iter().map(|task| task.label()).collect();
    assert_eq!(labels, vec!["(In Progress) Buy oat milk", "(Done) Walk dog"]);

    let completed = service.list_completed();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].id(), dog.id());

    service.remove(dog.id()).unwrap();
    assert!(service.list_completed().is_empty());
    assert_eq!(service.list_all().len(), 1);
}

#[test]
fn commands_on_unknown_ids_succeed_as_no_ops() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = service_in(&dir);
    service.create("only", "").unwrap();

    service.edit(99, "x", "y").unwrap();
    service.toggle(99).unwrap();
    service.remove(99).unwrap();

    let all = service.list_all();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].title(), "only");
    assert!(!all[0].is_completed());
}

#[test]
fn service_state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut service = service_in(&dir);
        let task = service.create("persisted", "yes").unwrap();
        service.toggle(task.id()).unwrap();
    }

    let service = service_in(&dir);
    let completed = service.list_completed();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].title(), "persisted");
    assert_eq!(service.repo().next_id(), Some(2));
}
