use tasklist_core::Task;

#[test]
fn task_new_sets_defaults() {
    let task = Task::new(1, "hello", "");

    assert_eq!(task.id(), 1);
    assert_eq!(task.title(), "hello");
    assert_eq!(task.description(), "");
    assert!(!task.is_completed());
}

#[test]
fn mutators_change_fields_in_place() {
    let mut task = Task::new(4, "draft", "old");

    task.set_title("final");
    task.set_description("new");
    task.set_completed(true);
    assert!(task.is_completed());
    task.toggle_completed();

    assert_eq!(task.id(), 4);
    assert_eq!(task.title(), "final");
    assert_eq!(task.description(), "new");
    assert!(!task.is_completed());
}

#[test]
fn entity_does_not_validate_titles() {
    let task = Task::new(2, "", "");
    assert_eq!(task.label(), "(In Progress) ");
}

#[test]
fn task_serialization_uses_expected_fields() {
    let mut task = Task::new(5, "Pay bills", "due friday");
    task.set_completed(true);

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["id"], 5);
    assert_eq!(json["title"], "Pay bills");
    assert_eq!(json["description"], "due friday");
    assert_eq!(json["completed"], true);

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}
