use std::ffi::OsString;
use std::fs;
use std::path::Path;

use taskspace_core::cli::Command;
use taskspace_core::commands::dispatch;
use taskspace_core::config::Config;
use taskspace_core::datastore::FileStorage;
use taskspace_core::render::Renderer;
use taskspace_shared::{Controller, Priority, persistence};
use tempfile::tempdir;

fn run_cli(data_dir: &Path, rc: &Path, args: &[&str]) -> anyhow::Result<()> {
    let mut raw: Vec<OsString> = vec![
        "taskspace".into(),
        "--data".into(),
        data_dir.as_os_str().to_owned(),
        "--taskspacerc".into(),
        rc.as_os_str().to_owned(),
    ];
    raw.extend(args.iter().map(OsString::from));
    taskspace_core::run(raw)
}

#[test]
fn cli_seeds_then_adds_task_to_selected_workspace() {
    let temp = tempdir().expect("tempdir");
    let data = temp.path().join("data");
    let rc = temp.path().join("taskspacerc");
    fs::write(&rc, "color=off\n").expect("write rc");

    run_cli(&data, &rc, &[]).expect("first run");
    run_cli(
        &data,
        &rc,
        &[
            "-w",
            "Personal",
            "add-task",
            "Test",
            "--due",
            "2024-09-01",
            "--priority",
            "high",
        ],
    )
    .expect("add task");

    let storage = FileStorage::open(&data).expect("open");
    let store = persistence::load(&storage);
    let personal = store.tasks("Personal");
    assert_eq!(personal.len(), 4);
    assert_eq!(personal[3].title, "Test");
    assert_eq!(personal[3].priority, Priority::High);
    assert_eq!(personal[3].date, "2024-09-01");
    assert!(!personal[3].completed);
    assert_eq!(store.tasks("Errands").len(), 3);
}

#[test]
fn cli_rejects_duplicate_workspace_without_writing() {
    let temp = tempdir().expect("tempdir");
    let data = temp.path().join("data");
    let rc = temp.path().join("taskspacerc");
    fs::write(&rc, "").expect("write rc");

    run_cli(&data, &rc, &["workspaces"]).expect("seed");
    let before = fs::read_to_string(data.join("storage.json")).expect("read");

    let err = run_cli(&data, &rc, &["add-workspace", "Errands", "--color", "#ffffff"])
        .expect_err("duplicate");
    assert_eq!(err.to_string(), "Workspace with this name already exists.");

    let after = fs::read_to_string(data.join("storage.json")).expect("read");
    assert_eq!(before, after);

    assert!(run_cli(&data, &rc, &["-w", "Nowhere", "tasks"]).is_err());
}

#[test]
fn positions_address_the_rendered_rows() {
    let temp = tempdir().expect("tempdir");
    let storage = FileStorage::open(temp.path()).expect("open");
    let renderer = Renderer::new(&Config::default());
    let mut controller = Controller::bootstrap(storage);

    dispatch(&mut controller, &renderer, None, Command::Toggle { position: 2 }).expect("toggle");
    dispatch(&mut controller, &renderer, None, Command::Delete { position: 1 }).expect("delete");
    assert!(dispatch(&mut controller, &renderer, None, Command::Delete { position: 0 }).is_err());
    assert!(dispatch(&mut controller, &renderer, None, Command::Toggle { position: 9 }).is_err());

    let reloaded = persistence::load(controller.storage());
    let titles: Vec<(&str, bool)> = reloaded
        .tasks("Errands")
        .iter()
        .map(|task| (task.title.as_str(), task.completed))
        .collect();
    assert_eq!(
        titles,
        vec![("Pick up Dry Cleaning", true), ("Pay Utility Bills", false)]
    );

    dispatch(
        &mut controller,
        &renderer,
        None,
        Command::RemoveWorkspace {
            name: "Errands".to_string(),
        },
    )
    .expect("remove");
    assert!(controller.store().selected().is_none());
    assert!(dispatch(&mut controller, &renderer, None, Command::Toggle { position: 1 }).is_err());
    assert!(
        dispatch(
            &mut controller,
            &renderer,
            None,
            Command::AddTask {
                title: "orphan".to_string(),
                description: String::new(),
                due: None,
                priority: Priority::Low,
            },
        )
        .is_err()
    );
}
