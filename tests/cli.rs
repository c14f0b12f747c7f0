use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

fn tracker(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("task-tracker").expect("binary builds");
    cmd.current_dir(dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join("config"))
        .env_remove("TASK_TRACKER_FILE")
        .env_remove("RUST_LOG");
    cmd
}

fn stored(path: &Path) -> Vec<Value> {
    let data = fs::read_to_string(path).expect("task file");
    serde_json::from_str(&data).expect("task file is a json array")
}

#[test]
fn creates_default_file_on_first_run() {
    let dir = TempDir::new().unwrap();

    tracker(&dir)
        .write_stdin("exit\n")
        .assert()
        .success()
        .stdout(contains("Task Tracker CLI"))
        .stdout(contains("Exiting Task Tracker CLI. Thank you!"));

    assert!(stored(&dir.path().join("tasks.json")).is_empty());
}

#[test]
fn add_update_delete_round_trip() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("tasks.json");

    tracker(&dir)
        .write_stdin("add\nbuy milk\nexit\n")
        .assert()
        .success()
        .stdout(contains("Task added successfully!"));
    let tasks = stored(&file);
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["id"], 1);
    assert_eq!(tasks[0]["description"], "buy milk");
    assert_eq!(tasks[0]["status"], "todo");
    assert_eq!(tasks[0]["createdAt"], tasks[0]["updatedAt"]);

    tracker(&dir)
        .write_stdin("update\n1\n2\ndone\nlist\n1\nexit\n")
        .assert()
        .success()
        .stdout(contains("ID: 1, Description: buy milk, Status: done"));
    let tasks = stored(&file);
    assert_eq!(tasks[0]["status"], "done");
    assert_ne!(tasks[0]["createdAt"], tasks[0]["updatedAt"]);

    tracker(&dir)
        .write_stdin("delete\n1\nexit\n")
        .assert()
        .success()
        .stdout(contains("Task deleted successfully!"));
    assert!(stored(&file).is_empty());
}

#[test]
fn file_flag_and_env_pick_the_store() {
    let dir = TempDir::new().unwrap();
    let flagged = dir.path().join("lists/work.json");
    let from_env = dir.path().join("home.json");

    tracker(&dir)
        .arg("--file")
        .arg(&flagged)
        .write_stdin("add\nship release\nexit\n")
        .assert()
        .success();
    assert_eq!(stored(&flagged)[0]["description"], "ship release");

    tracker(&dir)
        .env("TASK_TRACKER_FILE", &from_env)
        .write_stdin("add\nwater plants\nexit\n")
        .assert()
        .success();
    assert_eq!(stored(&from_env)[0]["description"], "water plants");
    assert!(!dir.path().join("tasks.json").exists());
}

#[test]
fn config_file_sets_the_store() {
    let dir = TempDir::new().unwrap();
    let config_dir = dir.path().join("config/task-tracker");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "file = \"configured.json\"\ncolor = false\n",
    )
    .unwrap();

    tracker(&dir)
        .write_stdin("add\nfrom config\nexit\n")
        .assert()
        .success();
    assert_eq!(
        stored(&dir.path().join("configured.json"))[0]["description"],
        "from config"
    );
}

#[test]
fn user_errors_do_not_end_the_session() {
    let dir = TempDir::new().unwrap();

    tracker(&dir)
        .write_stdin("bogus\ndelete\nabc\ndelete\n7\nupdate\n1\n2\nsoon\nlist\n9\nexit\n")
        .assert()
        .success()
        .stdout(contains("Unknown command, please try again."))
        .stdout(contains("Invalid task ID."))
        .stdout(contains("Error deleting task: task not found: 7"))
        .stdout(contains("Error updating status: invalid status"))
        .stdout(contains("Invalid option\nTasks:"))
        .stdout(contains("Thank you!"));
}

#[test]
fn closed_stdin_ends_the_session() {
    let dir = TempDir::new().unwrap();

    tracker(&dir)
        .write_stdin("add\nlast one\n")
        .assert()
        .success()
        .stdout(contains("Task added successfully!"))
        .stdout(contains("Thank you!").not());
}

#[test]
fn unusable_store_aborts_startup() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, "").unwrap();

    tracker(&dir)
        .arg("--file")
        .arg(blocker.join("tasks.json"))
        .write_stdin("exit\n")
        .assert()
        .failure()
        .stdout(contains("Error initializing file:"));
}
