use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("tasklist-{nanos}-{file_name}"))
}

fn write_store(path: &PathBuf, tasks: serde_json::Value) {
    let content = serde_json::json!({
        "schema_version": 1,
        "tasks": tasks
    });
    std::fs::write(path, serde_json::to_string_pretty(&content).unwrap()).unwrap();
}

fn read_store(path: &PathBuf) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn add_command_creates_store_with_task() {
    let exe = env!("CARGO_BIN_EXE_tasklist");
    let store_path = temp_path("cli-add.json");

    let output = Command::new(exe)
        .args(["add", "buy milk"])
        .env("TASKLIST_STORE_PATH", &store_path)
        .output()
        .expect("failed to run add command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Added task: buy milk"));

    let stored = read_store(&store_path);
    std::fs::remove_file(&store_path).ok();

    assert_eq!(stored["schema_version"], 1);
    let tasks = stored["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["text"], "buy milk");
    assert_eq!(tasks[0]["completed"], false);
    assert_eq!(tasks[0]["deadline"], serde_json::Value::Null);
    assert!(tasks[0]["id"].as_str().unwrap().len() > 8);
    assert!(tasks[0]["created_at"].as_str().is_some());
}

#[test]
fn add_command_prepends_to_existing_store() {
    let exe = env!("CARGO_BIN_EXE_tasklist");
    let store_path = temp_path("cli-add-prepend.json");

    write_store(
        &store_path,
        serde_json::json!([
            {
                "id": "a",
                "text": "older task",
                "completed": false,
                "deadline": null,
                "created_at": "2026-08-01T00:00:00Z"
            }
        ]),
    );

    let output = Command::new(exe)
        .args(["add", "newer task"])
        .env("TASKLIST_STORE_PATH", &store_path)
        .output()
        .expect("failed to run add command");

    assert!(output.status.success());

    let stored = read_store(&store_path);
    std::fs::remove_file(&store_path).ok();

    let tasks = stored["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["text"], "newer task");
    assert_eq!(tasks[1]["text"], "older task");
}

#[test]
fn add_command_stores_deadline() {
    let exe = env!("CARGO_BIN_EXE_tasklist");
    let store_path = temp_path("cli-add-deadline.json");

    let output = Command::new(exe)
        .args(["add", "with deadline", "--deadline", "2026-09-01T09:30:00Z"])
        .env("TASKLIST_STORE_PATH", &store_path)
        .output()
        .expect("failed to run add command");

    assert!(output.status.success());

    let stored = read_store(&store_path);
    std::fs::remove_file(&store_path).ok();

    assert_eq!(stored["tasks"][0]["deadline"], "2026-09-01T09:30:00Z");
}

#[test]
fn add_command_rejects_blank_text() {
    let exe = env!("CARGO_BIN_EXE_tasklist");
    let store_path = temp_path("cli-add-blank.json");

    let output = Command::new(exe)
        .args(["add", "   "])
        .env("TASKLIST_STORE_PATH", &store_path)
        .output()
        .expect("failed to run add command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input"));
    assert!(!store_path.exists());
}

#[test]
fn add_command_rejects_unparseable_deadline() {
    let exe = env!("CARGO_BIN_EXE_tasklist");
    let store_path = temp_path("cli-add-bad-deadline.json");

    let output = Command::new(exe)
        .args(["add", "demo", "--deadline", "next tuesday"])
        .env("TASKLIST_STORE_PATH", &store_path)
        .output()
        .expect("failed to run add command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input"));
    assert!(!store_path.exists());
}

#[test]
fn add_command_json_output() {
    let exe = env!("CARGO_BIN_EXE_tasklist");
    let store_path = temp_path("cli-add-json.json");

    let output = Command::new(exe)
        .args(["--json", "add", "machine readable"])
        .env("TASKLIST_STORE_PATH", &store_path)
        .output()
        .expect("failed to run add command");

    std::fs::remove_file(&store_path).ok();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("json output");

    assert_eq!(parsed["text"], "machine readable");
    assert_eq!(parsed["completed"], false);
    assert_eq!(parsed["deadline"], serde_json::Value::Null);
    assert!(parsed["id"].as_str().is_some());
}
