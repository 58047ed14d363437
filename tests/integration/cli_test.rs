use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

fn todo() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("todo-cli").unwrap()
}

fn init_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    todo().arg("init").current_dir(dir.path()).assert().success();
    dir
}

/// Run `add` and return the short id it printed ("Added abcd1234").
fn add(dir: &TempDir, text: &str) -> String {
    let output = todo()
        .args(["add", text])
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    stdout.trim().split_whitespace().last().unwrap().to_string()
}

fn list_json(dir: &TempDir, args: &[&str]) -> Value {
    let output = todo()
        .args(["--json", "--today", "2024-01-07", "list"])
        .args(args)
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

fn texts(snapshot: &Value) -> Vec<String> {
    snapshot["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["text"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn init_creates_todo_dir() {
    let dir = TempDir::new().unwrap();
    todo()
        .arg("init")
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains(".todo"));

    assert!(dir.path().join(".todo/tasks.json").exists());
    assert!(dir.path().join(".todo/config.json").exists());
}

#[test]
fn init_twice_fails() {
    let dir = init_dir();
    todo().arg("init").current_dir(dir.path()).assert().failure();
}

#[test]
fn commands_outside_todo_list_fail() {
    let dir = TempDir::new().unwrap();
    todo()
        .arg("list")
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicates::str::contains("not a todo list"));
}

#[test]
fn add_and_list() {
    let dir = init_dir();
    add(&dir, "Buy milk");

    todo()
        .arg("list")
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("[ ] Buy milk  (medium)"))
        .stdout(predicates::str::contains("Total: 1 | Active: 1 | Completed: 0"));
}

#[test]
fn add_blank_adds_nothing() {
    let dir = init_dir();
    todo()
        .args(["add", "   "])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("Nothing added"));
    assert_eq!(list_json(&dir, &[])["stats"]["total"], 0);
}

#[test]
fn toggle_then_filter_active_is_empty() {
    let dir = init_dir();
    let id = add(&dir, "Buy milk");

    todo()
        .args(["toggle", id.as_str()])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("done"));

    let snap = list_json(&dir, &["--status", "active"]);
    assert_eq!(snap["is_empty"], true);
    assert_eq!(snap["stats"]["active"], 0);
    assert_eq!(snap["stats"]["completed"], 1);
    assert_eq!(snap["has_completed"], true);
}

#[test]
fn unknown_id_fails_without_touching_file() {
    let dir = init_dir();
    add(&dir, "Keep");
    let before = fs::read_to_string(dir.path().join(".todo/tasks.json")).unwrap();

    todo()
        .args(["toggle", "zzzzzzzz"])
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicates::str::contains("no task matching"));

    let after = fs::read_to_string(dir.path().join(".todo/tasks.json")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn edit_with_blank_text_keeps_old_text() {
    let dir = init_dir();
    let id = add(&dir, "Original");

    todo()
        .args(["edit", id.as_str(), "Renamed"])
        .current_dir(dir.path())
        .assert()
        .success();
    todo()
        .args(["edit", id.as_str()])
        .current_dir(dir.path())
        .assert()
        .success();

    assert_eq!(texts(&list_json(&dir, &[])), vec!["Renamed"]);
}

#[test]
fn due_sort_and_overdue_marks() {
    let dir = init_dir();
    let a = add(&dir, "A");
    add(&dir, "B");
    let c = add(&dir, "C");
    todo()
        .args(["due", a.as_str(), "2024-01-10"])
        .current_dir(dir.path())
        .assert()
        .success();
    todo()
        .args(["due", c.as_str(), "2024-01-05"])
        .current_dir(dir.path())
        .assert()
        .success();

    let snap = list_json(&dir, &["--sort", "due"]);
    assert_eq!(texts(&snap), vec!["C", "A", "B"]);
    assert_eq!(snap["tasks"][0]["due_status"], "overdue");
    assert_eq!(snap["tasks"][1]["due_status"], "none");
    assert_eq!(snap["reorder_enabled"], false);

    todo()
        .args(["due", c.as_str(), "--clear"])
        .current_dir(dir.path())
        .assert()
        .success();
    let snap = list_json(&dir, &["--sort", "due"]);
    assert_eq!(texts(&snap), vec!["A", "B", "C"]);
}

#[test]
fn due_requires_date_or_clear() {
    let dir = init_dir();
    let id = add(&dir, "A");
    todo()
        .args(["due", id.as_str()])
        .current_dir(dir.path())
        .assert()
        .failure();
}

#[test]
fn priority_sort() {
    let dir = init_dir();
    let a = add(&dir, "A");
    let b = add(&dir, "B");
    let c = add(&dir, "C");
    // medium -> high -> low
    for _ in 0..2 {
        todo()
            .args(["priority", a.as_str()])
            .current_dir(dir.path())
            .assert()
            .success();
    }
    for id in [b.as_str(), c.as_str()] {
        todo()
            .args(["priority", id])
            .current_dir(dir.path())
            .assert()
            .success()
            .stdout(predicates::str::contains("priority high"));
    }

    let snap = list_json(&dir, &["--sort", "priority"]);
    assert_eq!(texts(&snap), vec!["B", "C", "A"]);

    let snap = list_json(&dir, &["--priority", "low"]);
    assert_eq!(texts(&snap), vec!["A"]);
}

#[test]
fn search_is_case_insensitive() {
    let dir = init_dir();
    add(&dir, "Buy milk");
    add(&dir, "Call mom");
    add(&dir, "Milk the cow");

    let snap = list_json(&dir, &["--search", "MILK"]);
    assert_eq!(texts(&snap), vec!["Buy milk", "Milk the cow"]);
    assert_eq!(snap["stats"]["total"], 3);
}

#[test]
fn move_then_move_back() {
    let dir = init_dir();
    let a = add(&dir, "A");
    let b = add(&dir, "B");
    add(&dir, "C");

    todo()
        .args(["move", a.as_str(), b.as_str()])
        .current_dir(dir.path())
        .assert()
        .success();
    assert_eq!(texts(&list_json(&dir, &[])), vec!["B", "A", "C"]);

    todo()
        .args(["move", b.as_str(), a.as_str()])
        .current_dir(dir.path())
        .assert()
        .success();
    assert_eq!(texts(&list_json(&dir, &[])), vec!["A", "B", "C"]);
}

#[test]
fn remove_and_clear_completed() {
    let dir = init_dir();
    let a = add(&dir, "A");
    let b = add(&dir, "B");
    add(&dir, "C");
    let d = add(&dir, "D");

    todo()
        .args(["rm", b.as_str()])
        .current_dir(dir.path())
        .assert()
        .success();
    for id in [a.as_str(), d.as_str()] {
        todo()
            .args(["toggle", id])
            .current_dir(dir.path())
            .assert()
            .success();
    }
    todo()
        .arg("clear-completed")
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("Removed 2"));

    assert_eq!(texts(&list_json(&dir, &[])), vec!["C"]);
}

#[test]
fn stats_json() {
    let dir = init_dir();
    let a = add(&dir, "A");
    add(&dir, "B");
    todo()
        .args(["toggle", a.as_str()])
        .current_dir(dir.path())
        .assert()
        .success();

    let output = todo()
        .args(["--json", "stats"])
        .current_dir(dir.path())
        .output()
        .unwrap();
    let stats: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats["total"], 2);
    assert_eq!(stats["active"], 1);
    assert_eq!(stats["completed"], 1);
}

#[test]
fn legacy_file_without_ids_is_migrated() {
    let dir = init_dir();
    fs::write(
        dir.path().join(".todo/tasks.json"),
        r#"[{"text":"old one","completed":false},{"text":"old two","completed":true}]"#,
    )
    .unwrap();

    let snap = list_json(&dir, &[]);
    assert_eq!(texts(&snap), vec!["old one", "old two"]);
    assert_eq!(snap["tasks"][0]["priority"], "medium");
    assert!(snap["tasks"][0]["dueDate"].is_null());

    // ids were written back and stay stable
    let first_id = snap["tasks"][0]["id"].as_str().unwrap().to_string();
    let again = list_json(&dir, &[]);
    assert_eq!(again["tasks"][0]["id"], first_id.as_str());
}

#[test]
fn malformed_file_reads_as_empty() {
    let dir = init_dir();
    fs::write(dir.path().join(".todo/tasks.json"), "{oops").unwrap();
    assert_eq!(list_json(&dir, &[])["is_empty"], true);
}

#[test]
fn theme_toggle_and_set() {
    let dir = init_dir();
    todo()
        .arg("theme")
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("Theme: light"));
    todo()
        .args(["theme", "dark"])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("Theme: dark"));
    todo()
        .args(["theme", "neon"])
        .current_dir(dir.path())
        .assert()
        .failure();

    let config = fs::read_to_string(dir.path().join(".todo/config.json")).unwrap();
    assert!(config.contains("\"theme\": \"dark\""));
}

#[test]
fn shell_applies_intents_in_order() {
    let dir = init_dir();
    let output = todo()
        .args(["--today", "2024-01-07", "shell"])
        .current_dir(dir.path())
        .write_stdin("add Write report\nadd Buy milk\nsearch milk\nlist\nquit\nadd never\n")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let last = stdout.rsplit("Total:").nth(1).unwrap();
    assert!(last.contains("Buy milk"));
    assert!(!last.contains("Write report"));

    // quit stops before the last line; view filters were not persisted
    let snap = list_json(&dir, &[]);
    assert_eq!(texts(&snap), vec!["Write report", "Buy milk"]);
}

#[test]
fn shell_sort_toggle_disables_move() {
    let dir = init_dir();
    let a = add(&dir, "A");
    let b = add(&dir, "B");

    let script = format!("sort due\nmove {b} {a}\nsort due\nmove {b} {a}\n");
    let output = todo()
        .args(["--json", "shell"])
        .current_dir(dir.path())
        .write_stdin(script)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert_eq!(stderr.matches("(no change)").count(), 1);

    assert_eq!(texts(&list_json(&dir, &[])), vec!["B", "A"]);
}

#[test]
fn shell_reports_bad_lines_and_continues() {
    let dir = init_dir();
    todo()
        .arg("shell")
        .current_dir(dir.path())
        .write_stdin("frobnicate\ntoggle nope\nadd Still works\n")
        .assert()
        .success()
        .stderr(predicates::str::contains("unknown command"))
        .stderr(predicates::str::contains("no task matching"))
        .stdout(predicates::str::contains("Still works"));
}
