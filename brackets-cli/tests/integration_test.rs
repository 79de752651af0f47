//! Integration tests for the brackets CLI
//!
//! Runs the built binary against a throwaway store file, one process per
//! command, the way it is used from a shell.

use std::path::Path;
use std::process::{Command, Output};

use brackets_core::ElimType;
use brackets_session::{BracketStore, JsonFileStore, Session, SessionConfig};
use tempfile::TempDir;

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn brackets(store: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_brackets"))
        .arg("--store")
        .arg(store)
        .args(args)
        .env_remove("BRACKETS_STORE")
        .env_remove("BRACKETS_SEED")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run brackets binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

fn create_seeded(store: &Path) {
    let output = brackets(
        store,
        &[
            "new", "--name", "Club Night",
            "--player", "Ana:1", "--player", "Ben:2", "--player", "Cai:3",
            "--player", "Dee:4", "--player", "Eve:5",
        ],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
}

// ============================================================================
// COMMAND TESTS
// ============================================================================

#[test]
fn test_new_and_show() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("brackets.json");
    create_seeded(&store);

    let output = brackets(&store, &["show", "--name", "Club Night", "--json"]);
    assert!(output.status.success());
    let value = json(&output);
    assert_eq!(value["bracket_id"], 1);
    assert_eq!(value["num_players"], 5);
    assert_eq!(value["elim_type"], 0);

    // 8 leaves: seeds 1..5 then three byes
    let ids: Vec<&str> = value["seats"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["p000", "b001", "p002", "p003", "p004", "b005", "p006", "b007"]);
    assert_eq!(value["champion"], serde_json::Value::Null);
}

#[test]
fn test_duplicate_name_needs_replace() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("brackets.json");
    create_seeded(&store);

    let output = brackets(&store, &["new", "--name", "Club Night", "--player", "X", "--player", "Y"]);
    assert!(!output.status.success());

    let output = brackets(
        &store,
        &["new", "--name", "Club Night", "--player", "X", "--player", "Y", "--replace"],
    );
    assert!(output.status.success());

    let list = json(&brackets(&store, &["list", "--json"]));
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["bracket_id"], 1);
}

#[test]
fn test_win_and_undo_are_saved() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("brackets.json");
    create_seeded(&store);

    let output = brackets(&store, &["win", "--name", "Club Night", "--seat", "p003"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "Eve advances from 003 to 101");

    let file = JsonFileStore::open(&store).unwrap();
    let (_, state) = file.load(1).unwrap();
    assert!(state.ids.contains(&"r003".to_string()));
    assert!(state.ids.contains(&"p101".to_string()));

    let output = brackets(&store, &["undo", "--name", "Club Night", "--seat", "101"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "Eve moves back from 101 to 003");

    let file = JsonFileStore::open(&store).unwrap();
    let (_, state) = file.load(1).unwrap();
    assert_eq!(state.ids, vec!["p000", "b001", "p002", "p003", "p004", "b005", "p006", "b007"]);
}

#[test]
fn test_bye_is_reported_not_saved() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("brackets.json");
    create_seeded(&store);
    let before = std::fs::read_to_string(&store).unwrap();

    let output = brackets(&store, &["win", "--name", "Club Night", "--seat", "b001", "--json"]);
    assert!(output.status.success());
    let value = json(&output);
    assert_eq!(value["applied"], false);
    assert_eq!(value["message"], "Cannot advance a bye");
    assert_eq!(std::fs::read_to_string(&store).unwrap(), before);
}

#[test]
fn test_unknown_bracket_fails() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("brackets.json");
    let output = brackets(&store, &["show", "--name", "Nope"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No bracket named"));
}

#[test]
fn test_list_and_delete() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("brackets.json");
    create_seeded(&store);

    let output = brackets(&store, &["list"]);
    assert!(stdout(&output).contains("Club Night"));

    assert!(brackets(&store, &["delete", "--id", "1"]).status.success());
    assert!(!brackets(&store, &["delete", "--id", "1"]).status.success());
    assert!(stdout(&brackets(&store, &["list"])).starts_with("No saved brackets"));
}

#[test]
fn test_seed_flag_makes_draw_reproducible() {
    let dir = TempDir::new().unwrap();
    let draw = |file: &str| {
        let store = dir.path().join(file);
        let output = brackets(
            &store,
            &[
                "--seed", "77", "new", "--name", "Open", "--json",
                "--player", "A", "--player", "B", "--player", "C",
                "--player", "D", "--player", "E", "--player", "F",
            ],
        );
        assert!(output.status.success());
        json(&output)["seats"].clone()
    };
    assert_eq!(draw("one.json"), draw("two.json"));
}

// ============================================================================
// LIBRARY ROUND TRIP
// ============================================================================

#[test]
fn test_cli_reads_library_written_store() {
    let dir = TempDir::new().unwrap();
    let store_path = dir.path().join("brackets.json");

    let mut store = JsonFileStore::open(&store_path).unwrap();
    let mut session = Session::new(SessionConfig::default().with_seed(5));
    session
        .create_bracket(
            ElimType::Single,
            "Library Cup",
            vec!["Ana".into(), "Ben".into()],
            vec![Some(1), Some(2)],
        )
        .unwrap();
    session.store(&mut store).unwrap();

    let output = brackets(&store_path, &["win", "--name", "Library Cup", "--seat", "p001"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "Ben wins Library Cup!");

    let output = brackets(&store_path, &["show", "--name", "Library Cup", "--json"]);
    assert_eq!(json(&output)["champion"], "Ben");
}
