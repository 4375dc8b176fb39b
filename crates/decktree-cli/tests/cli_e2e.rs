#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const SNAPSHOT: &str = r#"{
    "schema": "modern",
    "current_deck": 11,
    "decks": [
        { "id": 1, "name": "Default" },
        { "id": 10, "name": "Languages", "counts": { "new": 12, "learning": 3, "review": 20 },
          "children": [
            { "id": 11, "name": "Spanish", "counts": { "new": 10, "learning": 2, "review": 15 } },
            { "id": 12, "name": "French", "counts": { "new": 2, "learning": 1, "review": 5 } }
          ] },
        { "id": 20, "name": "Science", "collapsed": true, "counts": { "new": 6, "learning": 0, "review": 9 },
          "children": [
            { "id": 21, "name": "Physics", "counts": { "new": 6, "learning": 0, "review": 9 } }
          ] }
    ]
}"#;

struct Env {
    temp: TempDir,
}

impl Env {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("decks.json"), SNAPSHOT).unwrap();
        Self { temp }
    }

    fn snapshot(&self) -> PathBuf {
        self.temp.path().join("decks.json")
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::new(cargo_bin("decktree"));
        cmd.env("NO_COLOR", "1")
            .env("HOME", self.temp.path())
            .env("XDG_CONFIG_HOME", self.temp.path().join("config"))
            .env_remove("DECKTREE_SNAPSHOT")
            .env_remove("DECKTREE_LOCALE")
            .env_remove("DECKTREE_LEGACY_SCHEMA")
            .env_remove("DECKTREE_DEFAULT_DECK_ID")
            .env_remove("DECKTREE_SECONDS_PER_CARD")
            .env_remove("RUST_LOG");
        cmd
    }
}

#[test]
fn test_list_shows_visible_decks_and_totals() {
    let env = Env::new();
    env.cmd()
        .args(["list", "--snapshot"])
        .arg(env.snapshot())
        .assert()
        .success()
        .stdout(predicate::str::contains("Languages"))
        .stdout(predicate::str::contains("Spanish"))
        .stdout(predicate::str::contains("Science"))
        // Physics sits under a collapsed deck
        .stdout(predicate::str::contains("Physics").not())
        .stdout(predicate::str::contains("50 due, about 9 min."));
}

#[test]
fn test_naked_invocation_lists() {
    let env = Env::new();
    env.cmd()
        .env("DECKTREE_SNAPSHOT", env.snapshot())
        .assert()
        .success()
        .stdout(predicate::str::contains("Languages"));
}

#[test]
fn test_filter_keeps_parents() {
    let env = Env::new();
    env.cmd()
        .args(["list", "--filter", "phys", "--snapshot"])
        .arg(env.snapshot())
        .assert()
        .success()
        .stdout(predicate::str::contains("Science"))
        .stdout(predicate::str::contains("Languages").not());
}

#[test]
fn test_filter_without_matches() {
    let env = Env::new();
    env.cmd()
        .args(["list", "-f", "zzz", "-s"])
        .arg(env.snapshot())
        .assert()
        .success()
        .stdout(predicate::str::contains("No decks match \"zzz\"."));
}

#[test]
fn test_find_visible_and_hidden_decks() {
    let env = Env::new();
    env.cmd()
        .args(["find", "12", "-s"])
        .arg(env.snapshot())
        .assert()
        .success()
        .stdout(predicate::str::contains("Deck 12 is on row 3."));

    env.cmd()
        .args(["find", "21", "-s"])
        .arg(env.snapshot())
        .assert()
        .success()
        .stdout(predicate::str::contains("Deck 21 is not shown; nearest row is 4."));
}

#[test]
fn test_config_file_and_env_layering() {
    let env = Env::new();
    let config = env.temp.path().join("custom.toml");
    fs::write(&config, "seconds_per_card = 60\nlocale = \"tr_TR\"\n").unwrap();

    env.cmd()
        .args(["config", "--config"])
        .arg(&config)
        .env("DECKTREE_DEFAULT_DECK_ID", "5")
        .assert()
        .success()
        .stdout(predicate::str::contains("seconds_per_card = 60"))
        .stdout(predicate::str::contains("default_deck_id = 5"))
        .stdout(predicate::str::contains("locale = \"tr_TR\""));
}

#[test]
fn test_missing_snapshot_is_an_error() {
    let env = Env::new();
    env.cmd()
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("--snapshot"));
}

#[test]
fn test_malformed_snapshot_is_an_error() {
    let env = Env::new();
    let bad = env.temp.path().join("bad.json");
    fs::write(&bad, r#"{ "schema": "modern", "decks": [ { "id": 1 } ] }"#).unwrap();

    env.cmd()
        .args(["list", "-s"])
        .arg(&bad)
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error:"));
}
