//! Smoke tests for the `wl` binary: init → create → ready → status → done.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn wl(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("wl").expect("wl binary");
    cmd.current_dir(dir.path());
    // keep discovery inside the temp dir even when the suite runs from a
    // directory that has its own workspace
    cmd.env("WAYLINE_DIR", dir.path().join(".wayline"));
    cmd
}

fn create_json(dir: &TempDir, title: &str) -> serde_json::Value {
    let out = wl(dir)
        .args(["create", title, "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&out).expect("waypoint json")
}

#[test]
fn commands_without_a_workspace_fail() {
    let dir = TempDir::new().unwrap();
    wl(&dir)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no wayline workspace"));
}

#[test]
fn init_create_ready_done_flow() {
    let dir = TempDir::new().unwrap();

    wl(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized wayline workspace"));

    let first = create_json(&dir, "scout the valley");
    let first_id = first["id"].as_str().unwrap().to_string();
    assert_eq!(first["status"], "ready");

    wl(&dir)
        .arg("ready")
        .assert()
        .success()
        .stdout(predicate::str::contains("scout the valley"));

    wl(&dir)
        .args(["status", &first_id, "done"])
        .assert()
        .success()
        .stdout(predicate::str::contains("done"));

    wl(&dir)
        .arg("ready")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing ready"));
}

#[test]
fn dependency_edges_drive_the_route() {
    let dir = TempDir::new().unwrap();
    wl(&dir).arg("init").assert().success();

    let a = create_json(&dir, "first leg");
    let a_id = a["id"].as_str().unwrap();
    let b = create_json(&dir, "second leg");
    let b_id = b["id"].as_str().unwrap();

    wl(&dir)
        .args(["dep", "add", b_id, a_id])
        .assert()
        .success();

    // self-dependency is refused
    wl(&dir)
        .args(["dep", "add", a_id, a_id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot depend on itself"));

    // closing the loop is refused
    wl(&dir)
        .args(["dep", "add", a_id, b_id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cycle"));

    let out = wl(&dir)
        .args(["route", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let route: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(route[0]["id"], a_id);
    assert_eq!(route[1]["id"], b_id);
    assert_eq!(route[1]["status"], "blocked");
}

#[test]
fn branch_merge_via_cli() {
    let dir = TempDir::new().unwrap();
    wl(&dir).arg("init").assert().success();

    wl(&dir)
        .args(["branch", "create", "side"])
        .assert()
        .success();

    wl(&dir)
        .args(["--branch", "side", "create", "detour"])
        .assert()
        .success();

    wl(&dir)
        .args(["merge", "side", "main"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 waypoint(s) copied"));

    wl(&dir)
        .args(["branch", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("side"));

    // empty source is a warning, not an error
    wl(&dir)
        .args(["merge", "ghost", "main"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no waypoints"));
}
