use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn pomo(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pomo").unwrap();
    cmd.arg("--config").arg(dir.path().join("config.json"));
    cmd
}

#[test]
fn dial_quarter_turn_back_removes_fifteen_minutes() {
    let dir = TempDir::new().unwrap();
    pomo(&dir)
        .args(["dial", "--remaining", "25m", "--total", "60m"])
        .args(["--point", "-1,0", "--point", "0,1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("remaining 10:00 of 60:00 (0 boundary hits)"));
}

#[test]
fn dial_reports_boundary_hit() {
    let dir = TempDir::new().unwrap();
    pomo(&dir)
        .args(["dial", "--remaining", "1m"])
        .args(["--point", "-1,0", "--point", "0,1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("remaining 00:00 of 60:00 (1 boundary hit)"));
}

#[test]
fn dial_uses_configured_range() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.json"),
        r#"{ "dial_minutes": 30, "default_minutes": 10 }"#,
    )
    .unwrap();

    pomo(&dir)
        .args(["dial", "--point", "-1,0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("remaining 10:00 of 30:00"));
}

#[test]
fn dial_writes_template_config() {
    let dir = TempDir::new().unwrap();
    pomo(&dir).args(["dial", "--point", "1,0"]).assert().success();

    let written = std::fs::read_to_string(dir.path().join("config.json")).unwrap();
    assert!(written.contains("\"dial_minutes\": 60"));
}

#[test]
fn rejects_bad_point() {
    let dir = TempDir::new().unwrap();
    pomo(&dir)
        .args(["dial", "--point", "north"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected DX,DY"));
}

#[test]
fn rejects_bad_duration() {
    let dir = TempDir::new().unwrap();
    pomo(&dir)
        .args(["start", "--duration", "10x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid character in duration"));
}

#[test]
fn rejects_zero_duration() {
    let dir = TempDir::new().unwrap();
    pomo(&dir)
        .args(["start", "--duration", "0s"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Duration must be greater than 0"));
}

#[test]
fn invalid_config_is_an_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.json"), r#"{ "tick_interval_ms": 0 }"#).unwrap();

    pomo(&dir)
        .args(["dial", "--point", "1,0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("tick_interval_ms must be greater than 0"));
}
