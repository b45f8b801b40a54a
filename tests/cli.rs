use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn subsplit(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("subsplit").unwrap();
    cmd.env("SUBSPLIT_DATA_DIR", dir.path());
    cmd.env_remove("SUBSPLIT_LOG");
    cmd
}

fn with_sample() -> TempDir {
    let dir = TempDir::new().unwrap();
    subsplit(&dir)
        .args(["init", "--sample"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"));
    dir
}

#[test]
fn init_creates_tables_and_settings() {
    let dir = with_sample();
    assert!(dir.path().join("config.json").exists());
    assert!(dir.path().join("data").join("service.json").exists());
    assert!(dir.path().join("data").join("subscription change log.json").exists());
}

#[test]
fn services_report_shows_coverage() {
    let dir = with_sample();
    subsplit(&dir)
        .args(["report", "services", "--as-of", "2024-05-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SPOTIFY"))
        .stdout(predicate::str::contains("Jul 17 (2 months)"))
        .stdout(predicate::str::contains("OVERDUE"))
        .stdout(predicate::str::contains("Overdue: 3"));
}

#[test]
fn outstanding_report_csv() {
    let dir = with_sample();
    subsplit(&dir)
        .args(["report", "outstanding", "--as-of", "2024-05-10", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "As Of,Member ID,Member,Service,Paid,Owed,Balance",
        ))
        .stdout(predicate::str::contains(
            "2024-05-10,recDave,Dave,YouTube Premium,200.00,349.00,-149.00",
        ));
}

#[test]
fn members_report_json_to_file() {
    let dir = with_sample();
    let output = dir.path().join("members.json");

    subsplit(&dir)
        .args(["report", "members", "--as-of", "2024-05-10", "--format", "json", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Report exported to:"));

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(value["kind"], "members");
    assert_eq!(value["report"]["members"][1]["name"], "Bob");
}

#[test]
fn data_check_reports_skipped_references() {
    let dir = with_sample();
    subsplit(&dir)
        .args(["data", "check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 reference(s) will be skipped"))
        .stdout(predicate::str::contains("Netflix"));
}

#[test]
fn report_without_data_fails() {
    let dir = TempDir::new().unwrap();
    subsplit(&dir)
        .args(["report", "outstanding"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn malformed_table_fails_with_table_name() {
    let dir = with_sample();
    std::fs::write(
        dir.path().join("data").join("service.json"),
        r#"[{"id": "recS1", "Name": "Spotify"}]"#,
    )
    .unwrap();

    subsplit(&dir)
        .args(["report", "services"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("service"))
        .stderr(predicate::str::contains("price"));
}

#[test]
fn invalid_as_of_is_rejected() {
    let dir = with_sample();
    subsplit(&dir)
        .args(["report", "services", "--as-of", "May 10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("YYYY-MM-DD"));
}
