use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::tempdir;

fn currmap(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("currmap").unwrap();
    cmd.env("CURRMAP_ROOT", root)
        .env("XDG_CONFIG_HOME", root.join("xdg"))
        .env("NO_COLOR", "1")
        .env_remove("CURRMAP_CONFIG")
        .env_remove("CURRMAP_DB_PATH")
        .env_remove("CURRMAP_STRICT_REFERENCES")
        .env_remove("CURRMAP_SUGGESTION_MODE")
        .env_remove("CURRMAP_TRENDS_TOP_N")
        .env_remove("CURRMAP_MARKET_CATALOG")
        .env_remove("CURRMAP_ROBOT")
        .env_remove("CURRMAP_ROBOT_FORMAT")
        .env_remove("RUST_LOG");
    cmd
}

fn robot_json(root: &Path, args: &[&str]) -> Value {
    let output = currmap(root).arg("--robot").args(args).output().unwrap();
    assert!(
        output.status.success(),
        "currmap {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

fn seeded() -> tempfile::TempDir {
    let dir = tempdir().unwrap();
    currmap(dir.path()).arg("seed").assert().success();
    dir
}

#[test]
fn test_cli_help() {
    Command::cargo_bin("currmap")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_cli_version() {
    Command::cargo_bin("currmap")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_init_creates_store_and_config() {
    let dir = tempdir().unwrap();
    let json = robot_json(dir.path(), &["init"]);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["data"]["schema_version"], 2);
    assert_eq!(json["data"]["config_written"], true);
    assert!(dir.path().join("currmap.db").exists());
    assert!(dir.path().join("config.toml").exists());

    let again = robot_json(dir.path(), &["init"]);
    assert_eq!(again["data"]["config_written"], false);
}

#[test]
fn test_seed_then_status_counts() {
    let dir = seeded();
    let json = robot_json(dir.path(), &["status"]);
    let counts = &json["data"]["counts"];
    assert_eq!(counts["skills"], 10);
    assert_eq!(counts["standards"], 5);
    assert_eq!(counts["jobs"], 7);
    assert_eq!(counts["courses"], 2);
    assert_eq!(counts["objectives"], 4);
    assert_eq!(json["data"]["reference_policy"], "lossy");
    assert!(json["data"]["dropped_references"].as_array().unwrap().is_empty());
}

#[test]
fn test_analyze_console_report() {
    let dir = seeded();
    currmap(dir.path())
        .arg("analyze")
        .assert()
        .success()
        .stdout(predicate::str::contains("Analyzing course: Introduction to Programming"))
        .stdout(predicate::str::contains("Industry Standards Alignment:"))
        .stdout(predicate::str::contains("- Software Development: 50.0%"))
        .stdout(predicate::str::contains("- Artificial Intelligence: 33.33%"))
        .stdout(predicate::str::contains("Job Requirements Alignment:"))
        .stdout(predicate::str::contains("- Full Stack Developer: 20.0%"))
        .stdout(predicate::str::contains(
            "Consider adding the following skills to your curriculum:",
        ))
        .stdout(predicate::str::contains(
            "- Big Data: Experience with big data technologies",
        ));
}

#[test]
fn test_analyze_on_empty_store() {
    let dir = tempdir().unwrap();
    currmap(dir.path())
        .arg("analyze")
        .assert()
        .success()
        .stdout(predicate::str::contains("No improvements suggested."));
}

#[test]
fn test_analyze_robot_report() {
    let dir = seeded();
    let json = robot_json(dir.path(), &["analyze", "--suggestions", "per-course"]);
    let coverage = json["data"]["coverage"].as_array().unwrap();
    assert_eq!(coverage.len(), 2);
    assert_eq!(coverage[0]["course_id"], "CS101");
    assert_eq!(coverage[0]["standards"][0]["percentage"], 50.0);
    assert_eq!(json["data"]["suggestions"]["mode"], "per-course");
}

#[test]
fn test_gaps_lines() {
    let dir = seeded();
    currmap(dir.path())
        .arg("gaps")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Missing skills for standard Software Development: SKILL5",
        ))
        .stdout(predicate::str::contains(
            "Missing skills for job Cloud Engineer: SKILL6, SKILL7, SKILL9",
        ));
}

#[test]
fn test_suggest_per_course() {
    let dir = seeded();
    currmap(dir.path())
        .args(["suggest", "--per-course"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Course CS101 (Introduction to Programming) could cover these skills from Software Development: SKILL2, SKILL5",
        ))
        .stdout(predicate::str::contains(
            "Course CS201 (Data Structures) could cover these skills for Junior Developer: SKILL1, SKILL5, SKILL8",
        ));
}

#[test]
fn test_map_robot() {
    let dir = seeded();
    let json = robot_json(dir.path(), &["map"]);
    let first = &json["data"][0];
    assert_eq!(first["course_id"], "CS101");
    let standards: Vec<_> = first["standards"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    assert_eq!(standards, vec!["STD1", "STD2", "STD5"]);
}

#[test]
fn test_trends_top_skills() {
    let dir = tempdir().unwrap();
    let json = robot_json(dir.path(), &["trends", "--top", "3"]);
    let trends = json["data"]["trends"].as_array().unwrap();
    assert_eq!(trends.len(), 3);
    assert_eq!(trends[0]["skill"], "python");
    assert_eq!(trends[0]["count"], 4);
    assert_eq!(json["data"]["postings"], 5);

    currmap(dir.path())
        .arg("trends")
        .assert()
        .success()
        .stdout(predicate::str::contains("Job Market Trends (Top 10 skills):"))
        .stdout(predicate::str::contains("- python: 4"));
}

#[test]
fn test_ingest_keyword_batch_and_show() {
    let dir = tempdir().unwrap();
    let batch = dir.path().join("batch.yaml");
    std::fs::write(
        &batch,
        r"
courses:
  - id: CS101
    name: Introduction to Programming
    objectives:
      - id: CS101-1
        description: Write simple programs
        difficulty: 2
        keywords: [coding, Python]
jobs:
  - id: JR001
    title: Junior Software Developer
    keywords: [python, javascript, git, agile]
",
    )
    .unwrap();

    let json = robot_json(dir.path(), &["ingest", batch.to_str().unwrap()]);
    assert_eq!(json["data"]["courses"], 1);
    assert_eq!(json["data"]["keyword_skills"], 5);

    let shown = robot_json(dir.path(), &["show", "course", "CS101"]);
    assert_eq!(shown["data"]["kind"], "course");
    assert_eq!(shown["data"]["objectives"][0]["difficulty"], 2);
    assert_eq!(shown["data"]["objectives"][0]["skills"][1], "python");

    currmap(dir.path())
        .arg("gaps")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Missing skills for job Junior Software Developer: agile, git, javascript",
        ));
}

#[test]
fn test_list_kinds() {
    let dir = seeded();
    let json = robot_json(dir.path(), &["list", "jobs"]);
    assert_eq!(json["data"]["count"], 7);
    assert_eq!(json["data"]["items"][0]["id"], "JOB1");

    currmap(dir.path())
        .args(["list", "skill"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Python Programming"));
}

#[test]
fn test_show_missing_entity_fails() {
    let dir = tempdir().unwrap();
    currmap(dir.path())
        .args(["show", "course", "NOPE"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("course not found: NOPE"));

    let output = currmap(dir.path())
        .args(["--robot", "show", "course", "NOPE"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["status"]["error"]["numeric_code"], 101);
}

#[test]
fn test_ingest_rejects_unknown_extension() {
    let dir = tempdir().unwrap();
    let batch = dir.path().join("batch.csv");
    std::fs::write(&batch, "id,name\n").unwrap();
    currmap(dir.path())
        .args(["ingest", batch.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported batch format"));
}

#[test]
fn test_dangling_reference_policies() {
    let dir = tempdir().unwrap();
    let batch = dir.path().join("batch.json");
    std::fs::write(
        &batch,
        r#"{
            "skills": [{"id": "S1", "name": "python"}],
            "standards": [{"id": "STD1", "name": "Mixed", "skills": ["S1", "GHOST"]}]
        }"#,
    )
    .unwrap();
    currmap(dir.path())
        .args(["ingest", batch.to_str().unwrap()])
        .assert()
        .success();

    let json = robot_json(dir.path(), &["status"]);
    let dropped = json["data"]["dropped_references"].as_array().unwrap();
    assert_eq!(dropped.len(), 1);
    assert_eq!(dropped[0]["skill_id"], "GHOST");
    assert!(json["warnings"][0].as_str().unwrap().contains("GHOST"));

    currmap(dir.path())
        .env("CURRMAP_STRICT_REFERENCES", "1")
        .arg("gaps")
        .assert()
        .failure()
        .stderr(predicate::str::contains("GHOST"));
}

#[test]
fn test_import_keywords_on_fresh_store() {
    let dir = tempdir().unwrap();
    let json = robot_json(dir.path(), &["import-keywords"]);
    assert_eq!(json["data"]["imported"], 0);
}

#[test]
fn test_robot_errors_from_env_and_config() {
    let dir = tempdir().unwrap();
    let output = currmap(dir.path())
        .env("CURRMAP_ROBOT", "1")
        .args(["show", "course", "NOPE"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["status"]["error"]["numeric_code"], 101);
    assert!(!String::from_utf8_lossy(&output.stderr).contains("Error: course not found"));

    std::fs::write(dir.path().join("config.toml"), "[robot]\nenabled = true\n").unwrap();
    let output = currmap(dir.path())
        .args(["show", "job", "NOPE"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["status"]["error"]["code"], "ENTITY_NOT_FOUND");
}

#[test]
fn test_dangling_objective_reference_names_its_course() {
    let dir = tempdir().unwrap();
    let batch = dir.path().join("batch.json");
    std::fs::write(
        &batch,
        r#"{
            "skills": [{"id": "S1", "name": "python"}],
            "courses": [{
                "id": "C1",
                "name": "Intro",
                "objectives": [{"id": "C1-1", "description": "basics", "skills": ["S1", "GHOST"]}]
            }]
        }"#,
    )
    .unwrap();
    currmap(dir.path())
        .args(["ingest", batch.to_str().unwrap()])
        .assert()
        .success();

    let json = robot_json(dir.path(), &["status"]);
    let dropped = &json["data"]["dropped_references"][0];
    assert_eq!(dropped["kind"], "course");
    assert_eq!(dropped["entity_id"], "C1");
    assert_eq!(dropped["objective_id"], "C1-1");

    let shown = robot_json(dir.path(), &["show", "course", "C1"]);
    assert_eq!(shown["data"]["id"], "C1");
}
