use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

const VOLUNTEER: &str = r#"{
    "interests": "education, teaching, children",
    "skills": "teaching, mentoring",
    "city": "Bangalore",
    "availability": "weekends"
}"#;

const NGOS: &str = r#"[
    {"name": "City Clinic", "interests": "healthcare", "city": "Mumbai", "availability": "weekdays"},
    {"name": "Teach Bangalore", "interests": "education", "city": "Bangalore", "availability": "weekends"}
]"#;

const CAUSES: &str = r#"[
    {"_id": "c1", "name": "Reading Buddies", "description": "Help children practice reading", "category": "education", "city": "Chennai"},
    {"_id": "c2", "name": "Tree Planting", "description": "Plant native trees", "category": "environment", "city": "Bangalore"},
    {"_id": "c3", "name": "Literacy Drive", "description": "Teach adults reading", "category": "education", "city": "Delhi"}
]"#;

/// A scratch directory with fixture files and no config on the search path.
fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("volunteer.json"), VOLUNTEER).unwrap();
    fs::write(dir.path().join("ngos.json"), NGOS).unwrap();
    fs::write(dir.path().join("ngo.json"), r#"{"interests": "education", "city": "Bangalore", "availability": "weekends"}"#).unwrap();
    fs::write(dir.path().join("causes.json"), CAUSES).unwrap();
    dir
}

fn impactmatch(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("impactmatch").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("IMPACTMATCH_CONFIG")
        .env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", dir.path().join("xdg"))
        .env("HOME", dir.path());
    cmd
}

fn json_stdout(cmd: &mut Command) -> Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn score_prints_json_result() {
    let dir = workspace();
    let value = json_stdout(impactmatch(&dir).args(["score", "volunteer.json", "ngo.json", "--json"]));

    assert_eq!(value["matchScore"], 72);
    assert_eq!(value["matchLevel"], "HIGH");
    assert_eq!(value["reasons"][2], "Both in Bangalore");
}

#[test]
fn score_reads_volunteer_from_stdin() {
    let dir = workspace();
    let value = json_stdout(
        impactmatch(&dir)
            .args(["score", "-", "ngo.json", "--json"])
            .write_stdin(VOLUNTEER),
    );
    assert_eq!(value["matchScore"], 72);
}

#[test]
fn score_text_output() {
    let dir = workspace();
    impactmatch(&dir)
        .args(["--no-color", "score", "volunteer.json", "ngo.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("72/100"))
        .stdout(predicate::str::contains("Weekend availability matches"));
}

#[test]
fn rank_orders_and_limits() {
    let dir = workspace();
    let value = json_stdout(impactmatch(&dir).args(["rank", "volunteer.json", "ngos.json", "--limit", "1", "--json"]));

    let ranked = value.as_array().unwrap();
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0]["ngo"]["name"], "Teach Bangalore");
}

#[test]
fn filter_by_city() {
    let dir = workspace();
    let value = json_stdout(impactmatch(&dir).args(["filter", "causes.json", "--cities", "bangalore", "--json"]));

    let feed = value.as_array().unwrap();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0]["name"], "Tree Planting");
    assert_eq!(feed[0]["relevanceScore"], 0.0);
}

#[test]
fn feed_ranks_selected_causes() {
    let dir = workspace();
    let value = json_stdout(
        impactmatch(&dir).args(["feed", "volunteer.json", "causes.json", "--categories", "education", "--json"]),
    );

    let ranked = value.as_array().unwrap();
    assert_eq!(ranked.len(), 2);
    assert!(ranked.iter().all(|r| r["cause"]["category"] == "education"));
}

#[test]
fn discover_only_nearby() {
    let dir = workspace();
    let value = json_stdout(impactmatch(&dir).args(["discover", "volunteer.json", "causes.json", "--json"]));

    let matches = value["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0]["name"], "Reading Buddies");
}

#[test]
fn suggest_message() {
    let dir = workspace();
    let value = json_stdout(impactmatch(&dir).args(["suggest", "--query", "reading", "causes.json", "--json"]));

    assert_eq!(value["message"], "I found 2 causes that might interest you!");
}

#[test]
fn suggest_blank_query_fails() {
    let dir = workspace();
    impactmatch(&dir)
        .args(["suggest", "--query", " ", "causes.json", "--json"])
        .assert()
        .code(4)
        .stdout(predicate::str::contains("E9002"));
}

#[test]
fn nearby_with_distance() {
    let dir = workspace();
    let value = json_stdout(impactmatch(&dir).args(["nearby", "Mumbai", "--to", "Pune", "--json"]));

    assert_eq!(value["nearby"], serde_json::json!(["Mumbai", "Pune", "Surat"]));
    let km = value["distanceKm"].as_f64().unwrap();
    assert!(km > 100.0 && km < 140.0);
}

#[test]
fn missing_input_file_fails() {
    let dir = workspace();
    impactmatch(&dir)
        .args(["--no-color", "score", "nope.json", "ngo.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("File not found: nope.json"));
}

#[test]
fn missing_input_file_reports_code_in_json() {
    let dir = workspace();
    impactmatch(&dir)
        .args(["rank", "volunteer.json", "missing-ngos.json", "--json"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("E2001"));
}

#[test]
fn nearby_blank_city_is_rejected() {
    let dir = workspace();
    impactmatch(&dir)
        .args(["--no-color", "nearby", "  "])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("city: Field is required"));
}

#[test]
fn nan_threshold_exits_with_config_code() {
    let dir = workspace();
    fs::write(
        dir.path().join("nan.toml"),
        "[matching]\ncause_similarity_threshold = nan\n",
    )
    .unwrap();

    impactmatch(&dir)
        .args(["--config", "nan.toml", "config"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("matching.cause_similarity_threshold"));
}

#[test]
fn config_file_changes_limits() {
    let dir = workspace();
    fs::write(dir.path().join(".impactmatch.toml"), "[suggest]\nlimit = 1\n").unwrap();

    let value = json_stdout(impactmatch(&dir).args(["suggest", "-q", "reading", "causes.json", "--json"]));
    assert_eq!(value["suggestions"].as_array().unwrap().len(), 1);
}

#[test]
fn invalid_config_exits_with_config_code() {
    let dir = workspace();
    fs::write(dir.path().join("bad.toml"), "[matching.weights]\ncause = 0.9\n").unwrap();

    impactmatch(&dir)
        .args(["--config", "bad.toml", "config"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("sum to 1.0"));
}

#[test]
fn config_prints_defaults() {
    let dir = workspace();
    impactmatch(&dir)
        .args(["--no-color", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[discover]"))
        .stdout(predicate::str::contains("Using built-in defaults"));
}
