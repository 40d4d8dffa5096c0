//! Integration tests for the `mallpath-cli` binary.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/venue_minimal.json")
}

fn cli() -> Command {
    Command::cargo_bin("mallpath-cli").expect("binary exists")
}

#[test]
fn validate_reports_clean_fixture() {
    cli()
        .arg("--venue")
        .arg(fixture_path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("6 waypoints declared"))
        .stdout(predicate::str::contains("No issues found."));
}

#[test]
fn validate_fails_on_bundled_venue_in_strict_mode() {
    cli()
        .arg("validate")
        .assert()
        .failure()
        .stdout(predicate::str::contains("waypoint W10 has no coordinates"))
        .stdout(predicate::str::contains(
            "waypoint E1 references undeclared neighbour E2",
        ))
        .stderr(predicate::str::contains("validation issue(s)"));
}

#[test]
fn validate_lenient_lists_issues_without_failing() {
    cli()
        .args(["--lenient", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("issue(s):"));
}

#[test]
fn validate_reports_asymmetric_edge_from_file() {
    let dir = TempDir::new().expect("create temp dir");
    let venue = dir.path().join("venue.json");
    fs::write(
        &venue,
        r#"{"waypoints":[
            {"id":"A","position":{"x":0,"y":0},"neighbours":["B"]},
            {"id":"B","position":{"x":1,"y":0}}
        ]}"#,
    )
    .expect("write venue");

    cli()
        .arg("--venue")
        .arg(&venue)
        .arg("validate")
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "waypoint A lists B but B does not list A",
        ));
}

#[test]
fn missing_venue_file_is_reported() {
    let dir = TempDir::new().expect("create temp dir");
    cli()
        .arg("--venue")
        .arg(dir.path().join("absent.json"))
        .arg("waypoints")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load venue"));
}

#[test]
fn path_prints_snapped_waypoints_and_coordinates() {
    cli()
        .arg("--venue")
        .arg(fixture_path())
        .args(["path", "--from", "1,1", "--to", "19,-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Start snapped to A"))
        .stdout(predicate::str::contains("End snapped to C"))
        .stdout(predicate::str::contains("Path (2 hops):"))
        .stdout(predicate::str::contains("- B (10, 0)"));
}

#[test]
fn path_json_output_is_machine_readable() {
    let output = cli()
        .arg("--venue")
        .arg(fixture_path())
        .args(["path", "--from", "0,0", "--to", "20,0", "--json"])
        .output()
        .expect("run cli");
    assert!(output.status.success());

    let body: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(body["waypoints"], serde_json::json!(["A", "B", "C"]));
    assert_eq!(body["hops"], 2);
    assert_eq!(body["start"]["id"], "A");
    assert_eq!(body["points"][1]["x"], 10.0);
}

#[test]
fn path_between_components_fails() {
    cli()
        .arg("--venue")
        .arg(fixture_path())
        .args(["path", "--from", "0,100", "--to", "120,100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no path found between X and Z"));
}

#[test]
fn path_on_bundled_venue_requires_lenient() {
    cli()
        .args(["path", "--from", "205,150", "--to", "100,55"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--lenient"));

    cli()
        .args(["--lenient", "path", "--from", "205,150", "--to", "100,55"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Start snapped to DS1"))
        .stdout(predicate::str::contains("- W11 (100, 50)"));
}

#[test]
fn malformed_point_is_rejected_by_argument_parser() {
    cli()
        .arg("--venue")
        .arg(fixture_path())
        .args(["path", "--from", "1;1", "--to", "0,0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected X,Y"));
}

#[test]
fn waypoints_lists_coordinates_and_degree() {
    cli()
        .arg("--venue")
        .arg(fixture_path())
        .arg("waypoints")
        .assert()
        .success()
        .stdout(predicate::str::contains("Venue: Minimal fixture venue"))
        .stdout(predicate::str::contains("- B (10, 0) degree 2"))
        .stdout(predicate::str::contains("- X (0, 100) degree 0"));
}
