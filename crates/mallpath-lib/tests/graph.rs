mod common;

use mallpath_lib::{Error, Point, ValidationMode, VenueData, VenueGraph, VenueIssue};

use common::{fixture_graph, fixture_path};

#[test]
fn fixture_loads_in_strict_mode() {
    let graph = fixture_graph();

    assert_eq!(graph.len(), 6);
    assert_eq!(graph.name(), Some("Minimal fixture venue"));
    assert!(graph.issues().is_empty());
    assert_eq!(graph.neighbours("B"), ["A".to_string(), "C".to_string()]);
    assert!(graph.neighbours("X").is_empty());
}

#[test]
fn adjacency_is_symmetric_in_fixture() {
    let graph = fixture_graph();
    for waypoint in graph.waypoints() {
        for neighbour in graph.neighbours(&waypoint.id) {
            assert!(
                graph.neighbours(neighbour).contains(&waypoint.id),
                "{} -> {} has no reverse edge",
                waypoint.id,
                neighbour
            );
        }
    }
}

#[test]
fn every_fixture_waypoint_has_coordinates() {
    let graph = fixture_graph();
    for waypoint in graph.waypoints() {
        assert!(graph.coordinates(&waypoint.id).is_ok());
    }
    assert_eq!(graph.coordinates("C").unwrap(), Point::new(20.0, 0.0));
}

#[test]
fn bundled_venue_is_rejected_in_strict_mode() {
    let error = VenueGraph::bundled(ValidationMode::Strict).expect_err("bundled data is incomplete");
    match error {
        Error::InvalidVenue { issues } => {
            assert!(issues.contains(&VenueIssue::MissingPosition {
                waypoint: "W10".to_string()
            }));
            for undeclared in ["W22", "E2", "E33", "E44"] {
                assert!(
                    issues.iter().any(|issue| matches!(
                        issue,
                        VenueIssue::UnknownNeighbour { neighbour, .. } if neighbour == undeclared
                    )),
                    "{undeclared} should be flagged"
                );
            }
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn bundled_venue_loads_in_lenient_mode() {
    let graph = VenueGraph::bundled(ValidationMode::Lenient).expect("lenient load");

    assert!(!graph.issues().is_empty());
    let positioned: Vec<_> = graph.positioned().map(|(id, _)| id).collect();
    assert_eq!(positioned, vec!["DS1", "MA9", "W11"]);
    assert_eq!(graph.neighbours("E1"), ["SB1".to_string()]);
    assert!(!graph.contains("E2"));
}

#[test]
fn strict_mode_rejects_asymmetric_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("venue.json");
    std::fs::write(
        &path,
        r#"{"waypoints":[
            {"id":"A","position":{"x":0,"y":0},"neighbours":["B"]},
            {"id":"B","position":{"x":1,"y":0}}
        ]}"#,
    )
    .unwrap();

    let data = VenueData::from_path(&path).unwrap();
    let error = VenueGraph::build(data, ValidationMode::Strict).unwrap_err();
    assert!(error.to_string().contains("does not list A"));
}

#[test]
fn malformed_json_surfaces_parse_error() {
    let error = VenueData::from_json_str("{\"waypoints\": [").unwrap_err();
    assert!(matches!(error, Error::Json(_)));
}

#[test]
fn fixture_path_exists() {
    assert!(fixture_path().exists());
}
