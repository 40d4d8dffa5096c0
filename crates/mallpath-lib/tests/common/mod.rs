#![allow(dead_code)]

use std::path::PathBuf;

use mallpath_lib::{ValidationMode, VenueData, VenueGraph};

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

pub fn fixture_path() -> PathBuf {
    fixtures_dir().join("venue_minimal.json")
}

/// Chain A-B-C, isolated X, and a separate Y-Z component.
pub fn fixture_graph() -> VenueGraph {
    let data = VenueData::from_path(&fixture_path()).expect("load fixture venue");
    VenueGraph::build(data, ValidationMode::Strict).expect("fixture venue is valid")
}
