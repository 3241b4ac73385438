//! Test helpers for plan CLI fixtures and stub hazard sources.

use super::*;
use crate::plan::{HazardSourceBuilder, HazardSourceSpec};
use camino::Utf8Path;
use saferoute_core::test_support::MemoryHazardSource;
use saferoute_core::{GeoPoint, HazardPoint, HazardSource};
use std::cell::RefCell;
use std::fs;

/// A two-hazard feed: one beside the 35.0,136.0 -> 35.01,136.0 route and
/// one far to the east.
pub(super) const SAMPLE_FEED: &str = r#"{
    "locations": [
        {"position": {"lat": 35.005, "lng": 136.001}, "title": "Chu 1-chome", "info": "phone pointed at children"},
        {"position": {"lat": 35.005, "lng": 136.05}, "title": "Nishigo", "info": "camera pointed at children"}
    ],
    "apiKey": "not-for-output"
}"#;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path, contents).expect("write fixture file");
}

pub(super) fn hazard_beside_route() -> HazardPoint {
    HazardPoint::new(
        GeoPoint::new(35.005, 136.001).expect("valid hazard"),
        "Chu 1-chome",
        "phone pointed at children",
    )
}

/// Builder that hands out an in-memory source and records what it was asked for.
pub(super) struct StubHazardSourceBuilder {
    source: MemoryHazardSource,
    pub(super) requested: RefCell<Vec<HazardSourceSpec>>,
}

impl StubHazardSourceBuilder {
    pub(super) fn new(source: MemoryHazardSource) -> Self {
        Self {
            source,
            requested: RefCell::new(Vec::new()),
        }
    }
}

impl HazardSourceBuilder for StubHazardSourceBuilder {
    fn build(&self, spec: &HazardSourceSpec) -> Result<Box<dyn HazardSource>, CliError> {
        self.requested.borrow_mut().push(spec.clone());
        Ok(Box::new(self.source.clone()))
    }
}
