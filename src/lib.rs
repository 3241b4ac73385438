//! Facade crate for the SafeRoute hazard-avoidance planner.
//!
//! This crate re-exports the core planning types and exposes the hazard feed
//! adapters behind feature flags.

#![forbid(unsafe_code)]

pub use saferoute_core::{
    DEFAULT_ALERT_RADIUS_M, DEFAULT_DEFLECTION_M, Detour, DetourPlanner, Endpoint, GeoPoint,
    GeoPointError, HazardPoint, HazardSource, HazardSourceError, ParseGeoPointError,
    ParseTravelModeError, PlannerConfig, PlannerConfigError, RouteLeg, RouteRequest,
    RouteRequestError, RouteSummary, Side, TravelMode, Waypoint, geodesy, plan,
};

#[cfg(feature = "data")]
pub use saferoute_data::{FileHazardSource, parse_hazard_feed};

#[cfg(feature = "http")]
pub use saferoute_data::{HttpHazardSource, HttpHazardSourceConfig, SourceBuildError};
