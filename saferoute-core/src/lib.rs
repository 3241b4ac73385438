//! Core domain types for the SafeRoute planner.
//!
//! The crate turns a list of reported hazards and a pair of route endpoints
//! into at most one pass-through waypoint that bends the route away from the
//! nearest hazard. It performs no I/O: hazard feeds are reached through the
//! [`HazardSource`] trait, implemented in `saferoute-data`.
//!
//! Constructors validate their input and return `Result`, so a [`GeoPoint`]
//! or [`PlannerConfig`] in hand is always usable.
//!
//! # Examples
//!
//! ```
//! use saferoute_core::{GeoPoint, HazardPoint, plan};
//!
//! let start = GeoPoint::new(35.0, 136.0)?;
//! let end = GeoPoint::new(35.01, 136.0)?;
//! let hazards = [HazardPoint::unlabelled(GeoPoint::new(35.005, 136.001)?)];
//!
//! let waypoints = plan(Some(start), Some(end), &hazards);
//! assert_eq!(waypoints.len(), 1);
//! assert!(waypoints[0].location.longitude() < 136.001);
//! # Ok::<(), saferoute_core::GeoPointError>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod geodesy;
mod hazard;
pub mod hazard_source;
mod planner;
mod point;
mod route;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use hazard::HazardPoint;
pub use hazard_source::{HazardSource, HazardSourceError};
pub use planner::{
    DEFAULT_ALERT_RADIUS_M, DEFAULT_DEFLECTION_M, Detour, DetourPlanner, PlannerConfig,
    PlannerConfigError, Side, Waypoint, plan,
};
pub use point::{GeoPoint, GeoPointError, ParseGeoPointError};
pub use route::{
    Endpoint, ParseTravelModeError, RouteLeg, RouteRequest, RouteRequestError, RouteSummary,
    TravelMode,
};
