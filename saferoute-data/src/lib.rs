//! Hazard feed access for the SafeRoute planner.
//!
//! Responsibilities:
//! - Decode the reporting backend's hazard feed.
//! - Provide [`HazardSource`](saferoute_core::HazardSource) adapters for saved
//!   feeds and for the live backend over HTTP.
//!
//! Boundaries:
//! - Do not encode planning rules (live in `saferoute-core`).
//! - Keep blocking I/O off async executors; the HTTP adapter bridges to its
//!   own runtime.
//!
//! Invariants:
//! - Feed order is preserved; entries without a usable position are dropped.
//! - No global mutable state.

pub mod feed;

#[cfg(feature = "http")]
pub use feed::{DEFAULT_USER_AGENT, HttpHazardSource, HttpHazardSourceConfig, SourceBuildError};
pub use feed::{FileHazardSource, parse_hazard_feed};
