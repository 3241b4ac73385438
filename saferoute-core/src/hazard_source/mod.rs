//! Retrieve the hazards a route should keep clear of.
//!
//! The [`HazardSource`] trait abstracts where hazard reports come from: a
//! saved feed on disk, the reporting backend over HTTP, or an in-memory list
//! in tests. Callers receive the reports in feed order and hand them to the
//! [`DetourPlanner`](crate::DetourPlanner).

mod error;
mod provider;

pub use error::HazardSourceError;
pub use provider::HazardSource;
