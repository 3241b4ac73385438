//! Hazard feed decoding and sources.
//!
//! The backend's "list all hazards" endpoint (`GET /crime/all`) answers with
//! either a bare array of reports or an envelope of the form
//! `{"locations": [...], "apiKey": "..."}`. Each report looks like
//! `{"position": {"lat": .., "lng": ..}, "title": "..", "info": ".."}`.
//!
//! [`parse_hazard_feed`] accepts both shapes. [`FileHazardSource`] reads a
//! saved feed from disk and, with the `http` feature, [`HttpHazardSource`]
//! fetches the live feed.
//!
//! # Example
//!
//! ```no_run
//! use saferoute_core::HazardSource;
//! use saferoute_data::FileHazardSource;
//!
//! let source = FileHazardSource::new("hazards.json");
//! let hazards = source.list_hazards()?;
//! println!("{} hazards on record", hazards.len());
//! # Ok::<(), saferoute_core::HazardSourceError>(())
//! ```

mod file;
#[cfg(feature = "http")]
mod provider;
mod wire;

#[doc(hidden)]
pub mod test_support;

pub use file::FileHazardSource;
#[cfg(feature = "http")]
pub use provider::{DEFAULT_USER_AGENT, HttpHazardSource, HttpHazardSourceConfig, SourceBuildError};
pub use wire::parse_hazard_feed;
