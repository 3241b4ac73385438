//! Test utilities for hazard sources.
//!
//! [`StubHazardSource`] is a deterministic stand-in for the HTTP source that
//! replays a canned feed body or error without touching the network.

use saferoute_core::{HazardPoint, HazardSource, HazardSourceError};

use super::wire::parse_hazard_feed;

/// Stub `HazardSource` for testing.
///
/// # Example
///
/// ```
/// use saferoute_core::HazardSource;
/// use saferoute_data::feed::test_support::StubHazardSource;
///
/// let source = StubHazardSource::with_feed(
///     r#"[{"position": {"lat": 35.0, "lng": 136.0}, "title": "t", "info": ""}]"#,
/// );
/// assert_eq!(source.list_hazards().map(|h| h.len()), Ok(1));
/// ```
#[derive(Debug, Clone)]
pub struct StubHazardSource {
    response: StubResponse,
}

#[derive(Debug, Clone)]
enum StubResponse {
    Feed(String),
    Error(HazardSourceError),
}

impl StubHazardSource {
    /// Create a source that decodes `body` as if the backend had sent it.
    #[must_use]
    pub fn with_feed(body: impl Into<String>) -> Self {
        Self {
            response: StubResponse::Feed(body.into()),
        }
    }

    /// Create a source that fails every call with `error`.
    #[must_use]
    pub const fn with_error(error: HazardSourceError) -> Self {
        Self {
            response: StubResponse::Error(error),
        }
    }
}

impl HazardSource for StubHazardSource {
    fn list_hazards(&self) -> Result<Vec<HazardPoint>, HazardSourceError> {
        match &self.response {
            StubResponse::Feed(body) => parse_hazard_feed(body),
            StubResponse::Error(error) => Err(error.clone()),
        }
    }
}
