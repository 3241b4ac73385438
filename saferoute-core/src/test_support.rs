//! Test-only, in-memory `HazardSource` used by unit and behaviour tests.

use crate::{HazardPoint, HazardSource, HazardSourceError};

/// In-memory [`HazardSource`] returning a fixed list or a fixed error.
///
/// # Examples
///
/// ```
/// use saferoute_core::test_support::MemoryHazardSource;
/// use saferoute_core::{GeoPoint, HazardPoint, HazardSource};
///
/// let hazard = HazardPoint::unlabelled(GeoPoint::new(35.0, 136.0).expect("valid"));
/// let source = MemoryHazardSource::with_hazard(hazard);
/// assert_eq!(source.list_hazards().expect("list").len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MemoryHazardSource {
    response: Result<Vec<HazardPoint>, HazardSourceError>,
}

impl Default for MemoryHazardSource {
    fn default() -> Self {
        Self {
            response: Ok(Vec::new()),
        }
    }
}

impl MemoryHazardSource {
    /// Create a source containing a single hazard.
    #[must_use]
    pub fn with_hazard(hazard: HazardPoint) -> Self {
        Self::with_hazards(std::iter::once(hazard))
    }

    /// Create a source from a collection of hazards, keeping their order.
    pub fn with_hazards<I>(hazards: I) -> Self
    where
        I: IntoIterator<Item = HazardPoint>,
    {
        Self {
            response: Ok(hazards.into_iter().collect()),
        }
    }

    /// Create a source whose every call fails with `error`.
    #[must_use]
    pub fn failing(error: HazardSourceError) -> Self {
        Self {
            response: Err(error),
        }
    }
}

impl HazardSource for MemoryHazardSource {
    fn list_hazards(&self) -> Result<Vec<HazardPoint>, HazardSourceError> {
        self.response.clone()
    }
}
