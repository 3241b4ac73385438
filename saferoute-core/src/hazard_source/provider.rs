//! The hazard source trait.

use crate::HazardPoint;

use super::error::HazardSourceError;

/// Fetch every hazard currently on record.
///
/// Implementations return reports in the order the backend lists them; the
/// planner's tie-break on equidistant hazards depends on that order.
///
/// # Examples
///
/// ```rust
/// use saferoute_core::{GeoPoint, HazardPoint, HazardSource, HazardSourceError};
///
/// struct Fixed(Vec<HazardPoint>);
///
/// impl HazardSource for Fixed {
///     fn list_hazards(&self) -> Result<Vec<HazardPoint>, HazardSourceError> {
///         Ok(self.0.clone())
///     }
/// }
///
/// let hazard = HazardPoint::unlabelled(GeoPoint::new(35.0, 136.0).expect("valid"));
/// let hazards = Fixed(vec![hazard]).list_hazards()?;
/// assert_eq!(hazards.len(), 1);
/// # Ok::<(), HazardSourceError>(())
/// ```
pub trait HazardSource {
    /// Return all known hazards.
    ///
    /// # Errors
    ///
    /// Returns [`HazardSourceError`] when the feed cannot be reached, read or
    /// decoded.
    fn list_hazards(&self) -> Result<Vec<HazardPoint>, HazardSourceError>;
}

impl<S: HazardSource + ?Sized> HazardSource for &S {
    fn list_hazards(&self) -> Result<Vec<HazardPoint>, HazardSourceError> {
        (**self).list_hazards()
    }
}

impl<S: HazardSource + ?Sized> HazardSource for Box<S> {
    fn list_hazards(&self) -> Result<Vec<HazardPoint>, HazardSourceError> {
        (**self).list_hazards()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use crate::GeoPoint;
    use crate::test_support::MemoryHazardSource;

    fn hazard(title: &str, lat: f64) -> HazardPoint {
        HazardPoint::new(
            GeoPoint::new(lat, 136.0).expect("valid test coordinate"),
            title,
            "",
        )
    }

    #[rstest]
    fn returns_hazards_in_feed_order() {
        let source = MemoryHazardSource::with_hazards([hazard("a", 35.0), hazard("b", 35.1)]);
        let titles: Vec<_> = source
            .list_hazards()
            .expect("memory source never fails")
            .into_iter()
            .map(|h| h.title)
            .collect();
        assert_eq!(titles, ["a", "b"]);
    }

    #[rstest]
    fn boxed_sources_delegate() {
        let source: Box<dyn HazardSource> =
            Box::new(MemoryHazardSource::with_hazards([hazard("a", 35.0)]));
        assert_eq!(source.list_hazards().expect("list").len(), 1);
    }

    #[rstest]
    fn failing_source_surfaces_error() {
        let err = HazardSourceError::Parse {
            message: "expected value".into(),
        };
        let source = MemoryHazardSource::failing(err.clone());
        assert_eq!(source.list_hazards(), Err(err));
    }
}
