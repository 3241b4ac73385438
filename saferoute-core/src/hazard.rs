use crate::GeoPoint;

/// A reported hazard location.
///
/// `title` is the short label the backend stores (usually the place name the
/// report was geocoded from) and `info` is the free-text description.
///
/// # Examples
/// ```
/// use saferoute_core::{GeoPoint, HazardPoint};
///
/// let hazard = HazardPoint::new(
///     GeoPoint::new(35.42, 136.76)?,
///     "Naka-Nishi, Kakamigahara",
///     "A car followed a student walking home.",
/// );
///
/// assert_eq!(hazard.title, "Naka-Nishi, Kakamigahara");
/// # Ok::<(), saferoute_core::GeoPointError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HazardPoint {
    /// Where the hazard was reported.
    pub position: GeoPoint,
    /// Short label.
    pub title: String,
    /// Free-text description.
    pub info: String,
}

impl HazardPoint {
    /// Construct a hazard from its position, label and description.
    pub fn new(position: GeoPoint, title: impl Into<String>, info: impl Into<String>) -> Self {
        Self {
            position,
            title: title.into(),
            info: info.into(),
        }
    }

    /// Construct a hazard with an empty label and description.
    ///
    /// # Examples
    /// ```
    /// use saferoute_core::{GeoPoint, HazardPoint};
    ///
    /// let hazard = HazardPoint::unlabelled(GeoPoint::new(0.0, 0.0)?);
    /// assert!(hazard.title.is_empty());
    /// # Ok::<(), saferoute_core::GeoPointError>(())
    /// ```
    #[must_use]
    pub fn unlabelled(position: GeoPoint) -> Self {
        Self::new(position, String::new(), String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hazard_keeps_label_and_description() {
        let position = GeoPoint::new(35.0, 136.0).expect("valid point");
        let hazard = HazardPoint::new(position, "Chu 1-chome", "Phone pointed at children.");
        assert_eq!(hazard.position, position);
        assert_eq!(hazard.info, "Phone pointed at children.");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn hazard_uses_backend_shape() {
        let json = r#"{"position":{"lat":35.0,"lng":136.0},"title":"t","info":"i"}"#;
        let hazard: HazardPoint = serde_json::from_str(json).expect("decode hazard");
        assert_eq!(hazard.title, "t");
        assert_eq!(hazard.position.longitude(), 136.0);
    }
}
