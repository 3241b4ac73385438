//! Hazard feed response types.
//!
//! Positions are decoded leniently so one bad report does not discard the
//! whole feed: missing, null or out-of-range coordinates drop only that
//! entry. The envelope's `apiKey` is never declared, so it is discarded by
//! the decoder and never reaches logs.

use log::warn;
use saferoute_core::{GeoPoint, HazardPoint, HazardSourceError};
use serde::Deserialize;
use serde_json::Value;

/// Envelope form of the feed.
#[derive(Debug, Deserialize)]
struct HazardFeed {
    locations: Vec<HazardEntry>,
}

/// One report as the backend lists it.
#[derive(Debug, Deserialize)]
struct HazardEntry {
    #[serde(default)]
    position: Option<RawPosition>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    info: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPosition {
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lng: Option<f64>,
}

impl HazardEntry {
    fn into_hazard(self, index: usize) -> Option<HazardPoint> {
        let title = self.title.unwrap_or_default();
        let Some(RawPosition {
            lat: Some(lat),
            lng: Some(lng),
        }) = self.position
        else {
            warn!("skipping hazard #{index} ({title:?}): position is missing");
            return None;
        };
        match GeoPoint::new(lat, lng) {
            Ok(position) => Some(HazardPoint::new(
                position,
                title,
                self.info.unwrap_or_default(),
            )),
            Err(err) => {
                warn!("skipping hazard #{index} ({title:?}): {err}");
                None
            }
        }
    }
}

/// Decode a hazard feed body, keeping report order.
///
/// Both the bare-array and the `{"locations": [...]}` forms are accepted.
/// Reports without a usable position are skipped with a warning.
///
/// # Errors
///
/// Returns [`HazardSourceError::Parse`] when the body is not JSON or does not
/// have either feed shape.
///
/// # Examples
///
/// ```
/// use saferoute_data::parse_hazard_feed;
///
/// let body = r#"{
///     "locations": [
///         {"position": {"lat": 35.4, "lng": 136.7}, "title": "Naka", "info": ""},
///         {"position": {"lat": null, "lng": 136.7}, "title": "Unknown", "info": ""}
///     ],
///     "apiKey": "not-for-logs"
/// }"#;
/// let hazards = parse_hazard_feed(body)?;
/// assert_eq!(hazards.len(), 1);
/// assert_eq!(hazards[0].title, "Naka");
/// # Ok::<(), saferoute_core::HazardSourceError>(())
/// ```
pub fn parse_hazard_feed(body: &str) -> Result<Vec<HazardPoint>, HazardSourceError> {
    let value: Value = serde_json::from_str(body).map_err(parse_error)?;
    let entries: Vec<HazardEntry> = match value {
        Value::Array(_) => serde_json::from_value(value).map_err(parse_error)?,
        Value::Object(_) => {
            let feed: HazardFeed = serde_json::from_value(value).map_err(parse_error)?;
            feed.locations
        }
        _ => {
            return Err(HazardSourceError::Parse {
                message: "expected a list of hazards or an object with `locations`".to_owned(),
            });
        }
    };

    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| entry.into_hazard(index))
        .collect())
}

fn parse_error(err: serde_json::Error) -> HazardSourceError {
    HazardSourceError::Parse {
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn decodes_envelope_in_order() {
        let body = r#"{"locations": [
            {"position": {"lat": 35.41, "lng": 136.75}, "title": "Naka-Nishi", "info": "followed by car"},
            {"position": {"lat": 35.42, "lng": 136.76}, "title": "Chu 1-chome", "info": "phone pointed"}
        ]}"#;
        let hazards = parse_hazard_feed(body).expect("feed should decode");
        let titles: Vec<_> = hazards.iter().map(|h| h.title.as_str()).collect();
        assert_eq!(titles, ["Naka-Nishi", "Chu 1-chome"]);
        assert_eq!(hazards[1].info, "phone pointed");
    }

    #[rstest]
    fn decodes_bare_array() {
        let body = r#"[{"position": {"lat": 35.0, "lng": 136.0}, "title": "t", "info": "i"}]"#;
        let hazards = parse_hazard_feed(body).expect("feed should decode");
        assert_eq!(hazards.len(), 1);
    }

    #[rstest]
    #[case(r#"{"title": "no position"}"#)]
    #[case(r#"{"position": null, "title": "null position"}"#)]
    #[case(r#"{"position": {"lat": null, "lng": 136.0}, "title": "null lat"}"#)]
    #[case(r#"{"position": {"lat": 35.0}, "title": "missing lng"}"#)]
    #[case(r#"{"position": {"lat": 135.0, "lng": 136.0}, "title": "out of range"}"#)]
    fn skips_unusable_positions(#[case] bad: &str) {
        let body = format!(
            r#"[{bad}, {{"position": {{"lat": 35.0, "lng": 136.0}}, "title": "kept", "info": ""}}]"#
        );
        let hazards = parse_hazard_feed(&body).expect("feed should decode");
        assert_eq!(hazards.len(), 1);
        assert_eq!(hazards[0].title, "kept");
    }

    #[rstest]
    fn missing_labels_default_to_empty() {
        let body = r#"[{"position": {"lat": 35.0, "lng": 136.0}, "title": null}]"#;
        let hazards = parse_hazard_feed(body).expect("feed should decode");
        assert!(hazards[0].title.is_empty());
        assert!(hazards[0].info.is_empty());
    }

    #[rstest]
    #[case("not json")]
    #[case("42")]
    #[case(r#"{"apiKey": "secret"}"#)]
    fn rejects_malformed_bodies(#[case] body: &str) {
        let err = parse_hazard_feed(body).expect_err("body should be rejected");
        assert!(matches!(err, HazardSourceError::Parse { .. }));
    }

    #[rstest]
    fn api_key_never_appears_in_errors() {
        let err = parse_hazard_feed(r#"{"apiKey": "secret-key", "locations": 3}"#)
            .expect_err("locations must be a list");
        assert!(!err.to_string().contains("secret-key"));
    }
}
