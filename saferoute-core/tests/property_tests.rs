#![expect(
    clippy::expect_used,
    reason = "property tests use expect for readable failures"
)]

//! Property-based tests for the detour planner.
//!
//! # Invariants tested
//!
//! - **Single waypoint:** the planner never proposes more than one waypoint.
//! - **Degenerate segments:** coincident endpoints never produce a waypoint.
//! - **Alert radius:** hazards at or beyond the radius are ignored.
//! - **Deflection:** the waypoint sits the deflection distance from its hazard.
//! - **Direction:** reversing the route still avoids the same hazard.

use proptest::prelude::*;
use saferoute_core::{
    DEFAULT_ALERT_RADIUS_M, DEFAULT_DEFLECTION_M, DetourPlanner, GeoPoint, HazardPoint, Side,
    geodesy,
};

fn geo_point() -> impl Strategy<Value = GeoPoint> {
    (-60.0_f64..60.0, -170.0_f64..170.0)
        .prop_map(|(lat, lng)| GeoPoint::new(lat, lng).expect("strategy stays in range"))
}

/// A start point, a segment of 200 m to 5 km and the segment's bearing.
fn segment() -> impl Strategy<Value = (GeoPoint, GeoPoint, f64)> {
    (geo_point(), 0.0_f64..360.0, 200.0_f64..5_000.0).prop_map(|(start, bearing, metres)| {
        (start, geodesy::offset(start, bearing, metres), bearing)
    })
}

/// Hazards scattered within a few kilometres of `origin`.
fn hazards_near(origin: GeoPoint) -> impl Strategy<Value = Vec<HazardPoint>> {
    prop::collection::vec((0.0_f64..360.0, 0.0_f64..4_000.0), 0..8).prop_map(move |offsets| {
        offsets
            .into_iter()
            .map(|(bearing, metres)| {
                HazardPoint::unlabelled(geodesy::offset(origin, bearing, metres))
            })
            .collect()
    })
}

fn segment_with_hazards() -> impl Strategy<Value = (GeoPoint, GeoPoint, Vec<HazardPoint>)> {
    segment().prop_flat_map(|(start, end, _)| {
        (Just(start), Just(end), hazards_near(start))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: at most one waypoint is ever proposed.
    #[test]
    fn never_more_than_one_waypoint((start, end, hazards) in segment_with_hazards()) {
        let waypoints = DetourPlanner::default().plan(Some(start), Some(end), &hazards);
        prop_assert!(waypoints.len() <= 1);
    }

    /// Property: a zero-length route never needs a detour.
    #[test]
    fn coincident_endpoints_yield_nothing(
        (start, _, hazards) in segment_with_hazards(),
    ) {
        let waypoints = DetourPlanner::default().plan(Some(start), Some(start), &hazards);
        prop_assert!(waypoints.is_empty());
    }

    /// Property: hazards outside the alert radius never trigger a detour.
    #[test]
    fn hazards_beyond_radius_are_ignored((start, end, hazards) in segment_with_hazards()) {
        let distant: Vec<HazardPoint> = hazards
            .into_iter()
            .filter(|hazard| {
                geodesy::distance_to_segment(start, end, hazard.position) >= DEFAULT_ALERT_RADIUS_M
            })
            .collect();
        let waypoints = DetourPlanner::default().plan(Some(start), Some(end), &distant);
        prop_assert!(waypoints.is_empty());
    }

    /// Property: a proposed waypoint is the deflection distance from the
    /// hazard it avoids, and that hazard is inside the alert radius.
    #[test]
    fn waypoint_sits_deflection_from_hazard((start, end, hazards) in segment_with_hazards()) {
        let detour = DetourPlanner::default().plan_detour(Some(start), Some(end), &hazards);
        if let Some(detour) = detour {
            let hazard = hazards.get(detour.hazard_index).expect("index refers to input");
            let metres = geodesy::distance(hazard.position, detour.waypoint.location);
            prop_assert!((metres - DEFAULT_DEFLECTION_M).abs() < 0.01, "offset {metres}");
            prop_assert!(detour.hazard_distance_m < DEFAULT_ALERT_RADIUS_M);
            let chosen = match detour.side {
                Side::Right => detour.right_detour_m,
                Side::Left => detour.left_detour_m,
            };
            prop_assert_eq!(detour.right_detour_m.min(detour.left_detour_m), chosen);
        }
    }

    /// Property: a hazard well inside the radius is avoided in both directions.
    #[test]
    fn reversing_the_route_avoids_the_same_hazard(
        (start, end, bearing) in segment(),
        fraction in 0.1_f64..0.9,
        cross_track in 0.0_f64..300.0,
        east in any::<bool>(),
    ) {
        let along = geodesy::distance(start, end) * fraction;
        let foot = geodesy::offset(start, bearing, along);
        let side = if east { 90.0 } else { -90.0 };
        let hazards = [HazardPoint::unlabelled(geodesy::offset(foot, bearing + side, cross_track))];

        let planner = DetourPlanner::default();
        let forward = planner.plan_detour(Some(start), Some(end), &hazards);
        let backward = planner.plan_detour(Some(end), Some(start), &hazards);

        prop_assert_eq!(forward.map(|d| d.hazard_index), Some(0));
        prop_assert_eq!(backward.map(|d| d.hazard_index), Some(0));
    }
}
