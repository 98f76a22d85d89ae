//! Move camp and trailhead markers onto the route at their planned mileage.

use crate::error::Result;
use crate::hike_data::HikeData;
use crate::overrides::ManualOverrides;
use crate::route::Route;
use crate::units::{self, round_to};

/// Feature types placed by cumulative daily mileage.
pub const TARGET_TYPES: [&str; 2] = ["Trailhead", "Camp"];

#[derive(Clone, Debug, PartialEq)]
pub struct SnappedFeature {
    pub name: String,
    pub day: i64,
    pub original: Vec<f64>,
    pub snapped: [f64; 2],
    pub route_mile: f64,
}

/// Rewrite the coordinates of every dated camp/trailhead feature so it sits
/// on `route` at the running total of daily distances.
///
/// Day 0 is pinned to the route start. The pre-snap location is kept in
/// `originalCoordinates`, unless a manual override names a better one.
pub fn snap_features(
    data: &mut HikeData,
    route: &Route,
    overrides: &ManualOverrides,
) -> Result<Vec<SnappedFeature>> {
    let total_m = route.length_m();

    let mut indices: Vec<usize> = data
        .features
        .iter()
        .enumerate()
        .filter(|(_, f)| {
            f.properties.day.is_some()
                && f.properties
                    .kind
                    .as_deref()
                    .is_some_and(|kind| TARGET_TYPES.contains(&kind))
        })
        .map(|(i, _)| i)
        .collect();
    indices.sort_by_key(|&i| data.features[i].properties.day);

    let mut updated = Vec::with_capacity(indices.len());
    let mut miles_so_far = 0.0;
    for i in indices {
        let feature = &mut data.features[i];
        let props = &mut feature.properties;
        let day = props.day.unwrap_or(0);

        let target_miles = if day == 0 {
            0.0
        } else {
            miles_so_far += props.distance.unwrap_or(0.0);
            miles_so_far
        };

        let target_m = units::miles_to_meters(target_miles).min(total_m);
        let position = route.locate_meters(target_m)?;
        let snapped = [round_to(position.lon, 6), round_to(position.lat, 6)];

        let original = feature.geometry.coordinates.clone();
        let stored = match overrides.get(props.display_name()) {
            Some(manual) => manual.to_vec(),
            None => props.original_coordinates.take().unwrap_or(original),
        };

        props.original_coordinates = Some(stored.clone());
        props.route_mile = Some(round_to(target_miles, 2));
        feature.geometry.coordinates = snapped.to_vec();

        tracing::debug!(
            day,
            mile = target_miles,
            "snapped {} to ({}, {})",
            props.display_name(),
            snapped[0],
            snapped[1]
        );

        updated.push(SnappedFeature {
            name: props.display_name().to_string(),
            day,
            original: stored,
            snapped,
            route_mile: target_miles,
        });
    }

    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::GeoPoint;

    fn hike_data() -> HikeData {
        serde_json::from_str(
            r#"{
            "route": { "path": [[0.0, 0.0, 100.0], [0.0, 0.01, 200.0], [0.0, 0.02, 300.0]] },
            "features": [
                { "geometry": { "coordinates": [0.5, 0.5] },
                  "properties": { "name": "Camp Two", "type": "Camp", "day": 2, "distance": 0.5 } },
                { "geometry": { "coordinates": [0.1, 0.1] },
                  "properties": { "name": "Trailhead", "type": "Trailhead", "day": 0, "distance": 4.0 } },
                { "geometry": { "coordinates": [0.3, 0.3] },
                  "properties": { "name": "Camp One", "type": "Camp", "day": 1, "distance": 0.5,
                                  "originalCoordinates": [9.0, 9.0] } },
                { "geometry": { "coordinates": [0.7, 0.7] },
                  "properties": { "name": "Spring", "type": "Water", "day": 1 } },
                { "geometry": { "coordinates": [0.8, 0.8] },
                  "properties": { "name": "Far Camp", "type": "Camp", "day": 3, "distance": 50.0 } }
            ]
        }"#,
        )
        .unwrap()
    }

    fn route_of(data: &HikeData) -> Route {
        Route::new(data.route_path().unwrap().to_vec()).unwrap()
    }

    #[test]
    fn test_snaps_by_cumulative_mileage() {
        let mut data = hike_data();
        let route = route_of(&data);
        let updated = snap_features(&mut data, &route, &ManualOverrides::default()).unwrap();

        let names: Vec<&str> = updated.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Trailhead", "Camp One", "Camp Two", "Far Camp"]);

        // Day 0 sits at the start regardless of its distance.
        assert_eq!(updated[0].snapped, [0.0, 0.0]);
        assert_eq!(updated[0].route_mile, 0.0);

        // 0.5 mi = 804.67 m along a meridian.
        let expected_lat = round_to(804.67 / 111_132.92, 6);
        assert_eq!(updated[1].snapped, [0.0, expected_lat]);
        assert_eq!(updated[2].route_mile, 1.0);

        // Past the end of the route clamps to the last vertex.
        assert_eq!(updated[3].snapped, [0.0, 0.02]);
        assert_eq!(updated[3].route_mile, 51.0);
    }

    #[test]
    fn test_records_original_coordinates() {
        let mut data = hike_data();
        let route = route_of(&data);
        snap_features(&mut data, &route, &ManualOverrides::default()).unwrap();

        let camp_two = &data.features[0];
        assert_eq!(camp_two.properties.original_coordinates, Some(vec![0.5, 0.5]));
        assert_eq!(camp_two.properties.route_mile, Some(1.0));
        assert_eq!(camp_two.geometry.coordinates.len(), 2);

        // Previously stored originals are kept.
        let camp_one = &data.features[2];
        assert_eq!(camp_one.properties.original_coordinates, Some(vec![9.0, 9.0]));

        // Non-target types are untouched.
        let spring = &data.features[3];
        assert_eq!(spring.geometry.coordinates, vec![0.7, 0.7]);
        assert_eq!(spring.properties.route_mile, None);
    }

    #[test]
    fn test_manual_override_wins() {
        let mut data = hike_data();
        let route = route_of(&data);
        let overrides: ManualOverrides = [("Camp One".to_string(), [-121.7, 40.95])]
            .into_iter()
            .collect();
        let updated = snap_features(&mut data, &route, &overrides).unwrap();

        assert_eq!(updated[1].original, vec![-121.7, 40.95]);
        assert_eq!(
            data.features[2].properties.original_coordinates,
            Some(vec![-121.7, 40.95])
        );
    }

    #[test]
    fn test_snapping_twice_is_stable() {
        let mut data = hike_data();
        let route = route_of(&data);
        let first = snap_features(&mut data, &route, &ManualOverrides::default()).unwrap();
        let second = snap_features(&mut data, &route, &ManualOverrides::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_single_point_route() {
        let mut data = hike_data();
        let route = Route::new(vec![GeoPoint::new(-122.0, 41.0)]).unwrap();
        let updated = snap_features(&mut data, &route, &ManualOverrides::default()).unwrap();
        assert!(updated.iter().all(|f| f.snapped == [-122.0, 41.0]));
    }
}
