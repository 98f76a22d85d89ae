//! A geographic route with its planar projection precomputed.
//!
//! `Route` bundles the projector, the projected path and the cumulative
//! distance index so repeated "where is mile M" queries only pay for a
//! binary search.

use crate::distance::{self, CumulativeIndex};
use crate::error::Result;
use crate::locator::{self, Projection};
use crate::projection::{GeoPoint, Projector};
use crate::units;
use geo::Point;
use rayon::prelude::*;

/// Geographic position resolved from a distance along the route.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoutePosition {
    pub lon: f64,
    pub lat: f64,
    pub elevation: Option<f64>,
    /// Planar meters from the route start.
    pub traversed_m: f64,
}

#[derive(Clone, Debug)]
pub struct Route {
    path: Vec<GeoPoint>,
    projector: Projector,
    planar: Vec<Point<f64>>,
    index: CumulativeIndex,
}

impl Route {
    pub fn new(path: Vec<GeoPoint>) -> Result<Self> {
        let projector = Projector::new(&path)?;
        let planar = projector.project_path(&path);
        let index = CumulativeIndex::from_planar_path(&planar);

        tracing::debug!(
            points = path.len(),
            length_m = index.total(),
            "indexed route"
        );

        Ok(Route {
            path,
            projector,
            planar,
            index,
        })
    }

    #[inline]
    pub fn path(&self) -> &[GeoPoint] {
        &self.path
    }

    #[inline]
    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    #[inline]
    pub fn planar_path(&self) -> &[Point<f64>] {
        &self.planar
    }

    #[inline]
    pub fn segment_lengths(&self) -> &[f64] {
        self.index.lengths()
    }

    /// Total length in planar meters.
    pub fn length_m(&self) -> f64 {
        self.index.total()
    }

    /// Total great-circle length in meters.
    pub fn haversine_length_m(&self) -> f64 {
        distance::haversine_path_m(&self.path)
    }

    pub fn project(&self, target_m: f64) -> Result<Projection> {
        locator::point_at_distance_indexed(&self.planar, &self.index, target_m)
    }

    pub fn locate_meters(&self, target_m: f64) -> Result<RoutePosition> {
        let projection = self.project(target_m)?;
        let (lon, lat) = self.projector.to_geo(projection.point);
        Ok(RoutePosition {
            lon,
            lat,
            elevation: self.elevation_at(&projection),
            traversed_m: projection.traversed,
        })
    }

    pub fn locate_miles(&self, target_miles: f64) -> Result<RoutePosition> {
        self.locate_meters(units::miles_to_meters(target_miles))
    }

    /// Elevation at a projection, interpolated when both segment ends have
    /// one and otherwise taken from whichever end does.
    fn elevation_at(&self, projection: &Projection) -> Option<f64> {
        let start = self.path.get(projection.segment)?.elevation;
        let end = self
            .path
            .get(projection.segment + 1)
            .and_then(|p| p.elevation);
        match (start, end) {
            (Some(a), Some(b)) => Some(a + (b - a) * projection.ratio),
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (None, None) => None,
        }
    }

    /// Index of the vertex closest to `(lon, lat)` by great-circle distance.
    /// Ties resolve to the earliest vertex.
    pub fn nearest_vertex(&self, lon: f64, lat: f64) -> usize {
        let target = GeoPoint::new(lon, lat);
        self.path
            .par_iter()
            .enumerate()
            .map(|(i, p)| (i, distance::haversine_m(&target, p)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    /// Great-circle meters between two vertices, `from <= to`.
    pub fn haversine_between_m(&self, from: usize, to: usize) -> f64 {
        let to = to.min(self.path.len().saturating_sub(1));
        if from >= to {
            return 0.0;
        }
        distance::haversine_path_m(&self.path[from..=to])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn meridian_route() -> Route {
        Route::new(vec![
            GeoPoint::with_elevation(0.0, 0.0, 1000.0),
            GeoPoint::with_elevation(0.0, 0.01, 2000.0),
            GeoPoint::with_elevation(0.0, 0.02, 1500.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_route_fails() {
        assert!(matches!(Route::new(Vec::new()), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_route_lengths() {
        let route = meridian_route();
        assert_eq!(route.segment_lengths().len(), 2);
        assert!((route.length_m() - 2222.66).abs() < 0.01);
        // Planar and great-circle lengths agree closely at this scale.
        assert!((route.length_m() - route.haversine_length_m()).abs() / route.length_m() < 0.01);
    }

    #[test]
    fn test_locate_midpoint_interpolates_elevation() {
        let route = meridian_route();
        let half = route.segment_lengths()[0] / 2.0;
        let position = route.locate_meters(half).unwrap();
        assert!(position.lon.abs() < 1e-12);
        assert!((position.lat - 0.005).abs() < 1e-9);
        assert!((position.elevation.unwrap() - 1500.0).abs() < 1e-6);
    }

    #[test]
    fn test_locate_clamps_to_ends() {
        let route = meridian_route();
        let start = route.locate_miles(-1.0).unwrap();
        assert!(start.lat.abs() < 1e-9);
        assert_eq!(start.elevation, Some(1000.0));
        assert_eq!(start.traversed_m, 0.0);

        let end = route.locate_miles(100.0).unwrap();
        assert!((end.lat - 0.02).abs() < 1e-9);
        assert_eq!(end.elevation, Some(1500.0));
        assert!((end.traversed_m - route.length_m()).abs() < 1e-9);
    }

    #[test]
    fn test_locate_rejects_nan() {
        let route = meridian_route();
        assert!(matches!(
            route.locate_miles(f64::NAN),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_elevation_from_single_end() {
        let route = Route::new(vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::with_elevation(0.0, 0.01, 800.0),
        ])
        .unwrap();
        let position = route.locate_meters(100.0).unwrap();
        assert_eq!(position.elevation, Some(800.0));

        let flat = Route::new(vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.01)]).unwrap();
        assert_eq!(flat.locate_meters(100.0).unwrap().elevation, None);
    }

    #[test]
    fn test_single_point_route() {
        let route = Route::new(vec![GeoPoint::with_elevation(-122.0, 41.0, 3000.0)]).unwrap();
        assert_eq!(route.length_m(), 0.0);
        for miles in [-3.0, 0.0, 5000.0] {
            let position = route.locate_miles(miles).unwrap();
            assert!((position.lon + 122.0).abs() < 1e-9);
            assert!((position.lat - 41.0).abs() < 1e-9);
            assert_eq!(position.elevation, Some(3000.0));
        }
    }

    #[test]
    fn test_nearest_vertex() {
        let route = meridian_route();
        assert_eq!(route.nearest_vertex(0.001, 0.0001), 0);
        assert_eq!(route.nearest_vertex(0.0, 0.011), 1);
        assert_eq!(route.nearest_vertex(5.0, 5.0), 2);
    }

    #[test]
    fn test_haversine_between() {
        let route = meridian_route();
        assert_eq!(route.haversine_between_m(1, 1), 0.0);
        assert_eq!(route.haversine_between_m(2, 1), 0.0);
        let whole = route.haversine_between_m(0, 2);
        assert!((whole - route.haversine_length_m()).abs() < 1e-9);
        assert_eq!(route.haversine_between_m(0, 99), whole);
    }
}
