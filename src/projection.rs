//! Local flat-earth projection between WGS84 degrees and planar meters.
//!
//! The projector is centered on the mean longitude/latitude of a path and
//! scales longitude by the cosine of that mean latitude. The approximation
//! holds for extents of a single multi-day hike; it degrades for paths that
//! span many degrees of latitude.

use crate::error::{Error, Result};
use crate::units::METERS_PER_DEGREE_LAT;
use geo::Point;
use serde::{Deserialize, Serialize};

/// A geographic sample: longitude, latitude and optional elevation.
///
/// Serialized as a bare `[lon, lat]` or `[lon, lat, elevation]` array.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
    pub elevation: Option<f64>,
}

impl GeoPoint {
    pub fn new(lon: f64, lat: f64) -> Self {
        GeoPoint {
            lon,
            lat,
            elevation: None,
        }
    }

    pub fn with_elevation(lon: f64, lat: f64, elevation: f64) -> Self {
        GeoPoint {
            lon,
            lat,
            elevation: Some(elevation),
        }
    }
}

impl TryFrom<Vec<f64>> for GeoPoint {
    type Error = String;

    fn try_from(values: Vec<f64>) -> std::result::Result<Self, Self::Error> {
        match values.as_slice() {
            [lon, lat] => Ok(GeoPoint::new(*lon, *lat)),
            [lon, lat, elevation] => Ok(GeoPoint::with_elevation(*lon, *lat, *elevation)),
            other => Err(format!(
                "expected [lon, lat] or [lon, lat, elevation], got {} values",
                other.len()
            )),
        }
    }
}

impl From<GeoPoint> for Vec<f64> {
    fn from(point: GeoPoint) -> Self {
        match point.elevation {
            Some(elevation) => vec![point.lon, point.lat, elevation],
            None => vec![point.lon, point.lat],
        }
    }
}

/// Affine mapping between degrees and meters around a fixed origin.
///
/// Planar points produced by one projector are only meaningful to that
/// projector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projector {
    lon0: f64,
    lat0: f64,
    meters_per_degree_lat: f64,
    meters_per_degree_lon: f64,
}

impl Projector {
    /// Build a projector centered on the centroid of `path`.
    pub fn new(path: &[GeoPoint]) -> Result<Self> {
        if path.is_empty() {
            return Err(Error::InvalidInput(
                "cannot build a projection from an empty path".to_string(),
            ));
        }
        if let Some(bad) = path
            .iter()
            .position(|p| !p.lon.is_finite() || !p.lat.is_finite())
        {
            return Err(Error::InvalidInput(format!(
                "path point {} has a non-finite coordinate",
                bad
            )));
        }

        let count = path.len() as f64;
        let lon0 = path.iter().map(|p| p.lon).sum::<f64>() / count;
        let lat0 = path.iter().map(|p| p.lat).sum::<f64>() / count;

        let meters_per_degree_lat = METERS_PER_DEGREE_LAT;
        let meters_per_degree_lon = meters_per_degree_lat * lat0.to_radians().cos();

        tracing::debug!(
            lon0,
            lat0,
            meters_per_degree_lon,
            "built planar projector over {} points",
            path.len()
        );

        Ok(Projector {
            lon0,
            lat0,
            meters_per_degree_lat,
            meters_per_degree_lon,
        })
    }

    /// Projection origin as `(lon0, lat0)`.
    pub fn origin(&self) -> (f64, f64) {
        (self.lon0, self.lat0)
    }

    pub fn meters_per_degree_lon(&self) -> f64 {
        self.meters_per_degree_lon
    }

    pub fn meters_per_degree_lat(&self) -> f64 {
        self.meters_per_degree_lat
    }

    #[inline]
    pub fn to_planar(&self, lon: f64, lat: f64) -> Point<f64> {
        Point::new(
            (lon - self.lon0) * self.meters_per_degree_lon,
            (lat - self.lat0) * self.meters_per_degree_lat,
        )
    }

    /// Inverse of [`Projector::to_planar`], returning `(lon, lat)`.
    #[inline]
    pub fn to_geo(&self, point: Point<f64>) -> (f64, f64) {
        (
            point.x() / self.meters_per_degree_lon + self.lon0,
            point.y() / self.meters_per_degree_lat + self.lat0,
        )
    }

    pub fn project_path(&self, path: &[GeoPoint]) -> Vec<Point<f64>> {
        path.iter().map(|p| self.to_planar(p.lon, p.lat)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_path() -> Vec<GeoPoint> {
        vec![
            GeoPoint::with_elevation(-121.65, 41.012, 2300.0),
            GeoPoint::with_elevation(-121.9, 40.85, 3650.0),
            GeoPoint::with_elevation(-122.3, 41.1, 5850.0),
        ]
    }

    #[test]
    fn test_empty_path_fails() {
        let result = Projector::new(&[]);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_non_finite_point_fails() {
        let path = vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(f64::NAN, 1.0)];
        assert!(matches!(Projector::new(&path), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_origin_is_centroid() {
        let projector = Projector::new(&sample_path()).unwrap();
        let (lon0, lat0) = projector.origin();
        assert!((lon0 - (-121.65 - 121.9 - 122.3) / 3.0).abs() < 1e-12);
        assert!((lat0 - (41.012 + 40.85 + 41.1) / 3.0).abs() < 1e-12);

        let centroid = projector.to_planar(lon0, lat0);
        assert!(centroid.x().abs() < 1e-9);
        assert!(centroid.y().abs() < 1e-9);
    }

    #[test]
    fn test_longitude_scale_at_equator_matches_latitude() {
        let projector = Projector::new(&[GeoPoint::new(0.0, 0.0)]).unwrap();
        assert!((projector.meters_per_degree_lon() - METERS_PER_DEGREE_LAT).abs() < 1e-9);

        let p = projector.to_planar(0.0, 0.01);
        assert!(p.x().abs() < 1e-12);
        assert!((p.y() - 1111.3292).abs() < 1e-6);
    }

    #[test]
    fn test_roundtrip() {
        let projector = Projector::new(&sample_path()).unwrap();
        let samples = [
            (-121.65, 41.012),
            (-122.3, 41.1),
            (0.0, 0.0),
            (179.999, -89.5),
            (-179.999, 89.5),
            (12.4924, 41.8902),
        ];
        for (lon, lat) in samples {
            let (lon2, lat2) = projector.to_geo(projector.to_planar(lon, lat));
            assert!((lon - lon2).abs() < 1e-9, "lon {} -> {}", lon, lon2);
            assert!((lat - lat2).abs() < 1e-9, "lat {} -> {}", lat, lat2);
        }
    }

    #[test]
    fn test_project_path_preserves_order() {
        let path = sample_path();
        let projector = Projector::new(&path).unwrap();
        let planar = projector.project_path(&path);
        assert_eq!(planar.len(), 3);
        // West is negative x, north is positive y.
        assert!(planar[2].x() < planar[0].x());
        assert!(planar[1].y() < planar[0].y());
    }

    #[test]
    fn test_geo_point_serde() {
        let with: GeoPoint = serde_json::from_str("[-121.65, 41.012, 2300.5]").unwrap();
        assert_eq!(with, GeoPoint::with_elevation(-121.65, 41.012, 2300.5));

        let without: GeoPoint = serde_json::from_str("[-121.65, 41.012]").unwrap();
        assert_eq!(without.elevation, None);
        assert_eq!(serde_json::to_string(&without).unwrap(), "[-121.65,41.012]");

        assert!(serde_json::from_str::<GeoPoint>("[1.0]").is_err());
    }
}
