//! Segment and cumulative distances along a path.

use crate::projection::GeoPoint;
use crate::units::EARTH_RADIUS_M;
use geo::Point;

/// Planar length of each consecutive pair in `planar_path`.
///
/// Duplicate consecutive points yield zero-length segments.
pub fn segment_lengths(planar_path: &[Point<f64>]) -> Vec<f64> {
    planar_path
        .windows(2)
        .map(|pair| {
            let delta = pair[1] - pair[0];
            (delta.x() * delta.x() + delta.y() * delta.y()).sqrt()
        })
        .collect()
}

pub fn total_length(segment_lengths: &[f64]) -> f64 {
    segment_lengths.iter().sum()
}

/// Prefix sums over segment lengths for logarithmic distance lookups.
///
/// `offsets[i]` is the distance from the start of the path to vertex `i`,
/// accumulated in the same order as a linear walk so both agree bit for bit.
#[derive(Clone, Debug, PartialEq)]
pub struct CumulativeIndex {
    lengths: Vec<f64>,
    offsets: Vec<f64>,
}

impl CumulativeIndex {
    pub fn new(segment_lengths: Vec<f64>) -> Self {
        let mut offsets = Vec::with_capacity(segment_lengths.len() + 1);
        let mut traversed = 0.0;
        offsets.push(traversed);
        for length in &segment_lengths {
            traversed += length;
            offsets.push(traversed);
        }
        CumulativeIndex {
            lengths: segment_lengths,
            offsets,
        }
    }

    pub fn from_planar_path(planar_path: &[Point<f64>]) -> Self {
        Self::new(segment_lengths(planar_path))
    }

    #[inline]
    pub fn lengths(&self) -> &[f64] {
        &self.lengths
    }

    #[inline]
    pub fn offsets(&self) -> &[f64] {
        &self.offsets
    }

    pub fn segment_count(&self) -> usize {
        self.lengths.len()
    }

    pub fn total(&self) -> f64 {
        self.offsets.last().copied().unwrap_or(0.0)
    }

    /// Index of the first segment whose end lies at or beyond `target`, or
    /// `None` when `target` exceeds the total length.
    pub fn segment_reaching(&self, target: f64) -> Option<usize> {
        let idx = self.offsets[1..].partition_point(|&end| end < target);
        (idx < self.lengths.len()).then_some(idx)
    }
}

/// Great-circle distance in meters between two geographic points.
pub fn haversine_m(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lon = (b.lon - a.lon).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

/// Sum of haversine distances over a geographic path.
pub fn haversine_path_m(path: &[GeoPoint]) -> f64 {
    path.windows(2).map(|pair| haversine_m(&pair[0], &pair[1])).sum()
}
