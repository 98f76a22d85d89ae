//! Arc-length queries: "where am I after traveling D meters along the path?"
//!
//! Two lookups are provided. [`point_at_distance`] walks segments from the
//! start on every call. [`point_at_distance_indexed`] binary-searches a
//! [`CumulativeIndex`]. Both return identical results, including clamping
//! and breakpoint tie-breaks.

use crate::distance::CumulativeIndex;
use crate::error::{Error, Result};
use geo::Point;

/// A location on a planar path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub point: Point<f64>,
    /// Distance from the path start to `point`, in `[0, total length]`.
    pub traversed: f64,
    /// Segment containing `point`; 0 for single-point paths.
    pub segment: usize,
    /// Position within `segment`, from 0 at its start to 1 at its end.
    pub ratio: f64,
}

fn validate(planar_path: &[Point<f64>], segment_lengths: &[f64], target: f64) -> Result<()> {
    if planar_path.is_empty() {
        return Err(Error::InvalidInput(
            "cannot locate a distance on an empty path".to_string(),
        ));
    }
    if segment_lengths.len() + 1 != planar_path.len() {
        return Err(Error::InvalidInput(format!(
            "{} segment lengths do not match a path of {} points",
            segment_lengths.len(),
            planar_path.len()
        )));
    }
    if !target.is_finite() {
        return Err(Error::InvalidArgument(format!(
            "target distance must be finite, got {}",
            target
        )));
    }
    Ok(())
}

fn start_of(planar_path: &[Point<f64>]) -> Projection {
    Projection {
        point: planar_path[0],
        traversed: 0.0,
        segment: 0,
        ratio: 0.0,
    }
}

fn end_of(planar_path: &[Point<f64>], traversed: f64) -> Projection {
    let segments = planar_path.len() - 1;
    Projection {
        point: planar_path[segments],
        traversed,
        segment: segments.saturating_sub(1),
        ratio: if segments > 0 { 1.0 } else { 0.0 },
    }
}

fn within_segment(
    planar_path: &[Point<f64>],
    segment: usize,
    traversed: f64,
    length: f64,
    target: f64,
) -> Projection {
    let a = planar_path[segment];
    let b = planar_path[segment + 1];
    // A zero-length segment resolves to its start point.
    let ratio = if length > 0.0 {
        (target - traversed) / length
    } else {
        0.0
    };
    let point = if ratio >= 1.0 { b } else { a + (b - a) * ratio };
    Projection {
        point,
        traversed: traversed + length * ratio,
        segment,
        ratio,
    }
}

/// Point `target` meters along `planar_path`, walking segments in order.
///
/// Targets at or below zero clamp to the first point; targets beyond the
/// path length clamp to the last point. A target that lands exactly on a
/// vertex resolves to the end of the earliest segment reaching it, so runs
/// of zero-length segments after that vertex are never selected.
pub fn point_at_distance(
    planar_path: &[Point<f64>],
    segment_lengths: &[f64],
    target: f64,
) -> Result<Projection> {
    validate(planar_path, segment_lengths, target)?;

    if target <= 0.0 {
        return Ok(start_of(planar_path));
    }

    let mut traversed = 0.0;
    for (segment, &length) in segment_lengths.iter().enumerate() {
        let next = traversed + length;
        if target <= next {
            return Ok(within_segment(
                planar_path,
                segment,
                traversed,
                length,
                target,
            ));
        }
        traversed = next;
    }

    Ok(end_of(planar_path, traversed))
}

/// Same as [`point_at_distance`], using a binary search over prefix sums.
pub fn point_at_distance_indexed(
    planar_path: &[Point<f64>],
    index: &CumulativeIndex,
    target: f64,
) -> Result<Projection> {
    validate(planar_path, index.lengths(), target)?;

    if target <= 0.0 {
        return Ok(start_of(planar_path));
    }

    match index.segment_reaching(target) {
        Some(segment) => Ok(within_segment(
            planar_path,
            segment,
            index.offsets()[segment],
            index.lengths()[segment],
            target,
        )),
        None => Ok(end_of(planar_path, index.total())),
    }
}
