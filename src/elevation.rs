//! Elevation profile smoothing and thresholded gain/loss.

use crate::projection::GeoPoint;
use rayon::prelude::*;

/// Cumulative climbing and descending, in the profile's unit.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GainLoss {
    pub gain: f64,
    pub loss: f64,
}

/// Elevations along `path`, with gaps filled from the previous sample (or
/// the first known one for a leading gap). `None` if nothing has elevation.
pub fn profile(path: &[GeoPoint]) -> Option<Vec<f64>> {
    let first = path.iter().find_map(|p| p.elevation)?;
    let mut last = first;
    Some(
        path.iter()
            .map(|p| {
                if let Some(elevation) = p.elevation {
                    last = elevation;
                }
                last
            })
            .collect(),
    )
}

/// Centered moving average; the window is truncated at both ends.
pub fn smooth(values: &[f64], window: usize) -> Vec<f64> {
    let half = window / 2;
    let len = values.len();
    (0..len)
        .into_par_iter()
        .map(|i| {
            let start = i.saturating_sub(half);
            let end = (i + half + 1).min(len);
            let slice = &values[start..end];
            slice.iter().sum::<f64>() / slice.len() as f64
        })
        .collect()
}

/// Accumulate changes of at least `threshold` relative to the last counted
/// sample. Smaller wiggles are ignored until they add up.
pub fn gain_loss(values: &[f64], threshold: f64) -> GainLoss {
    let Some((&first, rest)) = values.split_first() else {
        return GainLoss::default();
    };

    let mut totals = GainLoss::default();
    let mut last_counted = first;
    for &value in rest {
        let change = value - last_counted;
        if change.abs() >= threshold {
            if change > 0.0 {
                totals.gain += change;
            } else {
                totals.loss += -change;
            }
            last_counted = value;
        }
    }
    totals
}

/// Minimum and maximum of a profile.
pub fn extrema(values: &[f64]) -> Option<(f64, f64)> {
    values.iter().fold(None, |acc, &v| match acc {
        None => Some((v, v)),
        Some((min, max)) => Some((min.min(v), max.max(v))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_fills_gaps() {
        let path = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::with_elevation(0.0, 0.1, 100.0),
            GeoPoint::new(0.0, 0.2),
            GeoPoint::with_elevation(0.0, 0.3, 130.0),
        ];
        assert_eq!(profile(&path), Some(vec![100.0, 100.0, 100.0, 130.0]));
        assert_eq!(profile(&[GeoPoint::new(0.0, 0.0)]), None);
    }

    #[test]
    fn test_smooth_truncates_window() {
        let values = vec![0.0, 10.0, 20.0, 30.0, 40.0];
        let smoothed = smooth(&values, 5);
        assert_eq!(smoothed[0], 10.0); // (0 + 10 + 20) / 3
        assert_eq!(smoothed[1], 15.0); // (0 + 10 + 20 + 30) / 4
        assert_eq!(smoothed[2], 20.0);
        assert_eq!(smoothed[4], 30.0);
        assert_eq!(smooth(&values, 1), values);
        assert!(smooth(&[], 5).is_empty());
    }

    #[test]
    fn test_gain_loss_threshold() {
        // Small wiggles below 10 are ignored until they accumulate.
        let values = vec![100.0, 104.0, 108.0, 112.0, 95.0, 97.0, 80.0];
        let totals = gain_loss(&values, 10.0);
        assert_eq!(totals.gain, 12.0);
        assert_eq!(totals.loss, 32.0);
    }

    #[test]
    fn test_gain_loss_degenerate() {
        assert_eq!(gain_loss(&[], 10.0), GainLoss::default());
        assert_eq!(gain_loss(&[42.0], 10.0), GainLoss::default());
    }

    #[test]
    fn test_extrema() {
        assert_eq!(extrema(&[3.0, -1.0, 7.5]), Some((-1.0, 7.5)));
        assert_eq!(extrema(&[]), None);
    }
}
