use super::{Parser, open_track};
use crate::error::Result;
use crate::projection::GeoPoint;
use crate::units::{meters_to_feet, round_to};
use gpx::{Gpx, Waypoint};
use std::io::Read;
use std::path::Path;

/// Reads track points from `.gpx` and `.gpx.gz` files.
///
/// All track segments are concatenated in file order. Files with no track
/// points fall back to their route points. Elevation is converted to feet.
pub struct GpxParser;

impl Parser for GpxParser {
    fn parse(&self, file_path: &Path) -> Result<Vec<GeoPoint>> {
        let reader = open_track(file_path)?;
        extract_path_from_gpx(reader)
    }

    fn name(&self) -> &'static str {
        "GPX Parser"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".gpx"]
    }
}

fn extract_path_from_gpx<R: Read>(reader: R) -> Result<Vec<GeoPoint>> {
    let gpx: Gpx = gpx::read(reader)?;

    if gpx.tracks.len() > 1 {
        tracing::warn!(
            "GPX holds {} tracks; concatenating them into one path",
            gpx.tracks.len()
        );
    }

    let mut points: Vec<GeoPoint> = gpx
        .tracks
        .iter()
        .flat_map(|track| &track.segments)
        .flat_map(|segment| &segment.points)
        .map(to_geo_point)
        .collect();

    if points.is_empty() {
        points = gpx
            .routes
            .iter()
            .flat_map(|route| &route.points)
            .map(to_geo_point)
            .collect();
    }

    Ok(points)
}

fn to_geo_point(waypoint: &Waypoint) -> GeoPoint {
    let point = waypoint.point();
    GeoPoint {
        lon: point.x(),
        lat: point.y(),
        elevation: waypoint.elevation.map(|m| round_to(meters_to_feet(m), 1)),
    }
}
