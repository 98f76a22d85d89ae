//! Route statistics, per-day breakdowns and track comparison.

use crate::distance;
use crate::elevation::{self, GainLoss};
use crate::error::{Error, Result};
use crate::hike_data::HikeData;
use crate::projection::GeoPoint;
use crate::route::Route;
use crate::units;
use indicatif::ParallelProgressIterator;
use rayon::prelude::*;

/// Smoothing applied before counting gain and loss.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Smoothing {
    pub window: usize,
    /// Minimum change, in feet, that counts as climbing or descending.
    pub threshold_ft: f64,
}

impl Default for Smoothing {
    fn default() -> Self {
        Smoothing {
            window: 5,
            threshold_ft: 10.0,
        }
    }
}

#[derive(Debug)]
pub struct RouteStats {
    pub points: usize,
    pub start: GeoPoint,
    pub end: GeoPoint,
    pub distance_miles: f64,
    pub planar_distance_miles: f64,
    pub gain_loss: Option<GainLoss>,
}

impl RouteStats {
    pub fn compute(route: &Route, smoothing: Smoothing) -> Self {
        let path = route.path();
        let gain_loss = elevation::profile(path).map(|profile| {
            let smoothed = elevation::smooth(&profile, smoothing.window);
            elevation::gain_loss(&smoothed, smoothing.threshold_ft)
        });

        RouteStats {
            points: path.len(),
            start: path[0],
            end: path[path.len() - 1],
            distance_miles: units::meters_to_miles(route.haversine_length_m()),
            planar_distance_miles: units::meters_to_miles(route.length_m()),
            gain_loss,
        }
    }

    pub fn net_change(&self) -> Option<f64> {
        Some(self.end.elevation? - self.start.elevation?)
    }

    pub fn print(&self) {
        println!("Total GPS points: {}", self.points);
        println!("Start: {}", format_point(&self.start));
        println!("End: {}", format_point(&self.end));

        println!("\n--- DISTANCE ---");
        println!("Great-circle: {:.2} miles", self.distance_miles);
        println!("Planar: {:.2} miles", self.planar_distance_miles);

        println!("\n--- ELEVATION ---");
        match (self.start.elevation, self.end.elevation, self.net_change()) {
            (Some(start), Some(end), Some(net)) => {
                println!("Start: {:.1} ft", start);
                println!("End: {:.1} ft", end);
                println!("Net change: {:+.1} ft", net);
            }
            _ => println!("Route endpoints have no elevation"),
        }
        if let Some(totals) = self.gain_loss {
            println!("Total gain: {:.0} ft", totals.gain);
            println!("Total loss: {:.0} ft", totals.loss);
        }
    }
}

fn format_point(point: &GeoPoint) -> String {
    match point.elevation {
        Some(elevation) => format!("[{:.6}, {:.6}, {:.1}ft]", point.lon, point.lat, elevation),
        None => format!("[{:.6}, {:.6}]", point.lon, point.lat),
    }
}

/// A dated feature matched to its closest route vertex.
#[derive(Clone, Debug, PartialEq)]
pub struct DayStop {
    pub day: i64,
    pub name: String,
    pub vertex: usize,
    pub elevation: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DayLeg {
    pub day: i64,
    pub from: String,
    pub to: String,
    pub start_elevation: Option<f64>,
    pub end_elevation: Option<f64>,
    pub gain_loss: Option<GainLoss>,
    pub distance_miles: f64,
}

/// Match every dated feature to the nearest route vertex.
pub fn day_stops(data: &HikeData, route: &Route) -> Vec<DayStop> {
    let indices = data.day_features();
    tracing::info!("Matching {} day stops to the route...", indices.len());

    indices
        .par_iter()
        .progress_count(indices.len() as u64)
        .filter_map(|&i| {
            let feature = &data.features[i];
            let name = feature.properties.display_name().to_string();
            match feature.geometry.coordinates.as_slice() {
                [lon, lat, ..] => {
                    let vertex = route.nearest_vertex(*lon, *lat);
                    Some(DayStop {
                        day: feature.properties.day.unwrap_or(0),
                        name,
                        vertex,
                        elevation: route.path()[vertex].elevation,
                    })
                }
                _ => {
                    tracing::warn!("Could not find route point for {}", name);
                    None
                }
            }
        })
        .collect()
}

/// Elevation and distance between consecutive day stops.
pub fn day_legs(stops: &[DayStop], route: &Route, smoothing: Smoothing) -> Vec<DayLeg> {
    let smoothed = elevation::profile(route.path())
        .map(|profile| elevation::smooth(&profile, smoothing.window));

    stops
        .windows(2)
        .map(|pair| {
            let (prev, stop) = (&pair[0], &pair[1]);
            let gain_loss = smoothed.as_ref().map(|values| {
                if stop.vertex > prev.vertex {
                    elevation::gain_loss(&values[prev.vertex..=stop.vertex], smoothing.threshold_ft)
                } else {
                    GainLoss::default()
                }
            });
            DayLeg {
                day: stop.day,
                from: prev.name.clone(),
                to: stop.name.clone(),
                start_elevation: prev.elevation,
                end_elevation: stop.elevation,
                gain_loss,
                distance_miles: units::meters_to_miles(
                    route.haversine_between_m(prev.vertex, stop.vertex),
                ),
            }
        })
        .collect()
}

pub fn print_day_legs(stops: &[DayStop], legs: &[DayLeg]) {
    if let Some(first) = stops.first() {
        println!("Day {} (Start): {}", first.day, first.name);
        if let Some(elevation) = first.elevation {
            println!("  Elevation: {:.0} ft", elevation);
        }
        println!();
    }

    for leg in legs {
        println!("Day {}: {} -> {}", leg.day, leg.from, leg.to);
        if let (Some(start), Some(end)) = (leg.start_elevation, leg.end_elevation) {
            println!("  Start elevation: {:.0} ft", start);
            println!("  End elevation: {:.0} ft", end);
            println!("  Net change: {:+.0} ft", end - start);
        }
        if let Some(totals) = leg.gain_loss {
            println!("  Cumulative gain: +{:.0} ft", totals.gain);
            println!("  Cumulative loss: -{:.0} ft", totals.loss);
        }
        println!("  Distance: {:.1} mi", leg.distance_miles);
        println!();
    }
}

/// Allowed drift between the map route and its source track.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerances {
    pub distance_miles: f64,
    pub coordinate_degrees: f64,
    pub elevation_feet: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Tolerances {
            distance_miles: 0.75,
            // roughly 150 m at trail latitudes
            coordinate_degrees: 0.0015,
            elevation_feet: 150.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TrackSummary {
    pub distance_miles: f64,
    pub start: GeoPoint,
    pub end: GeoPoint,
    pub elevation_range: Option<(f64, f64)>,
}

impl TrackSummary {
    pub fn compute(path: &[GeoPoint]) -> Result<Self> {
        let (Some(start), Some(end)) = (path.first(), path.last()) else {
            return Err(Error::InvalidInput("cannot summarize an empty track".to_string()));
        };
        let elevations: Vec<f64> = path.iter().filter_map(|p| p.elevation).collect();
        Ok(TrackSummary {
            distance_miles: units::meters_to_miles(distance::haversine_path_m(path)),
            start: *start,
            end: *end,
            elevation_range: elevation::extrema(&elevations),
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SyncReport {
    pub route: TrackSummary,
    pub track: TrackSummary,
    pub failures: Vec<String>,
}

impl SyncReport {
    pub fn compare(route: &[GeoPoint], track: &[GeoPoint], tolerances: Tolerances) -> Result<Self> {
        let route = TrackSummary::compute(route)?;
        let track = TrackSummary::compute(track)?;
        let mut failures = Vec::new();

        let distance_drift = (route.distance_miles - track.distance_miles).abs();
        if distance_drift > tolerances.distance_miles {
            failures.push(format!(
                "Distance drift {:.2} mi exceeds tolerance {} mi",
                distance_drift, tolerances.distance_miles
            ));
        }

        let coordinates = [
            ("startLat", route.start.lat, track.start.lat),
            ("startLon", route.start.lon, track.start.lon),
            ("endLat", route.end.lat, track.end.lat),
            ("endLon", route.end.lon, track.end.lon),
        ];
        for (label, a, b) in coordinates {
            let drift = (a - b).abs();
            if drift > tolerances.coordinate_degrees {
                failures.push(format!(
                    "{} drift {:.6}° exceeds tolerance {}°",
                    label, drift, tolerances.coordinate_degrees
                ));
            }
        }

        match (route.elevation_range, track.elevation_range) {
            (Some((route_min, route_max)), Some((track_min, track_max))) => {
                for (label, a, b) in [
                    ("minElevation", route_min, track_min),
                    ("maxElevation", route_max, track_max),
                ] {
                    let drift = (a - b).abs();
                    if drift > tolerances.elevation_feet {
                        failures.push(format!(
                            "{} drift {:.0} ft exceeds tolerance {} ft",
                            label, drift, tolerances.elevation_feet
                        ));
                    }
                }
            }
            (None, None) => {}
            _ => failures.push("Elevation present on only one side".to_string()),
        }

        Ok(SyncReport {
            route,
            track,
            failures,
        })
    }

    pub fn is_in_sync(&self) -> bool {
        self.failures.is_empty()
    }

    /// Turn drift into an error carrying every failing metric.
    pub fn into_result(self) -> Result<Self> {
        if self.is_in_sync() {
            Ok(self)
        } else {
            Err(Error::OutOfSync(self.failures))
        }
    }

    pub fn print(&self) {
        println!("{:<14} {:>10} {:>10}", "", "route", "track");
        println!(
            "{:<14} {:>10.2} {:>10.2}",
            "miles", self.route.distance_miles, self.track.distance_miles
        );
        if let (Some((route_min, route_max)), Some((track_min, track_max))) =
            (self.route.elevation_range, self.track.elevation_range)
        {
            println!("{:<14} {:>10.0} {:>10.0}", "min ft", route_min, track_min);
            println!("{:<14} {:>10.0} {:>10.0}", "max ft", route_max, track_max);
        }
    }
}
