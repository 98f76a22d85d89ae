/// Meters in one statute mile, as used by the trail data.
pub const METERS_PER_MILE: f64 = 1609.34;

pub const FEET_PER_METER: f64 = 3.28084;

/// WGS84 meridional approximation.
pub const METERS_PER_DEGREE_LAT: f64 = 111_132.92;

/// Mean Earth radius for haversine distances.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

pub fn miles_to_meters(miles: f64) -> f64 {
    miles * METERS_PER_MILE
}

pub fn meters_to_miles(meters: f64) -> f64 {
    meters / METERS_PER_MILE
}

pub fn meters_to_feet(meters: f64) -> f64 {
    meters * FEET_PER_METER
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
