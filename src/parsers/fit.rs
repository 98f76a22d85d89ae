use super::{Parser, open_track};
use crate::error::{Error, Result};
use crate::projection::GeoPoint;
use crate::units::{meters_to_feet, round_to};
use fitparser::profile::MesgNum;
use fitparser::{FitDataRecord, Value};
use std::io::Read;
use std::path::Path;

/**
 * Parse .fit and .fit.gz files, as exported for Garmin courses and activities.
 */
pub struct FitParser;

impl Parser for FitParser {
    fn parse(&self, file_path: &Path) -> Result<Vec<GeoPoint>> {
        let mut reader = open_track(file_path)?;
        let mut data = Vec::new();
        reader
            .read_to_end(&mut data)
            .map_err(|e| Error::io(file_path, e))?;

        let fit_file = fitparser::from_bytes(&data)?;
        Ok(fit_file
            .iter()
            .filter(|record| matches!(record.kind(), MesgNum::Record))
            .filter_map(extract_point_from_record)
            .collect())
    }

    fn name(&self) -> &'static str {
        "FIT Parser"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".fit"]
    }
}

fn extract_point_from_record(record: &FitDataRecord) -> Option<GeoPoint> {
    let mut latitude: Option<f64> = None;
    let mut longitude: Option<f64> = None;
    let mut altitude: Option<f64> = None;

    for field in record.fields() {
        match field.name() {
            "position_lat" => latitude = extract_numeric_value(field.value()),
            "position_long" => longitude = extract_numeric_value(field.value()),
            "enhanced_altitude" => altitude = extract_numeric_value(field.value()).or(altitude),
            "altitude" if altitude.is_none() => altitude = extract_numeric_value(field.value()),
            _ => {} // ignore other fields
        }
    }

    let (lat, lon) = (latitude?, longitude?);
    Some(GeoPoint {
        lon: semicircles_to_degrees(lon),
        lat: semicircles_to_degrees(lat),
        elevation: altitude.map(|m| round_to(meters_to_feet(m), 1)),
    })
}

fn semicircles_to_degrees(semicircles: f64) -> f64 {
    semicircles * (180.0 / 2_147_483_648.0)
}

fn extract_numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::SInt32(v) => Some(*v as f64),
        Value::UInt32(v) => Some(*v as f64),
        Value::SInt16(v) => Some(*v as f64),
        Value::UInt16(v) => Some(*v as f64),
        Value::SInt8(v) => Some(*v as f64),
        Value::UInt8(v) => Some(*v as f64),
        Value::Float32(v) => Some(*v as f64),
        Value::Float64(v) => Some(*v),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semicircles_to_degrees() {
        assert_eq!(semicircles_to_degrees(0.0), 0.0);
        assert_eq!(semicircles_to_degrees(1_073_741_824.0), 90.0);
        assert_eq!(semicircles_to_degrees(-1_073_741_824.0), -90.0);
    }

    #[test]
    fn test_extract_numeric_value() {
        assert_eq!(extract_numeric_value(&Value::SInt32(-5)), Some(-5.0));
        assert_eq!(extract_numeric_value(&Value::Float64(701.5)), Some(701.5));
        assert_eq!(extract_numeric_value(&Value::String("x".to_string())), None);
    }

    #[test]
    fn test_garbage_file_is_an_error() {
        let path = std::env::temp_dir().join(format!(
            "trail-snap-fit-{}.fit",
            std::process::id()
        ));
        std::fs::write(&path, b"definitely not a fit file").unwrap();
        assert!(FitParser.parse(&path).is_err());
        let _ = std::fs::remove_file(&path);
    }
}
