//! Hand-specified original coordinates for named features.
//!
//! Loaded from a JSON object mapping a feature name to `[lon, lat]`:
//!
//! ```json
//! { "Burney Falls State Park": [-121.65, 41.012] }
//! ```

use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ManualOverrides(HashMap<String, [f64; 2]>);

impl ManualOverrides {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let overrides: ManualOverrides =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| Error::json(path, e))?;
        tracing::info!(
            "Loaded {} manual overrides from {}",
            overrides.len(),
            path.display()
        );
        Ok(overrides)
    }

    pub fn get(&self, name: &str) -> Option<[f64; 2]> {
        self.0.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, [f64; 2])> for ManualOverrides {
    fn from_iter<I: IntoIterator<Item = (String, [f64; 2])>>(iter: I) -> Self {
        ManualOverrides(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_overrides() {
        let overrides: ManualOverrides = serde_json::from_str(
            r#"{ "Horse Camp": [-121.9, 40.85], "Black Rock Camp": [-121.8, 40.9] }"#,
        )
        .unwrap();
        assert_eq!(overrides.len(), 2);
        assert_eq!(overrides.get("Horse Camp"), Some([-121.9, 40.85]));
        assert_eq!(overrides.get("Nowhere"), None);
    }

    #[test]
    fn test_rejects_wrong_arity() {
        let result = serde_json::from_str::<ManualOverrides>(r#"{ "Camp": [1.0] }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "trail-snap-overrides-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{ "Vista Camp": [-122.3, 41.1] }"#).unwrap();
        let overrides = ManualOverrides::load(&path).unwrap();
        assert_eq!(overrides.get("Vista Camp"), Some([-122.3, 41.1]));
        let _ = std::fs::remove_file(&path);
    }
}
