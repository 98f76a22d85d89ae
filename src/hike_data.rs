//! Serde model of the hike data artifact consumed by the map.
//!
//! Only the fields this tool reads or writes are typed; everything else is
//! carried through untouched in the flattened `extra` maps.

use crate::error::{Error, Result};
use crate::projection::GeoPoint;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HikeData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<RouteData>,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RouteData {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<GeoPoint>,
    /// Older artifacts store the line as GeoJSON geometry instead of `path`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<LineGeometry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LineGeometry {
    #[serde(default)]
    pub coordinates: Vec<GeoPoint>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub geometry: PointGeometry,
    #[serde(default)]
    pub properties: FeatureProperties,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PointGeometry {
    #[serde(default)]
    pub coordinates: Vec<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<i64>,
    /// Miles hiked on this day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_coordinates: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_mile: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl HikeData {
    /// The route line, preferring `route.path` over `route.geometry`.
    pub fn route_path(&self) -> Result<&[GeoPoint]> {
        let route = self.route.as_ref().ok_or(Error::MissingRoute)?;
        let path = if route.path.is_empty() {
            route
                .geometry
                .as_ref()
                .map(|g| g.coordinates.as_slice())
                .unwrap_or_default()
        } else {
            route.path.as_slice()
        };
        if path.is_empty() {
            return Err(Error::MissingRoute);
        }
        Ok(path)
    }

    /// Replace the route line and refresh its elevation range.
    pub fn set_route_path(&mut self, path: Vec<GeoPoint>) {
        let route = self.route.get_or_insert_with(RouteData::default);
        let elevations: Vec<f64> = path.iter().filter_map(|p| p.elevation).collect();
        if let Some((min, max)) = crate::elevation::extrema(&elevations) {
            let properties = route.properties.get_or_insert_with(Map::new);
            properties.insert("min_elevation".to_string(), Value::from(min));
            properties.insert("max_elevation".to_string(), Value::from(max));
        }
        route.path = path;
    }

    /// Indices of features that carry a day number, ordered by day.
    pub fn day_features(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self
            .features
            .iter()
            .enumerate()
            .filter(|(_, f)| f.properties.day.is_some_and(|day| day >= 0))
            .map(|(i, _)| i)
            .collect();
        indices.sort_by_key(|&i| self.features[i].properties.day);
        indices
    }
}

impl FeatureProperties {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}
