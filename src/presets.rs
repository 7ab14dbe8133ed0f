//! Per-model framing presets.
//!
//! A preset fixes how a garment model is placed in the scene and where the
//! camera starts looking at it. Tables are read-only once built; the built-in
//! table can be replaced by one loaded from JSON.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::orbit_controls::{DEFAULT_MAX_DISTANCE, DEFAULT_MIN_DISTANCE};

/// Framing configuration for one model variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelPreset {
    /// Uniform scale applied to the mesh
    pub scale: f32,
    /// Mesh placement offset
    pub position: [f32; 3],
    /// Camera starting position
    pub camera_position: [f32; 3],
    /// Orbit target; origin when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_target: Option<[f32; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_distance: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_distance: Option<f32>,
}

impl ModelPreset {
    pub fn offset(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn camera_position(&self) -> Vec3 {
        Vec3::from_array(self.camera_position)
    }

    pub fn camera_target(&self) -> Vec3 {
        self.camera_target.map(Vec3::from_array).unwrap_or(Vec3::ZERO)
    }

    /// Minimum orbit distance, or the controller default
    pub fn min_distance_or_default(&self) -> f32 {
        self.min_distance.unwrap_or(DEFAULT_MIN_DISTANCE)
    }

    /// Maximum orbit distance, or the controller default
    pub fn max_distance_or_default(&self) -> f32 {
        self.max_distance.unwrap_or(DEFAULT_MAX_DISTANCE)
    }
}

/// Presets keyed by model id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PresetTable {
    presets: BTreeMap<String, ModelPreset>,
}

impl PresetTable {
    /// The table the previewer ships with
    pub fn builtin() -> &'static PresetTable {
        static BUILTIN: OnceLock<PresetTable> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            PresetTable::default()
                .with(
                    "shirt",
                    ModelPreset {
                        scale: 2.0,
                        position: [0.0, -3.5, 0.0],
                        camera_position: [0.0, 0.0, 4.5],
                        camera_target: Some([0.0, -1.2, 0.0]),
                        min_distance: Some(3.0),
                        max_distance: Some(10.0),
                    },
                )
                .with(
                    "shirt2",
                    ModelPreset {
                        scale: 0.2,
                        position: [0.0, -0.6, 0.0],
                        camera_position: [0.0, 0.0, 3.0],
                        camera_target: Some([0.0, -0.8, 0.0]),
                        min_distance: Some(3.5),
                        max_distance: Some(12.0),
                    },
                )
        })
    }

    /// Parse a JSON object of `{ "<model id>": { ...preset } }`
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse preset table")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read preset file: {:?}", path))?;
        let table = Self::from_json(&json)?;

        log::info!("Loaded {} presets from {:?}", table.len(), path);
        Ok(table)
    }

    pub fn with(mut self, model_id: impl Into<String>, preset: ModelPreset) -> Self {
        self.presets.insert(model_id.into(), preset);
        self
    }

    pub fn get(&self, model_id: &str) -> Option<&ModelPreset> {
        self.presets.get(model_id)
    }

    pub fn contains(&self, model_id: &str) -> bool {
        self.presets.contains_key(model_id)
    }

    /// Model ids in sorted order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_both_shirts() {
        let table = PresetTable::builtin();
        assert_eq!(table.ids().collect::<Vec<_>>(), vec!["shirt", "shirt2"]);
    }

    #[test]
    fn test_shirt_preset_values() {
        let shirt = PresetTable::builtin().get("shirt").unwrap();
        assert_eq!(shirt.scale, 2.0);
        assert_eq!(shirt.offset(), Vec3::new(0.0, -3.5, 0.0));
        assert_eq!(shirt.camera_position(), Vec3::new(0.0, 0.0, 4.5));
        assert_eq!(shirt.camera_target(), Vec3::new(0.0, -1.2, 0.0));
        assert_eq!(shirt.min_distance, Some(3.0));
        assert_eq!(shirt.max_distance, Some(10.0));
    }

    #[test]
    fn test_missing_optionals_fall_back() {
        let table = PresetTable::from_json(
            r#"{ "jacket": { "scale": 1.0, "position": [0, 0, 0], "cameraPosition": [0, 1, 5] } }"#,
        )
        .unwrap();

        let jacket = table.get("jacket").unwrap();
        assert_eq!(jacket.camera_target(), Vec3::ZERO);
        assert_eq!(jacket.min_distance, None);
        assert_eq!(jacket.min_distance_or_default(), 2.0);
        assert_eq!(jacket.max_distance_or_default(), 8.0);
    }

    #[test]
    fn test_json_uses_camel_case_keys() {
        let json = serde_json::to_value(PresetTable::builtin()).unwrap();
        assert_eq!(json["shirt2"]["cameraTarget"][1], serde_json::json!(-0.8f32));
        assert_eq!(json["shirt2"]["maxDistance"], serde_json::json!(12.0));
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(PresetTable::from_json("{ \"shirt\": { \"scale\": \"big\" } }").is_err());
    }

    #[test]
    fn test_unknown_model() {
        assert!(PresetTable::builtin().get("hoodie").is_none());
        assert!(!PresetTable::builtin().contains("hoodie"));
    }
}
