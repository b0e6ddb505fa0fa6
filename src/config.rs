//! Scene configuration.
//!
//! [`SceneConfig::default`] describes the stock demo: the label "GARRETT"
//! plus 200 random copies, a camera at (1, 1, 2) and the bundled assets. Any
//! field can be overridden from JSON; missing fields keep their defaults.

use anyhow::Context;
use serde::Deserialize;

use crate::populate::PopulateOptions;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub fovy_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub enable_damping: bool,
    pub damping_factor: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [1.0, 1.0, 2.0],
            target: [0.0, 0.0, 0.0],
            fovy_degrees: 75.0,
            near: 0.1,
            far: 100.0,
            enable_damping: true,
            damping_factor: 0.05,
        }
    }
}

/// Paths relative to the asset root.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetManifest {
    pub font: String,
    pub main_matcap: String,
    pub matcap_pool: Vec<String>,
    pub background: Option<String>,
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self {
            font: "fonts/flow_block.typeface.json".to_string(),
            main_matcap: "textures/matcaps/3.png".to_string(),
            matcap_pool: (1..=8)
                .map(|i| format!("textures/matcaps/{}.png", i))
                .collect(),
            background: Some("bkgd.png".to_string()),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    pub label: String,
    pub population: PopulateOptions,
    pub camera: CameraConfig,
    pub assets: AssetManifest,
    /// Shown where no background texture is drawn.
    pub clear_colour: [f64; 4],
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            label: "GARRETT".to_string(),
            population: PopulateOptions::default(),
            camera: CameraConfig::default(),
            assets: AssetManifest::default(),
            clear_colour: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

impl SceneConfig {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("malformed scene configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_the_stock_demo() {
        let config = SceneConfig::default();
        assert_eq!(config.label, "GARRETT");
        assert_eq!(config.population.count, 200);
        assert_eq!(config.assets.matcap_pool.len(), 8);
        assert_eq!(config.assets.main_matcap, "textures/matcaps/3.png");
        assert_eq!(config.camera.position, [1.0, 1.0, 2.0]);
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let config = SceneConfig::from_json(
            r#"{ "label": "HELLO", "population": { "count": 12, "depth": 0.5 } }"#,
        )
        .unwrap();
        assert_eq!(config.label, "HELLO");
        assert_eq!(config.population.count, 12);
        assert_eq!(config.population.text.extrude.depth, 0.5);
        assert_eq!(config.population.text.size, 1.0);
        assert_eq!(config.camera, CameraConfig::default());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(SceneConfig::from_json("{ \"label\": 3 }").is_err());
    }
}
