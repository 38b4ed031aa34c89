//! Configuration for the coverage map
//!
//! Every render cycle builds a fresh map from a [`MapConfig`], so the values
//! here are the only things that survive between cycles apart from the payload
//! and the filter flags. All fields have page defaults and can be overridden
//! from a JSON document.

use crate::{
    core::{constants, geo::LatLng},
    Result,
};
use serde::{Deserialize, Serialize};

/// How the normalizer treats numeric fields that fail to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoercionPolicy {
    /// Malformed numbers become NaN and the record is still rendered.
    #[default]
    Lenient,
    /// A non-finite coordinate or radius aborts the render cycle.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub center: LatLng,
    pub zoom: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        let (lat, lng) = constants::INITIAL_CENTER;
        Self {
            center: LatLng::new(lat, lng),
            zoom: constants::INITIAL_ZOOM,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileConfig {
    pub url_template: String,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub attribution: String,
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            url_template: constants::DEFAULT_TILE_URL.to_string(),
            min_zoom: constants::DEFAULT_MIN_ZOOM,
            max_zoom: constants::DEFAULT_MAX_ZOOM,
            attribution: constants::DEFAULT_ATTRIBUTION.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Search endpoint used in network mode
    pub endpoint: String,
    /// Center and zoom every fresh map starts from
    pub view: ViewConfig,
    pub tiles: TileConfig,
    /// Prefix joined to icon file names (page root in the browser)
    pub icon_root: String,
    pub export_file_name: String,
    pub coercion: CoercionPolicy,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            endpoint: constants::DEFAULT_ENDPOINT.to_string(),
            view: ViewConfig::default(),
            tiles: TileConfig::default(),
            icon_root: String::new(),
            export_file_name: constants::EXPORT_FILE_NAME.to_string(),
            coercion: CoercionPolicy::default(),
        }
    }
}

impl MapConfig {
    /// Parses a configuration document; missing keys keep their defaults.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_icon_root(mut self, icon_root: impl Into<String>) -> Self {
        self.icon_root = icon_root.into();
        self
    }

    pub fn with_coercion(mut self, coercion: CoercionPolicy) -> Self {
        self.coercion = coercion;
        self
    }

    /// Resolves an icon file against `icon_root`.
    pub fn icon_url(&self, icon: &str) -> String {
        if self.icon_root.is_empty() {
            icon.to_string()
        } else {
            format!("{}/{}", self.icon_root.trim_end_matches('/'), icon)
        }
    }
}
