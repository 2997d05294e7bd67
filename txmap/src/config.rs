//! Map configuration: which base style to use, where to look and what to draw.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TxMapError;
use crate::map::{MapHostBuilder, OverlayPlan};
use crate::Color;

/// Environment variable with the style service API key, used when the configuration does not
/// set one.
pub const API_KEY_ENV: &str = "MAPTILER_API_KEY";

/// Initial view of the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Latitude of the center in degrees.
    pub lat: f64,
    /// Longitude of the center in degrees.
    pub lon: f64,
    /// Zoom level.
    pub zoom: f64,
}

/// Configuration of a map.
///
/// Usually read from JSON:
///
/// ```json
/// {
///   "style_url": "https://api.maptiler.com/maps/jp-mierune-gray/style.json?key={key}",
///   "camera": { "lat": 35.8949, "lon": 139.9374, "zoom": 9.2 },
///   "accent": "#FF8000",
///   "overlay": { "railway": "TX_Railway", "station": "TX_Station" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// URL of the base style. A `{key}` placeholder is replaced by the API key.
    pub style_url: String,
    /// API key of the style service. If not set, [`API_KEY_ENV`] is used.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Initial view.
    pub camera: CameraConfig,
    /// Color of the railway and stations.
    #[serde(default = "default_accent")]
    pub accent: Color,
    /// Resources drawn over the base map.
    #[serde(default)]
    pub overlay: OverlayPlan,
}

fn default_accent() -> Color {
    Color::ORANGE
}

impl MapConfig {
    /// Gray base map with the line drawn in orange.
    pub fn mierune_gray() -> Self {
        Self {
            style_url: "https://api.maptiler.com/maps/jp-mierune-gray/style.json?key={key}".into(),
            api_key: None,
            camera: CameraConfig {
                lat: 35.894930906699322,
                lon: 139.937432307518321,
                zoom: 9.2,
            },
            accent: Color::ORANGE,
            overlay: OverlayPlan::default(),
        }
    }

    /// Dark base map with the line drawn in cyan.
    pub fn mierune_dark() -> Self {
        Self {
            style_url: "https://api.maptiler.com/maps/jp-mierune-dark/style.json?key={key}".into(),
            api_key: None,
            camera: CameraConfig {
                lat: 35.893056,
                lon: 139.952417,
                zoom: 10.0,
            },
            accent: Color::CYAN,
            overlay: OverlayPlan::default(),
        }
    }

    /// Parses configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, TxMapError> {
        serde_json::from_str(json).map_err(|err| TxMapError::Configuration(err.to_string()))
    }

    /// Reads configuration from a JSON file.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, TxMapError> {
        let path = path.as_ref();
        log::debug!("Reading configuration from {}", path.display());
        let json = tokio::fs::read_to_string(path).await?;
        Self::from_json_str(&json)
    }

    /// Style URL with the API key from the configuration or from the environment.
    pub fn style_url(&self) -> Result<String, TxMapError> {
        match &self.api_key {
            Some(key) => self.style_url_with_key(Some(key)),
            None => self.style_url_with_key(std::env::var(API_KEY_ENV).ok().as_deref()),
        }
    }

    /// Style URL with the given API key.
    ///
    /// Fails if the URL template contains a `{key}` placeholder and no key is given, or if the
    /// template is not valid.
    pub fn style_url_with_key(&self, key: Option<&str>) -> Result<String, TxMapError> {
        let mut vars = HashMap::new();
        if let Some(key) = key {
            vars.insert("key".to_string(), key.to_string());
        }

        strfmt::strfmt(&self.style_url, &vars).map_err(|err| match err {
            strfmt::FmtError::KeyError(_) => TxMapError::Configuration(format!(
                "style URL requires an API key; set `api_key` or the {API_KEY_ENV} environment variable"
            )),
            err => TxMapError::Configuration(format!("invalid style URL template: {err}")),
        })
    }

    /// Creates a map host builder with this configuration.
    pub fn to_host_builder(&self) -> Result<MapHostBuilder, TxMapError> {
        Ok(MapHostBuilder::new(self.style_url()?)
            .with_latlon(self.camera.lat, self.camera.lon)
            .with_zoom(self.camera.zoom)
            .with_accent(self.accent)
            .with_overlay(self.overlay.clone()))
    }
}
