use txmap_types::geo::{GeoPoint, GeoPoint2d};
use txmap_types::latlon;

use super::{Camera, MapHost, OverlayPlan};
use crate::compose::LayerComposer;
use crate::error::TxMapError;
use crate::Color;

const DEFAULT_ZOOM: f64 = 10.0;

/// Convenience type to initialize a [`MapHost`].
///
/// ```
/// use txmap::{Color, MapHostBuilder};
///
/// let host = MapHostBuilder::new("https://tile.openstreetmap.jp/styles/maptiler-basic-ja/style.json")
///     .with_latlon(35.893056, 139.952417)
///     .with_zoom(10.0)
///     .with_accent(Color::CYAN)
///     .build()?;
/// assert!(!host.is_ready());
/// # Ok::<(), txmap::error::TxMapError>(())
/// ```
pub struct MapHostBuilder {
    style_url: String,
    position: GeoPoint2d,
    zoom: f64,
    accent: Color,
    overlay: OverlayPlan,
}

impl MapHostBuilder {
    /// Creates a builder for a map with the base style at `style_url`.
    ///
    /// By default the map is centered at `(0, 0)` at zoom 10, the overlay is drawn in
    /// [`Color::ORANGE`] and follows [`OverlayPlan::default`].
    pub fn new(style_url: impl Into<String>) -> Self {
        Self {
            style_url: style_url.into(),
            position: latlon!(0.0, 0.0),
            zoom: DEFAULT_ZOOM,
            accent: Color::ORANGE,
            overlay: OverlayPlan::default(),
        }
    }

    /// Sets the center point of the map.
    pub fn with_position(mut self, position: impl GeoPoint<Num = f64>) -> Self {
        self.position = GeoPoint2d::from(&position);
        self
    }

    /// Sets the center point of the map to the given coordinates.
    pub fn with_latlon(self, lat: f64, lon: f64) -> Self {
        self.with_position(latlon!(lat, lon))
    }

    /// Sets the initial zoom level.
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    /// Sets the color of the railway and station layers.
    pub fn with_accent(mut self, accent: Color) -> Self {
        self.accent = accent;
        self
    }

    /// Sets the resources to draw over the base map.
    pub fn with_overlay(mut self, overlay: OverlayPlan) -> Self {
        self.overlay = overlay;
        self
    }

    /// Consumes the builder and creates the host. The style is not loaded yet.
    ///
    /// Fails if the style URL is empty or the camera parameters are out of range.
    pub fn build(self) -> Result<MapHost, TxMapError> {
        let MapHostBuilder {
            style_url,
            position,
            zoom,
            accent,
            overlay,
        } = self;

        if style_url.trim().is_empty() {
            return Err(TxMapError::Configuration("style URL is empty".into()));
        }

        let camera = Camera::new(position, zoom)?;
        Ok(MapHost::new(
            style_url,
            camera,
            LayerComposer::new(accent),
            overlay,
        ))
    }
}
