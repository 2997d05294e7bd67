//! TX Map draws a railway line, its stations and, optionally, the surrounding municipalities
//! over a base map whose appearance comes from a third-party vector style document.
//!
//! # Quick start
//!
//! ```no_run
//! use txmap::asset::BundleAssetLoader;
//! use txmap::config::MapConfig;
//! use txmap::style::HttpStyleLoader;
//!
//! # tokio_test::block_on(async {
//! let mut host = MapConfig::mierune_gray().to_host_builder()?.build()?;
//! let report = host
//!     .start(&HttpStyleLoader::new(), &BundleAssetLoader::new("txmap/assets"))
//!     .await?;
//!
//! println!("{}", host.export()?);
//! # Ok::<(), txmap::error::TxMapError>(())
//! # });
//! ```
//!
//! # Main components
//!
//! * [`MapHost`] owns the [`Style`](style::Style) and tracks whether the base style document
//!   has been loaded. Layers can only be added once it has.
//! * [`asset`] loaders fetch the raw GeoJSON resources by name.
//! * [`LayerComposer`](compose::LayerComposer) parses the resources into
//!   [`Shape`](shape::Shape)s and adds the sources and layers that draw them.
//! * The [`style`] model describes layers with constant, zoom dependent and feature dependent
//!   properties. A style can be exported as a JSON style document or evaluated into a
//!   [`RenderPlan`](render::RenderPlan).

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

pub mod asset;
mod color;
pub mod compose;
pub mod config;
pub mod error;
mod map;
pub mod render;
pub mod shape;
pub mod style;

#[cfg(test)]
pub(crate) mod tests;

pub use color::Color;
pub use map::{
    Camera, MapHost, MapHostBuilder, OverlayLayer, OverlayPlan, OverlayReport, StyleLoadedHandler,
    StyleState, MAX_ZOOM,
};

// Reexport txmap_types
pub use txmap_types;
