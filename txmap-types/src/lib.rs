//! Geometry types for the `txmap` style composition crate.
//!
//! All geometries are generic over the point type, but the crate only ships one point
//! implementation: [`GeoPoint2d`](geo::GeoPoint2d), a point given by latitude and longitude in
//! degrees. The [`Geom`] sum type is what a parsed GeoJSON geometry converts into.

pub mod contour;
pub mod error;
pub mod geo;
pub mod geometry;
pub mod polygon;

#[cfg(feature = "geojson")]
pub mod geojson;

pub use contour::{ClosedContour, Contour};
pub use geometry::{Geom, GeometryKind};
pub use polygon::Polygon;
