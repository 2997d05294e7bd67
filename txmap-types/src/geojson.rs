//! Conversion of GeoJSON geometries into [`Geom`].
//!
//! Conversion is strict: a single invalid position or ring fails the whole geometry.

use ::geojson::{LineStringType, PolygonType, Position, Value};

use crate::contour::{ClosedContour, Contour};
use crate::error::TxMapTypesError;
use crate::geo::{GeoPoint2d, NewGeoPoint};
use crate::geometry::Geom;
use crate::polygon::Polygon;

impl TryFrom<&::geojson::Geometry> for Geom<GeoPoint2d> {
    type Error = TxMapTypesError;

    fn try_from(value: &::geojson::Geometry) -> Result<Self, Self::Error> {
        convert_value(&value.value)
    }
}

impl TryFrom<::geojson::Geometry> for Geom<GeoPoint2d> {
    type Error = TxMapTypesError;

    fn try_from(value: ::geojson::Geometry) -> Result<Self, Self::Error> {
        convert_value(&value.value)
    }
}

fn convert_value(value: &Value) -> Result<Geom<GeoPoint2d>, TxMapTypesError> {
    Ok(match value {
        Value::Point(p) => Geom::Point(convert_position(p)?),
        Value::MultiPoint(points) => Geom::MultiPoint(convert_positions(points)?),
        Value::LineString(line) => Geom::Contour(convert_contour(line)?),
        Value::MultiLineString(lines) => Geom::MultiContour(
            lines
                .iter()
                .map(convert_contour)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Value::Polygon(polygon) => Geom::Polygon(convert_polygon(polygon)?),
        Value::MultiPolygon(polygons) => Geom::MultiPolygon(
            polygons
                .iter()
                .map(convert_polygon)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Value::GeometryCollection(members) => Geom::Collection(
            members
                .iter()
                .map(|g| convert_value(&g.value))
                .collect::<Result<Vec<_>, _>>()?,
        ),
    })
}

fn convert_position(position: &Position) -> Result<GeoPoint2d, TxMapTypesError> {
    if position.len() < 2 {
        return Err(TxMapTypesError::Conversion(
            "point must contain at least 2 dimensions".to_string(),
        ));
    }

    let (lon, lat) = (position[0], position[1]);
    if !lon.is_finite() || !lat.is_finite() {
        return Err(TxMapTypesError::Conversion(format!(
            "point coordinates must be finite, got [{lon}, {lat}]"
        )));
    }

    Ok(GeoPoint2d::lonlat(lon, lat))
}

fn convert_positions(positions: &[Position]) -> Result<Vec<GeoPoint2d>, TxMapTypesError> {
    positions.iter().map(convert_position).collect()
}

fn convert_contour(line_string: &LineStringType) -> Result<Contour<GeoPoint2d>, TxMapTypesError> {
    if line_string.len() < 2 {
        return Err(TxMapTypesError::Conversion(
            "line string must contain at least 2 positions".to_string(),
        ));
    }

    let is_closed = line_string.len() > 2 && line_string[0] == line_string[line_string.len() - 1];
    let mut points = convert_positions(line_string)?;
    if is_closed {
        points.pop();
    }

    Ok(Contour::new(points, is_closed))
}

fn convert_ring(ring: &LineStringType) -> Result<ClosedContour<GeoPoint2d>, TxMapTypesError> {
    if ring.len() < 4 {
        return Err(TxMapTypesError::Conversion(
            "polygon ring must contain at least 4 positions".to_string(),
        ));
    }

    convert_contour(ring)?
        .into_closed()
        .ok_or_else(|| TxMapTypesError::Conversion("polygon ring is not closed".to_string()))
}

fn convert_polygon(polygon: &PolygonType) -> Result<Polygon<GeoPoint2d>, TxMapTypesError> {
    let Some((outer, inner)) = polygon.split_first() else {
        return Err(TxMapTypesError::Conversion(
            "polygon must have an outer ring".to_string(),
        ));
    };

    Ok(Polygon::new(
        convert_ring(outer)?,
        inner.iter().map(convert_ring).collect::<Result<Vec<_>, _>>()?,
    ))
}
