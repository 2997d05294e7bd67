//! In-memory geometry parsed from a GeoJSON document. See [`Shape`].

use std::str::FromStr;

use geojson::GeoJson;
use serde_json::{Map, Value};
use txmap_types::geo::GeoPoint2d;
use txmap_types::Geom;

use crate::error::AssetError;

/// A feature is a geographic object with a set of named properties.
pub trait Feature {
    /// Geometry of the feature, if it has one.
    fn geometry(&self) -> Option<&Geom<GeoPoint2d>>;

    /// Value of the property with the given name.
    fn property(&self, key: &str) -> Option<&Value>;
}

/// One feature of a [`Shape`].
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeFeature {
    id: Option<String>,
    geometry: Option<Geom<GeoPoint2d>>,
    properties: Map<String, Value>,
}

impl ShapeFeature {
    /// Creates a new feature.
    pub fn new(
        id: Option<String>,
        geometry: Option<Geom<GeoPoint2d>>,
        properties: Map<String, Value>,
    ) -> Self {
        Self {
            id,
            geometry,
            properties,
        }
    }

    /// Identifier of the feature, if the document provides one.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// All properties of the feature.
    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    /// Value of a string property, exactly as stored in the document.
    pub fn string_property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(Value::as_str)
    }
}

impl Feature for ShapeFeature {
    fn geometry(&self) -> Option<&Geom<GeoPoint2d>> {
        self.geometry.as_ref()
    }

    fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

/// Parsed geometry of one GeoJSON resource.
///
/// A shape is immutable: once parsed it can only be read. It keeps the original document so
/// that the data can be exported without loss.
#[derive(Debug, Clone)]
pub struct Shape {
    features: Vec<ShapeFeature>,
    document: GeoJson,
}

impl Shape {
    /// Parses GeoJSON bytes of the resource `name`.
    ///
    /// A feature collection, a single feature and a bare geometry are all accepted. If any part
    /// of the document is invalid, the whole document is rejected with
    /// [`AssetError::Malformed`].
    pub fn from_geojson(name: &str, bytes: &[u8]) -> Result<Self, AssetError> {
        let malformed = |reason: String| AssetError::Malformed {
            name: name.to_string(),
            reason,
        };

        let text = std::str::from_utf8(bytes).map_err(|err| malformed(err.to_string()))?;
        let document = GeoJson::from_str(text).map_err(|err| malformed(err.to_string()))?;
        let features = convert_document(&document).map_err(malformed)?;

        log::debug!("Parsed shape {name} with {} features", features.len());

        Ok(Self { features, document })
    }

    /// Features of the shape, in document order.
    pub fn features(&self) -> &[ShapeFeature] {
        &self.features
    }

    /// Number of features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns true if the shape has no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// The original GeoJSON document.
    pub fn document(&self) -> &GeoJson {
        &self.document
    }
}

fn convert_document(document: &GeoJson) -> Result<Vec<ShapeFeature>, String> {
    match document {
        GeoJson::FeatureCollection(collection) => collection
            .features
            .iter()
            .enumerate()
            .map(|(index, feature)| {
                convert_feature(feature).map_err(|reason| format!("feature {index}: {reason}"))
            })
            .collect(),
        GeoJson::Feature(feature) => Ok(vec![convert_feature(feature)?]),
        GeoJson::Geometry(geometry) => Ok(vec![ShapeFeature::new(
            None,
            Some(convert_geometry(geometry)?),
            Map::new(),
        )]),
    }
}

fn convert_feature(feature: &geojson::Feature) -> Result<ShapeFeature, String> {
    let id = feature.id.as_ref().map(|id| match id {
        geojson::feature::Id::String(s) => s.clone(),
        geojson::feature::Id::Number(n) => n.to_string(),
    });
    let geometry = feature.geometry.as_ref().map(convert_geometry).transpose()?;

    Ok(ShapeFeature::new(
        id,
        geometry,
        feature.properties.clone().unwrap_or_default(),
    ))
}

fn convert_geometry(geometry: &geojson::Geometry) -> Result<Geom<GeoPoint2d>, String> {
    Geom::<GeoPoint2d>::try_from(geometry).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use txmap_types::GeometryKind;

    use super::*;
    use crate::tests::fixture;

    #[test]
    fn parses_feature_collection() {
        let shape = Shape::from_geojson("TX_Station", &fixture("TX_Station")).unwrap();
        assert_eq!(shape.len(), 20);
        assert!(shape
            .features()
            .iter()
            .all(|f| f.geometry().map(Geom::kind) == Some(GeometryKind::Point)));
        assert_eq!(shape.features()[0].string_property("N05_011"), Some("秋葉原"));
    }

    #[test]
    fn parses_bare_geometry() {
        let bytes = br#"{"type": "LineString", "coordinates": [[139.77, 35.69], [140.11, 36.08]]}"#;
        let shape = Shape::from_geojson("line", bytes).unwrap();
        assert_eq!(shape.len(), 1);
        assert!(shape.features()[0].properties().is_empty());
    }

    #[test]
    fn feature_without_geometry() {
        let text = r#"{"type": "Feature", "id": 7, "geometry": null, "properties": {"N05_011": "守谷"}}"#;
        let shape = Shape::from_geojson("station", text.as_bytes()).unwrap();
        let feature = &shape.features()[0];
        assert_eq!(feature.id(), Some("7"));
        assert!(feature.geometry().is_none());
        assert_eq!(feature.string_property("N05_011"), Some("守谷"));
    }

    #[test]
    fn truncated_json_is_malformed() {
        let bytes = fixture("TX_Railway");
        let truncated = &bytes[..bytes.len() / 2];
        let result = Shape::from_geojson("TX_Railway", truncated);
        assert_matches!(result, Err(AssetError::Malformed { name, .. }) if name == "TX_Railway");
    }

    #[test]
    fn non_geojson_is_malformed() {
        let result = Shape::from_geojson("settings", br#"{"zoom": 10}"#);
        assert_matches!(result, Err(AssetError::Malformed { .. }));

        let result = Shape::from_geojson("binary", &[0xff, 0xfe, 0x00]);
        assert_matches!(result, Err(AssetError::Malformed { .. }));
    }

    #[test]
    fn one_invalid_feature_rejects_the_document() {
        let bytes = br#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [139.99, 35.95]}, "properties": {}},
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [139.99]}, "properties": {}}
        ]}"#;
        let result = Shape::from_geojson("stations", bytes);
        assert_matches!(result, Err(AssetError::Malformed { name, .. }) if name == "stations");
    }
}
