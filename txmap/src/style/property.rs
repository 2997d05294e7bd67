//! Values of style layer properties.
//!
//! A property is either constant, a function of the map zoom ([`ZoomStops`]) or a function of
//! feature properties ([`CategoryMap`]).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TxMapError;
use crate::shape::Feature;
use crate::Color;

/// Values that can be linearly interpolated.
pub trait Interpolate: Clone {
    /// Returns the value between `self` (`k = 0`) and `other` (`k = 1`).
    fn interpolate(&self, other: &Self, k: f64) -> Self;
}

impl Interpolate for f64 {
    fn interpolate(&self, other: &Self, k: f64) -> Self {
        self + (other - self) * k
    }
}

impl Interpolate for Color {
    fn interpolate(&self, other: &Self, k: f64) -> Self {
        self.mix(*other, k)
    }
}

/// One `(zoom, value)` pair of a [`ZoomStops`] function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop<T> {
    /// Zoom level of the stop.
    pub zoom: f64,
    /// Value at that zoom level.
    pub value: T,
}

/// Piecewise-linear function of zoom, defined by a list of stops.
///
/// * at the zoom of a stop the value of that stop is returned exactly;
/// * between two stops the value is interpolated linearly;
/// * below the first stop and above the last one the value is clamped to the endpoint values.
///
/// ```
/// use txmap::style::ZoomStops;
///
/// let width = ZoomStops::new(vec![(10.0, 2.0), (18.0, 8.0)])?;
/// assert_eq!(width.eval(14.0), 5.0);
/// # Ok::<(), txmap::error::TxMapError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ZoomStops<T> {
    stops: Vec<Stop<T>>,
}

impl<T: Interpolate> ZoomStops<T> {
    /// Creates a new function. Stops must be given in strictly increasing zoom order, and there
    /// must be at least one.
    pub fn new(stops: impl IntoIterator<Item = (f64, T)>) -> Result<Self, TxMapError> {
        let stops: Vec<Stop<T>> = stops
            .into_iter()
            .map(|(zoom, value)| Stop { zoom, value })
            .collect();

        if stops.is_empty() {
            return Err(TxMapError::InvalidStops(
                "at least one stop is required".into(),
            ));
        }

        if let Some(stop) = stops.iter().find(|stop| !stop.zoom.is_finite()) {
            return Err(TxMapError::InvalidStops(format!(
                "zoom must be finite, got {}",
                stop.zoom
            )));
        }

        if let Some(pair) = stops.windows(2).find(|pair| pair[0].zoom >= pair[1].zoom) {
            return Err(TxMapError::InvalidStops(format!(
                "zoom levels must be strictly increasing, got {} before {}",
                pair[0].zoom, pair[1].zoom
            )));
        }

        Ok(Self { stops })
    }

    /// Value of the function at the given zoom.
    pub fn eval(&self, zoom: f64) -> T {
        let first = &self.stops[0];
        if zoom.is_nan() || zoom <= first.zoom {
            return first.value.clone();
        }

        for pair in self.stops.windows(2) {
            let (from, to) = (&pair[0], &pair[1]);
            if zoom == to.zoom {
                return to.value.clone();
            }
            if zoom < to.zoom {
                let k = (zoom - from.zoom) / (to.zoom - from.zoom);
                return from.value.interpolate(&to.value, k);
            }
        }

        self.stops[self.stops.len() - 1].value.clone()
    }

    /// Stops of the function.
    pub fn stops(&self) -> &[Stop<T>] {
        &self.stops
    }
}

impl<'de, T> Deserialize<'de> for ZoomStops<T>
where
    T: Interpolate + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let stops = Vec::<Stop<T>>::deserialize(deserializer)?;
        Self::new(stops.into_iter().map(|stop| (stop.zoom, stop.value)))
            .map_err(serde::de::Error::custom)
    }
}

/// A property that can depend on the map zoom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyValue<T: Interpolate> {
    /// Same value at every zoom.
    Constant(T),
    /// Value interpolated by zoom.
    Zoom(ZoomStops<T>),
}

impl<T: Interpolate> PropertyValue<T> {
    /// Value of the property at the given zoom.
    pub fn eval(&self, zoom: f64) -> T {
        match self {
            PropertyValue::Constant(value) => value.clone(),
            PropertyValue::Zoom(stops) => stops.eval(zoom),
        }
    }
}

impl<T: Interpolate> From<T> for PropertyValue<T> {
    fn from(value: T) -> Self {
        Self::Constant(value)
    }
}

impl<T: Interpolate> From<ZoomStops<T>> for PropertyValue<T> {
    fn from(value: ZoomStops<T>) -> Self {
        Self::Zoom(value)
    }
}

/// Lookup table from the string value of a feature property to a style value.
///
/// Values are compared for exact equality. Features that lack the property, have a non-string
/// value or a value not present in the table get the fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryMap<V> {
    property: String,
    entries: Vec<(String, V)>,
    fallback: V,
}

impl<V> CategoryMap<V> {
    /// Creates an empty table for the given feature property.
    pub fn new(property: impl Into<String>, fallback: V) -> Self {
        Self {
            property: property.into(),
            entries: vec![],
            fallback,
        }
    }

    /// Adds an entry. If the key is already present, its value is replaced.
    pub fn with_entry(mut self, key: impl Into<String>, value: V) -> Self {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    /// Name of the feature property the table is keyed by.
    pub fn property(&self) -> &str {
        &self.property
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[(String, V)] {
        &self.entries
    }

    /// Value for features that match no entry.
    pub fn fallback(&self) -> &V {
        &self.fallback
    }

    /// Value for the given property value.
    pub fn lookup(&self, key: &str) -> &V {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
            .unwrap_or(&self.fallback)
    }

    /// Value for the given feature.
    pub fn resolve(&self, feature: &impl Feature) -> &V {
        match feature.property(&self.property).and_then(Value::as_str) {
            Some(key) => self.lookup(key),
            None => &self.fallback,
        }
    }
}

/// A property that can depend on the feature being drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureValue<V> {
    /// Same value for every feature.
    Constant(V),
    /// Value selected by a feature property.
    Category(CategoryMap<V>),
}

impl<V> FeatureValue<V> {
    /// Value for the given feature.
    pub fn resolve(&self, feature: &impl Feature) -> &V {
        match self {
            FeatureValue::Constant(value) => value,
            FeatureValue::Category(map) => map.resolve(feature),
        }
    }
}

impl<V> From<CategoryMap<V>> for FeatureValue<V> {
    fn from(value: CategoryMap<V>) -> Self {
        Self::Category(value)
    }
}

impl From<Color> for FeatureValue<Color> {
    fn from(value: Color) -> Self {
        FeatureValue::Constant(value)
    }
}

/// Text of a label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextField {
    /// Take the text verbatim from the feature property with this name.
    Property(String),
    /// Same text for every feature.
    Constant(String),
}

impl TextField {
    /// Label text for the feature. Returns `None` if the feature has no such string property.
    pub fn resolve<'a>(&'a self, feature: &'a impl Feature) -> Option<&'a str> {
        match self {
            TextField::Property(key) => feature.property(key).and_then(Value::as_str),
            TextField::Constant(text) => Some(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use assert_matches::assert_matches;
    use serde_json::{json, Map};

    use super::*;
    use crate::shape::ShapeFeature;

    fn feature(properties: Value) -> ShapeFeature {
        let properties: Map<String, Value> = serde_json::from_value(properties).unwrap();
        ShapeFeature::new(None, None, properties)
    }

    #[test]
    fn stops_hit_endpoints_exactly() {
        let width = ZoomStops::new(vec![(10.0, 2.0), (18.0, 8.0)]).unwrap();
        assert_eq!(width.eval(10.0), 2.0);
        assert_eq!(width.eval(18.0), 8.0);
        assert_eq!(width.eval(14.0), 5.0);
    }

    #[test]
    fn stops_are_clamped_outside_range() {
        let radius = ZoomStops::new(vec![(10.0, 4.0), (18.0, 16.0)]).unwrap();
        assert_eq!(radius.eval(0.0), 4.0);
        assert_eq!(radius.eval(9.2), 4.0);
        assert_eq!(radius.eval(22.0), 16.0);
        assert_eq!(radius.eval(f64::NAN), 4.0);
    }

    #[test]
    fn stops_are_monotonic() {
        let width = ZoomStops::new(vec![(10.0, 2.0), (18.0, 8.0)]).unwrap();
        let mut previous = f64::MIN;
        for step in 0..=240 {
            let value = width.eval(step as f64 / 10.0);
            assert!(value >= previous);
            previous = value;
        }
    }

    #[test]
    fn multiple_segments() {
        let stops = ZoomStops::new(vec![(0.0, 0.0), (10.0, 1.0), (20.0, 11.0)]).unwrap();
        assert_relative_eq!(stops.eval(5.0), 0.5);
        assert_eq!(stops.eval(10.0), 1.0);
        assert_relative_eq!(stops.eval(15.0), 6.0);
    }

    #[test]
    fn invalid_stops() {
        assert_matches!(
            ZoomStops::<f64>::new(vec![]),
            Err(TxMapError::InvalidStops(_))
        );
        assert_matches!(
            ZoomStops::new(vec![(18.0, 8.0), (10.0, 2.0)]),
            Err(TxMapError::InvalidStops(_))
        );
        assert_matches!(
            ZoomStops::new(vec![(10.0, 2.0), (10.0, 8.0)]),
            Err(TxMapError::InvalidStops(_))
        );
        assert_matches!(
            ZoomStops::new(vec![(f64::INFINITY, 2.0)]),
            Err(TxMapError::InvalidStops(_))
        );
    }

    #[test]
    fn color_stops() {
        let color = ZoomStops::new(vec![(0.0, Color::BLACK), (10.0, Color::WHITE)]).unwrap();
        assert_eq!(color.eval(5.0), Color::rgba(128, 128, 128, 255));
    }

    #[test]
    fn deserialized_stops_are_validated() {
        let stops: ZoomStops<f64> =
            serde_json::from_value(json!([{"zoom": 10.0, "value": 2.0}, {"zoom": 18.0, "value": 8.0}]))
                .unwrap();
        assert_eq!(stops.eval(14.0), 5.0);

        let result: Result<ZoomStops<f64>, _> =
            serde_json::from_value(json!([{"zoom": 18.0, "value": 2.0}, {"zoom": 10.0, "value": 8.0}]));
        assert!(result.is_err());
    }

    #[test]
    fn category_lookup() {
        let map = CategoryMap::new("N03_001", Color::BLACK)
            .with_entry("東京都", Color::RED)
            .with_entry("千葉県", Color::GREEN);

        assert_eq!(map.resolve(&feature(json!({"N03_001": "東京都"}))), &Color::RED);
        assert_eq!(map.resolve(&feature(json!({"N03_001": "千葉県"}))), &Color::GREEN);
        assert_eq!(map.resolve(&feature(json!({"N03_001": "栃木県"}))), &Color::BLACK);
        assert_eq!(map.resolve(&feature(json!({"N03_001": 13}))), &Color::BLACK);
        assert_eq!(map.resolve(&feature(json!({}))), &Color::BLACK);
    }

    #[test]
    fn category_entry_is_replaced() {
        let map = CategoryMap::new("N03_001", 0)
            .with_entry("東京都", 1)
            .with_entry("東京都", 2);
        assert_eq!(map.entries().len(), 1);
        assert_eq!(map.lookup("東京都"), &2);
    }

    #[test]
    fn text_field_is_verbatim() {
        let field = TextField::Property("N05_011".into());
        let station = feature(json!({"N05_011": "守谷"}));
        assert_eq!(field.resolve(&station), Some("守谷"));
        assert_eq!(field.resolve(&feature(json!({"name": "守谷"}))), None);
    }
}
