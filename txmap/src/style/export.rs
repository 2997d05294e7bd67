//! Conversion of a [`Style`] into a style document that a MapLibre-compatible renderer can
//! display.

use ahash::HashSet;
use serde_json::{json, Map, Value};
use txmap_types::geo::GeoPoint;

use super::layer::{
    CircleLayer, FillLayer, LabelCollision, LineCap, LineJoin, LineLayer, StyleLayer,
    SymbolLayer, TextJustify,
};
use super::property::{FeatureValue, PropertyValue, TextField};
use super::Style;
use crate::error::TxMapError;
use crate::map::Camera;
use crate::Color;

impl Style {
    /// Exports the style as a JSON style document.
    ///
    /// The base document is kept as is. Sources of this style are added to its `sources`
    /// object as inline `geojson` sources, and the layers are appended after the base layers in
    /// draw order. The camera is written as the initial `center` and `zoom`.
    ///
    /// Fails with [`TxMapError::DuplicateSource`] or [`TxMapError::DuplicateLayer`] if an id of
    /// this style is already used in the base document.
    pub fn export(&self, camera: &Camera) -> Result<Value, TxMapError> {
        let mut document = match self.document.json() {
            Value::Object(object) => object.clone(),
            _ => Map::new(),
        };

        let mut sources = match document.remove("sources") {
            Some(Value::Object(sources)) => sources,
            _ => Map::new(),
        };
        for source in &self.sources {
            if sources.contains_key(source.id()) {
                return Err(TxMapError::DuplicateSource(source.id().to_string()));
            }
            let data = serde_json::to_value(source.shape().document())
                .map_err(|err| TxMapError::StyleDocument(err.to_string()))?;
            sources.insert(
                source.id().to_string(),
                json!({ "type": "geojson", "data": data }),
            );
        }

        let mut layers = match document.remove("layers") {
            Some(Value::Array(layers)) => layers,
            _ => vec![],
        };
        let base_ids: HashSet<&str> = layers
            .iter()
            .filter_map(|layer| layer.get("id").and_then(Value::as_str))
            .collect();
        if let Some(layer) = self.layers.iter().find(|layer| base_ids.contains(layer.id())) {
            return Err(TxMapError::DuplicateLayer(layer.id().to_string()));
        }

        for (index, layer) in self.layers.iter().enumerate() {
            let mut exported = export_layer(layer);
            if !self.layers.is_visible(index) {
                if let Some(layout) = exported.get_mut("layout").and_then(Value::as_object_mut) {
                    layout.insert("visibility".into(), "none".into());
                }
            }
            layers.push(exported);
        }

        document.entry("version").or_insert(json!(8));
        document.insert("sources".into(), Value::Object(sources));
        document.insert("layers".into(), Value::Array(layers));
        document.insert(
            "center".into(),
            json!([camera.center().lon(), camera.center().lat()]),
        );
        document.insert("zoom".into(), json!(camera.zoom()));

        Ok(Value::Object(document))
    }
}

fn export_layer(layer: &StyleLayer) -> Value {
    let (layout, paint) = match layer {
        StyleLayer::Line(line) => line_properties(line),
        StyleLayer::Circle(circle) => circle_properties(circle),
        StyleLayer::Symbol(symbol) => symbol_properties(symbol),
        StyleLayer::Fill(fill) => fill_properties(fill),
    };

    json!({
        "id": layer.id(),
        "type": layer.kind().as_str(),
        "source": layer.source_id(),
        "layout": layout,
        "paint": paint,
    })
}

fn line_properties(layer: &LineLayer) -> (Value, Value) {
    let join = match layer.join {
        LineJoin::Miter => "miter",
        LineJoin::Round => "round",
        LineJoin::Bevel => "bevel",
    };
    let cap = match layer.cap {
        LineCap::Butt => "butt",
        LineCap::Round => "round",
        LineCap::Square => "square",
    };

    (
        json!({ "line-join": join, "line-cap": cap }),
        json!({
            "line-color": color_expression(&layer.color),
            "line-width": number_expression(&layer.width),
            "line-opacity": number_expression(&layer.opacity),
        }),
    )
}

fn circle_properties(layer: &CircleLayer) -> (Value, Value) {
    (
        json!({}),
        json!({
            "circle-color": color_expression(&layer.color),
            "circle-radius": number_expression(&layer.radius),
        }),
    )
}

fn symbol_properties(layer: &SymbolLayer) -> (Value, Value) {
    let text = match &layer.text {
        TextField::Property(key) => json!(["get", key]),
        TextField::Constant(text) => json!(text),
    };
    let justify = match layer.justify {
        TextJustify::Left => "left",
        TextJustify::Center => "center",
        TextJustify::Right => "right",
    };
    let allow_overlap = layer.collision == LabelCollision::Disabled;

    (
        json!({
            "text-field": text,
            "text-font": layer.font,
            "text-size": layer.font_size,
            "text-anchor": layer.anchor.as_str(),
            "text-justify": justify,
            "text-allow-overlap": allow_overlap,
            "text-ignore-placement": allow_overlap,
        }),
        json!({
            "text-color": layer.text_color.to_css(),
            "text-halo-color": layer.halo_color.to_css(),
            "text-halo-width": layer.halo_width,
            "text-translate": layer.offset,
        }),
    )
}

fn fill_properties(layer: &FillLayer) -> (Value, Value) {
    let color = match &layer.color {
        FeatureValue::Constant(color) => json!(color.to_css()),
        FeatureValue::Category(map) if map.entries().is_empty() => json!(map.fallback().to_css()),
        FeatureValue::Category(map) => {
            let mut expression = vec![json!("match"), json!(["get", map.property()])];
            for (key, color) in map.entries() {
                expression.push(json!(key));
                expression.push(json!(color.to_css()));
            }
            expression.push(json!(map.fallback().to_css()));
            Value::Array(expression)
        }
    };

    (
        json!({}),
        json!({
            "fill-color": color,
            "fill-opacity": number_expression(&layer.opacity),
        }),
    )
}

fn number_expression(value: &PropertyValue<f64>) -> Value {
    match value {
        PropertyValue::Constant(value) => json!(value),
        PropertyValue::Zoom(stops) => interpolate(
            stops
                .stops()
                .iter()
                .map(|stop| (stop.zoom, json!(stop.value))),
        ),
    }
}

fn color_expression(value: &PropertyValue<Color>) -> Value {
    match value {
        PropertyValue::Constant(color) => json!(color.to_css()),
        PropertyValue::Zoom(stops) => interpolate(
            stops
                .stops()
                .iter()
                .map(|stop| (stop.zoom, json!(stop.value.to_css()))),
        ),
    }
}

fn interpolate(stops: impl Iterator<Item = (f64, Value)>) -> Value {
    let mut expression = vec![json!("interpolate"), json!(["linear"]), json!(["zoom"])];
    for (zoom, value) in stops {
        expression.push(json!(zoom));
        expression.push(value);
    }

    Value::Array(expression)
}
