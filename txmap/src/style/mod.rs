//! Style model: shape sources, style layers and their properties.
//!
//! A [`Style`] exists only once the base style document has been loaded (see
//! [`MapHost`](crate::MapHost)). Sources and layers are then appended to it; the order of
//! layers is the draw order.

use ahash::HashMap;

mod document;
mod export;
mod layer;
mod layer_stack;
mod property;
mod source;

#[cfg(feature = "http")]
pub use document::HttpStyleLoader;
pub use document::{StaticStyleLoader, StyleDocument, StyleLoader};
pub(crate) use document::redact_url;
pub use layer::{
    CircleLayer, FillLayer, LabelCollision, LayerKind, LineCap, LineJoin, LineLayer,
    StyleLayer, SymbolLayer, TextAnchor, TextJustify,
};
pub use layer_stack::LayerStack;
pub use property::{
    CategoryMap, FeatureValue, Interpolate, PropertyValue, Stop, TextField, ZoomStops,
};
pub use source::ShapeSource;

use crate::error::TxMapError;

/// Loaded map style: the base document plus the sources and layers added to it.
#[derive(Debug, Clone)]
pub struct Style {
    document: StyleDocument,
    sources: Vec<ShapeSource>,
    source_index: HashMap<String, usize>,
    layers: LayerStack,
}

impl Style {
    /// Creates a style on top of the given base document.
    pub fn new(document: StyleDocument) -> Self {
        Self {
            document,
            sources: vec![],
            source_index: HashMap::default(),
            layers: LayerStack::default(),
        }
    }

    /// Base style document.
    pub fn document(&self) -> &StyleDocument {
        &self.document
    }

    /// Adds a source. Fails if a source with the same id is already present; the existing
    /// source is left untouched.
    pub fn add_source(&mut self, source: ShapeSource) -> Result<(), TxMapError> {
        if self.source_index.contains_key(source.id()) {
            return Err(TxMapError::DuplicateSource(source.id().to_string()));
        }

        log::debug!(
            "Adding source {} with {} features",
            source.id(),
            source.shape().len()
        );
        self.source_index
            .insert(source.id().to_string(), self.sources.len());
        self.sources.push(source);

        Ok(())
    }

    /// Adds a layer on top of all existing layers.
    ///
    /// Fails if a layer with the same id is already present, or if the source the layer
    /// references has not been added.
    pub fn add_layer(&mut self, layer: impl Into<StyleLayer>) -> Result<(), TxMapError> {
        let layer = layer.into();
        if self.layers.position(layer.id()).is_some() {
            return Err(TxMapError::DuplicateLayer(layer.id().to_string()));
        }

        if !self.has_source(layer.source_id()) {
            return Err(TxMapError::UnknownSource {
                layer: layer.id().to_string(),
                source_id: layer.source_id().to_string(),
            });
        }

        log::debug!("Adding {} layer {}", layer.kind().as_str(), layer.id());
        self.layers.push(layer);

        Ok(())
    }

    /// Returns true if a source with the given id is present.
    pub fn has_source(&self, id: &str) -> bool {
        self.source_index.contains_key(id)
    }

    /// Returns true if a layer with the given id is present.
    pub fn has_layer(&self, id: &str) -> bool {
        self.layers.position(id).is_some()
    }

    /// Returns the source with the given id.
    pub fn source(&self, id: &str) -> Option<&ShapeSource> {
        self.source_index.get(id).map(|&index| &self.sources[index])
    }

    /// Sources in the order they were added.
    pub fn sources(&self) -> &[ShapeSource] {
        &self.sources
    }

    /// Returns the layer with the given id.
    pub fn layer(&self, id: &str) -> Option<&StyleLayer> {
        self.layers.find(id)
    }

    /// Layers in draw order.
    pub fn layers(&self) -> &LayerStack {
        &self.layers
    }

    /// Mutable access to the layer stack, for changing layer visibility.
    pub fn layers_mut(&mut self) -> &mut LayerStack {
        &mut self.layers
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::tests::shape;

    #[test]
    fn duplicate_source_is_rejected() {
        let mut style = Style::new(StyleDocument::empty());
        style
            .add_source(ShapeSource::new("station-source", shape("TX_Station")))
            .unwrap();

        let result = style.add_source(ShapeSource::new("station-source", shape("TX_Railway")));
        assert_matches!(result, Err(TxMapError::DuplicateSource(id)) if id == "station-source");
        assert_eq!(style.sources().len(), 1);
        assert_eq!(
            style.source("station-source").map(|s| s.shape().len()),
            Some(20)
        );
    }

    #[test]
    fn layer_requires_existing_source() {
        let mut style = Style::new(StyleDocument::empty());
        let result = style.add_layer(LineLayer::new("railway-line-style", "railway-source"));

        insta::assert_compact_debug_snapshot!(result, @r#"Err(UnknownSource { layer: "railway-line-style", source_id: "railway-source" })"#);
        assert!(style.layers().is_empty());
    }

    #[test]
    fn duplicate_layer_is_rejected() {
        let mut style = Style::new(StyleDocument::empty());
        style
            .add_source(ShapeSource::new("railway-source", shape("TX_Railway")))
            .unwrap();
        style
            .add_layer(LineLayer::new("railway-line-style", "railway-source"))
            .unwrap();

        let result = style.add_layer(CircleLayer::new("railway-line-style", "railway-source"));
        insta::assert_compact_debug_snapshot!(result, @r#"Err(DuplicateLayer("railway-line-style"))"#);
        assert_eq!(style.layers().len(), 1);
        assert_eq!(
            style.layer("railway-line-style").map(StyleLayer::kind),
            Some(LayerKind::Line)
        );
    }
}
