use std::ops::Index;

use super::layer::StyleLayer;

/// Ordered list of the style layers of a [`Style`](super::Style).
///
/// Layers are drawn in the order they are stored: a layer draws above all layers before it.
/// Any layer can be hidden with [`LayerStack::hide`]; hidden layers keep their place in the
/// stack but are not drawn.
///
/// The stack does not check layer ids. Use [`Style::add_layer`](super::Style::add_layer),
/// which guarantees that ids are unique and sources exist.
#[derive(Debug, Default, Clone)]
pub struct LayerStack(Vec<LayerEntry>);

#[derive(Debug, Clone)]
struct LayerEntry {
    layer: StyleLayer,
    is_hidden: bool,
}

impl LayerStack {
    /// Adds the layer on top of the stack.
    pub(crate) fn push(&mut self, layer: StyleLayer) {
        self.0.push(LayerEntry {
            layer,
            is_hidden: false,
        })
    }

    /// Returns the count of layers in the stack.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the stack contains zero layers.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a layer at `index`, or `None` if index is out of bounds.
    pub fn get(&self, index: usize) -> Option<&StyleLayer> {
        self.0.get(index).map(|entry| &entry.layer)
    }

    /// Returns the position of the layer with the given id.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.0.iter().position(|entry| entry.layer.id() == id)
    }

    /// Returns the layer with the given id.
    pub fn find(&self, id: &str) -> Option<&StyleLayer> {
        self.position(id).and_then(|index| self.get(index))
    }

    /// Iterates over all layers, bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &StyleLayer> + '_ {
        self.0.iter().map(|entry| &entry.layer)
    }

    /// Sets the layer at `index` as invisible.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn hide(&mut self, index: usize) {
        self.0[index].is_hidden = true;
    }

    /// Sets the layer at `index` as visible.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn show(&mut self, index: usize) {
        self.0[index].is_hidden = false;
    }

    /// Sets all layers for which the predicate returns true as visible. The rest of layers are
    /// set as hidden.
    pub fn show_by<F>(&mut self, mut f: F)
    where
        F: FnMut(&StyleLayer) -> bool,
    {
        for entry in &mut self.0 {
            entry.is_hidden = !f(&entry.layer);
        }
    }

    /// Returns true, if the layer at `index` is not hidden.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn is_visible(&self, index: usize) -> bool {
        !self.0[index].is_hidden
    }

    /// Iterates over all visible layers, bottom to top.
    pub fn iter_visible(&self) -> impl Iterator<Item = &StyleLayer> + '_ {
        self.0
            .iter()
            .filter(|entry| !entry.is_hidden)
            .map(|entry| &entry.layer)
    }
}

impl Index<usize> for LayerStack {
    type Output = StyleLayer;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index].layer
    }
}
