use std::sync::Arc;

use crate::shape::Shape;

/// Named binding of a [`Shape`] into a style. Layers refer to the source by its id.
///
/// A source is created once per resource and never updated. The shape is shared, so cloning
/// a source is cheap.
#[derive(Debug, Clone)]
pub struct ShapeSource {
    id: String,
    shape: Arc<Shape>,
}

impl ShapeSource {
    /// Creates a new source.
    pub fn new(id: impl Into<String>, shape: impl Into<Arc<Shape>>) -> Self {
        Self {
            id: id.into(),
            shape: shape.into(),
        }
    }

    /// Identifier of the source, unique within a style.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Data of the source.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }
}
