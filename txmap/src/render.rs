//! Headless evaluation of a style: what would be drawn for each feature at a given zoom.

use crate::shape::{Feature, ShapeFeature};
use crate::style::{LabelCollision, LineCap, LineJoin, Style, StyleLayer, TextAnchor, TextJustify};
use crate::Color;

/// Resolved drawing instruction for one feature.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive<'a> {
    /// Line along the feature geometry.
    Line {
        /// Line color.
        color: Color,
        /// Width in pixels.
        width: f64,
        /// Opacity.
        opacity: f64,
        /// Corner style.
        join: LineJoin,
        /// End style.
        cap: LineCap,
    },
    /// Circle at every point of the feature.
    Circle {
        /// Fill color.
        color: Color,
        /// Radius in pixels.
        radius: f64,
    },
    /// Text label at every point of the feature.
    Label {
        /// Text, exactly as in the feature property.
        text: &'a str,
        /// Text color.
        color: Color,
        /// Glyph outline color.
        halo_color: Color,
        /// Glyph outline width.
        halo_width: f64,
        /// Font stack.
        font: &'a [String],
        /// Font size.
        size: f64,
        /// Part of the label placed at the point.
        anchor: TextAnchor,
        /// Offset from the point in pixels.
        offset: [f64; 2],
        /// Alignment of the lines.
        justify: TextJustify,
        /// Whether the label may be hidden by other labels.
        collision: LabelCollision,
    },
    /// Filled polygon.
    Fill {
        /// Fill color.
        color: Color,
        /// Opacity.
        opacity: f64,
    },
}

/// One entry of a [`RenderPlan`].
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem<'a> {
    /// Id of the layer that produced the item.
    pub layer_id: &'a str,
    /// Feature to draw.
    pub feature: &'a ShapeFeature,
    /// How to draw it.
    pub primitive: Primitive<'a>,
}

/// Everything a style draws at one zoom level, in draw order.
#[derive(Debug, Clone, Default)]
pub struct RenderPlan<'a> {
    items: Vec<DrawItem<'a>>,
}

impl<'a> RenderPlan<'a> {
    /// Evaluates all visible layers of the style at the given zoom.
    ///
    /// Items are ordered by layer, then by feature order in the source. A layer only produces
    /// items for the features with geometry it can draw, and a label layer skips features
    /// without text.
    pub fn build(style: &'a Style, zoom: f64) -> Self {
        let mut items = vec![];
        for layer in style.layers().iter_visible() {
            let Some(source) = style.source(layer.source_id()) else {
                log::warn!(
                    "Layer {} refers to missing source {}",
                    layer.id(),
                    layer.source_id()
                );
                continue;
            };

            for feature in source.shape().features() {
                let Some(geometry) = feature.geometry() else {
                    continue;
                };
                if !layer.kind().draws(geometry.kind()) {
                    continue;
                }

                if let Some(primitive) = evaluate(layer, feature, zoom) {
                    items.push(DrawItem {
                        layer_id: layer.id(),
                        feature,
                        primitive,
                    });
                }
            }
        }

        Self { items }
    }

    /// Items in draw order.
    pub fn items(&self) -> &[DrawItem<'a>] {
        &self.items
    }

    /// Items produced by the given layer.
    pub fn layer_items<'b>(
        &'b self,
        layer_id: &'b str,
    ) -> impl Iterator<Item = &'b DrawItem<'a>> + 'b {
        self.items
            .iter()
            .filter(move |item| item.layer_id == layer_id)
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing is drawn.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn evaluate<'a>(
    layer: &'a StyleLayer,
    feature: &'a ShapeFeature,
    zoom: f64,
) -> Option<Primitive<'a>> {
    let primitive = match layer {
        StyleLayer::Line(line) => Primitive::Line {
            color: line.color.eval(zoom),
            width: line.width.eval(zoom),
            opacity: line.opacity.eval(zoom),
            join: line.join,
            cap: line.cap,
        },
        StyleLayer::Circle(circle) => Primitive::Circle {
            color: circle.color.eval(zoom),
            radius: circle.radius.eval(zoom),
        },
        StyleLayer::Symbol(symbol) => Primitive::Label {
            text: symbol.text.resolve(feature)?,
            color: symbol.text_color,
            halo_color: symbol.halo_color,
            halo_width: symbol.halo_width,
            font: &symbol.font,
            size: symbol.font_size,
            anchor: symbol.anchor,
            offset: symbol.offset,
            justify: symbol.justify,
            collision: symbol.collision,
        },
        StyleLayer::Fill(fill) => Primitive::Fill {
            color: *fill.color.resolve(feature),
            opacity: fill.opacity.eval(zoom),
        },
    };

    Some(primitive)
}
