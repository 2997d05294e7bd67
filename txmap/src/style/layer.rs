//! Style layers: named rendering rules that draw the features of one shape source.

use serde::{Deserialize, Serialize};
use txmap_types::GeometryKind;

use super::property::{FeatureValue, PropertyValue, TextField};
use crate::Color;

/// How two line segments are joined.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineJoin {
    /// Sharp corner.
    #[default]
    Miter,
    /// Rounded corner.
    Round,
    /// Cut corner.
    Bevel,
}

/// How the ends of a line are drawn.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCap {
    /// The line ends exactly at its end point.
    #[default]
    Butt,
    /// Half-circle around the end point.
    Round,
    /// Half-square around the end point.
    Square,
}

/// Part of a label that is placed at the anchor point.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextAnchor {
    /// Center of the label.
    #[default]
    Center,
    /// Left edge, vertically centered.
    Left,
    /// Right edge, vertically centered.
    Right,
    /// Top edge, horizontally centered.
    Top,
    /// Bottom edge, horizontally centered.
    Bottom,
    /// Top left corner.
    TopLeft,
    /// Top right corner.
    TopRight,
    /// Bottom left corner.
    BottomLeft,
    /// Bottom right corner.
    BottomRight,
}

impl TextAnchor {
    /// Name of the anchor as used in style documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAnchor::Center => "center",
            TextAnchor::Left => "left",
            TextAnchor::Right => "right",
            TextAnchor::Top => "top",
            TextAnchor::Bottom => "bottom",
            TextAnchor::TopLeft => "top-left",
            TextAnchor::TopRight => "top-right",
            TextAnchor::BottomLeft => "bottom-left",
            TextAnchor::BottomRight => "bottom-right",
        }
    }
}

/// Alignment of the lines of a multi-line label.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextJustify {
    /// Align to left.
    Left,
    /// Align to center.
    #[default]
    Center,
    /// Align to right.
    Right,
}

/// Whether labels can hide each other.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelCollision {
    /// Labels that overlap already placed labels are hidden.
    #[default]
    Enabled,
    /// Every label is drawn, whether it overlaps others or not.
    Disabled,
}

/// Type of a style layer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LayerKind {
    /// See [`LineLayer`].
    Line,
    /// See [`CircleLayer`].
    Circle,
    /// See [`SymbolLayer`].
    Symbol,
    /// See [`FillLayer`].
    Fill,
}

impl LayerKind {
    /// Name of the layer type as used in style documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            LayerKind::Line => "line",
            LayerKind::Circle => "circle",
            LayerKind::Symbol => "symbol",
            LayerKind::Fill => "fill",
        }
    }

    /// Returns true if a layer of this kind draws geometries of the given kind.
    ///
    /// Line layers draw polylines and polygon outlines, circle and symbol layers draw points,
    /// fill layers draw polygons.
    pub fn draws(&self, geometry: GeometryKind) -> bool {
        matches!(
            (self, geometry),
            (LayerKind::Line, GeometryKind::Line | GeometryKind::Polygon)
                | (LayerKind::Circle | LayerKind::Symbol, GeometryKind::Point)
                | (LayerKind::Fill, GeometryKind::Polygon)
        )
    }
}

/// Draws lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineLayer {
    id: String,
    source: String,
    /// Color of the line.
    pub color: PropertyValue<Color>,
    /// Width of the line in pixels.
    pub width: PropertyValue<f64>,
    /// Opacity of the line, `0.0..=1.0`.
    pub opacity: PropertyValue<f64>,
    /// Corner style.
    pub join: LineJoin,
    /// End style.
    pub cap: LineCap,
}

impl LineLayer {
    /// Creates a black line layer of width 1.
    pub fn new(id: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            color: Color::BLACK.into(),
            width: 1.0.into(),
            opacity: 1.0.into(),
            join: LineJoin::default(),
            cap: LineCap::default(),
        }
    }

    /// Sets the line color.
    pub fn with_color(mut self, color: impl Into<PropertyValue<Color>>) -> Self {
        self.color = color.into();
        self
    }

    /// Sets the line width.
    pub fn with_width(mut self, width: impl Into<PropertyValue<f64>>) -> Self {
        self.width = width.into();
        self
    }

    /// Sets the corner and end styles.
    pub fn with_join_and_cap(mut self, join: LineJoin, cap: LineCap) -> Self {
        self.join = join;
        self.cap = cap;
        self
    }
}

/// Draws points as circles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleLayer {
    id: String,
    source: String,
    /// Fill color of the circle.
    pub color: PropertyValue<Color>,
    /// Radius in pixels.
    pub radius: PropertyValue<f64>,
}

impl CircleLayer {
    /// Creates a layer of black circles with radius 5.
    pub fn new(id: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            color: Color::BLACK.into(),
            radius: 5.0.into(),
        }
    }

    /// Sets the circle color.
    pub fn with_color(mut self, color: impl Into<PropertyValue<Color>>) -> Self {
        self.color = color.into();
        self
    }

    /// Sets the circle radius.
    pub fn with_radius(mut self, radius: impl Into<PropertyValue<f64>>) -> Self {
        self.radius = radius.into();
        self
    }
}

/// Draws text labels at points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolLayer {
    id: String,
    source: String,
    /// Text of the labels.
    pub text: TextField,
    /// Color of the text.
    pub text_color: Color,
    /// Color of the outline around the glyphs.
    pub halo_color: Color,
    /// Width of the outline around the glyphs, in pixels.
    pub halo_width: f64,
    /// Font stack, in order of preference.
    pub font: Vec<String>,
    /// Font size in points.
    pub font_size: f64,
    /// Part of the label placed at the feature point.
    pub anchor: TextAnchor,
    /// Offset of the label from the feature point in pixels, `[right, down]`.
    pub offset: [f64; 2],
    /// Alignment of multi-line labels.
    pub justify: TextJustify,
    /// Whether overlapping labels are hidden.
    pub collision: LabelCollision,
}

impl SymbolLayer {
    /// Creates a label layer with black 16px text centered at the point.
    pub fn new(id: impl Into<String>, source: impl Into<String>, text: TextField) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            text,
            text_color: Color::BLACK,
            halo_color: Color::TRANSPARENT,
            halo_width: 0.0,
            font: vec![],
            font_size: 16.0,
            anchor: TextAnchor::default(),
            offset: [0.0, 0.0],
            justify: TextJustify::default(),
            collision: LabelCollision::default(),
        }
    }
}

/// Draws polygon interiors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillLayer {
    id: String,
    source: String,
    /// Fill color.
    pub color: FeatureValue<Color>,
    /// Fill opacity, `0.0..=1.0`.
    pub opacity: PropertyValue<f64>,
}

impl FillLayer {
    /// Creates an opaque black fill layer.
    pub fn new(id: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            color: FeatureValue::Constant(Color::BLACK),
            opacity: 1.0.into(),
        }
    }

    /// Sets the fill color.
    pub fn with_color(mut self, color: impl Into<FeatureValue<Color>>) -> Self {
        self.color = color.into();
        self
    }

    /// Sets the fill opacity.
    pub fn with_opacity(mut self, opacity: impl Into<PropertyValue<f64>>) -> Self {
        self.opacity = opacity.into();
        self
    }
}

/// Any style layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StyleLayer {
    /// Line layer.
    Line(LineLayer),
    /// Circle layer.
    Circle(CircleLayer),
    /// Symbol layer.
    Symbol(SymbolLayer),
    /// Fill layer.
    Fill(FillLayer),
}

impl StyleLayer {
    /// Identifier of the layer, unique within a style.
    pub fn id(&self) -> &str {
        match self {
            StyleLayer::Line(l) => &l.id,
            StyleLayer::Circle(l) => &l.id,
            StyleLayer::Symbol(l) => &l.id,
            StyleLayer::Fill(l) => &l.id,
        }
    }

    /// Identifier of the shape source the layer draws.
    pub fn source_id(&self) -> &str {
        match self {
            StyleLayer::Line(l) => &l.source,
            StyleLayer::Circle(l) => &l.source,
            StyleLayer::Symbol(l) => &l.source,
            StyleLayer::Fill(l) => &l.source,
        }
    }

    /// Type of the layer.
    pub fn kind(&self) -> LayerKind {
        match self {
            StyleLayer::Line(_) => LayerKind::Line,
            StyleLayer::Circle(_) => LayerKind::Circle,
            StyleLayer::Symbol(_) => LayerKind::Symbol,
            StyleLayer::Fill(_) => LayerKind::Fill,
        }
    }
}

macro_rules! impl_into_style_layer {
    ($layer:ident, $variant:ident) => {
        impl From<$layer> for StyleLayer {
            fn from(value: $layer) -> Self {
                StyleLayer::$variant(value)
            }
        }
    };
}

impl_into_style_layer!(LineLayer, Line);
impl_into_style_layer!(CircleLayer, Circle);
impl_into_style_layer!(SymbolLayer, Symbol);
impl_into_style_layer!(FillLayer, Fill);
