//! Turns the bundled GeoJSON resources into sources and layers of a [`Style`].

use crate::error::TxMapError;
use crate::shape::Shape;
use crate::style::{
    CategoryMap, CircleLayer, FillLayer, LabelCollision, LineCap, LineJoin, LineLayer,
    ShapeSource, Style, StyleLayer, SymbolLayer, TextAnchor, TextField, TextJustify, ZoomStops,
};
use crate::Color;

/// Id of the source with the railway line.
pub const RAILWAY_SOURCE: &str = "railway-source";
/// Id of the layer that draws the railway line.
pub const RAILWAY_LINE_LAYER: &str = "railway-line-style";
/// Id of the source with the stations.
pub const STATION_SOURCE: &str = "station-source";
/// Id of the layer that draws station markers.
pub const STATION_CIRCLE_LAYER: &str = "station-circle-style";
/// Id of the layer that draws station names.
pub const STATION_SYMBOL_LAYER: &str = "station-symbol-style";
/// Id of the source with the municipality boundaries.
pub const MUNICIPALITY_SOURCE: &str = "municipality-source";
/// Id of the layer that fills municipality areas.
pub const MUNICIPALITY_FILL_LAYER: &str = "municipality-fill-style";
/// Id of the layer that outlines municipality areas.
pub const MUNICIPALITY_LINE_LAYER: &str = "municipality-line-style";

/// Feature property holding the station name.
pub const STATION_NAME_PROPERTY: &str = "N05_011";
/// Feature property holding the prefecture name of a municipality.
pub const PREFECTURE_PROPERTY: &str = "N03_001";
/// Font of the station labels.
pub const STATION_LABEL_FONT: &str = "HiraginoSans-W6";

const MUNICIPALITY_FILL_OPACITY: f64 = 0.2;

/// Fill color of the municipalities of each prefecture. Municipalities of other prefectures are
/// filled with [`Color::BLACK`].
pub fn prefecture_palette() -> CategoryMap<Color> {
    CategoryMap::new(PREFECTURE_PROPERTY, Color::BLACK)
        .with_entry("東京都", Color::RED)
        .with_entry("埼玉県", Color::YELLOW)
        .with_entry("千葉県", Color::GREEN)
        .with_entry("茨城県", Color::BLUE)
}

/// Builds the overlay layers from GeoJSON resources.
///
/// Each `compose_*` method parses the resource, then adds one source and the layers that draw
/// it. Either all of them are added or, if any step fails, the style is left unchanged.
#[derive(Debug, Clone, Copy)]
pub struct LayerComposer {
    accent: Color,
}

impl LayerComposer {
    /// Creates a composer that draws the railway and stations with the `accent` color.
    pub fn new(accent: Color) -> Self {
        Self { accent }
    }

    /// Color of the railway line and station markers.
    pub fn accent(&self) -> Color {
        self.accent
    }

    /// Adds the railway line: a line with round joins and caps, 2px wide at zoom 10 growing to
    /// 8px at zoom 18.
    pub fn compose_railway_layer(
        &self,
        style: &mut Style,
        name: &str,
        bytes: &[u8],
    ) -> Result<(), TxMapError> {
        let shape = Shape::from_geojson(name, bytes)?;
        let line = LineLayer::new(RAILWAY_LINE_LAYER, RAILWAY_SOURCE)
            .with_color(self.accent)
            .with_width(ZoomStops::new([(10.0, 2.0), (18.0, 8.0)])?)
            .with_join_and_cap(LineJoin::Round, LineCap::Round);

        add_all(
            style,
            ShapeSource::new(RAILWAY_SOURCE, shape),
            vec![line.into()],
        )
    }

    /// Adds the stations: a circle marker for every station and its name next to it.
    pub fn compose_station_layer(
        &self,
        style: &mut Style,
        name: &str,
        bytes: &[u8],
    ) -> Result<(), TxMapError> {
        let shape = Shape::from_geojson(name, bytes)?;
        let circle = CircleLayer::new(STATION_CIRCLE_LAYER, STATION_SOURCE)
            .with_color(self.accent)
            .with_radius(ZoomStops::new([(10.0, 4.0), (18.0, 16.0)])?);

        let mut label = SymbolLayer::new(
            STATION_SYMBOL_LAYER,
            STATION_SOURCE,
            TextField::Property(STATION_NAME_PROPERTY.to_string()),
        );
        label.text_color = Color::WHITE;
        label.halo_color = Color::BLACK;
        label.halo_width = 1.0;
        label.font = vec![STATION_LABEL_FONT.to_string()];
        label.font_size = 12.0;
        label.anchor = TextAnchor::BottomRight;
        label.offset = [-4.0, -4.0];
        label.justify = TextJustify::Right;
        label.collision = LabelCollision::Disabled;

        add_all(
            style,
            ShapeSource::new(STATION_SOURCE, shape),
            vec![circle.into(), label.into()],
        )
    }

    /// Adds the municipality areas, filled with a translucent color of their prefecture and
    /// outlined in black.
    pub fn compose_municipality_layer(
        &self,
        style: &mut Style,
        name: &str,
        bytes: &[u8],
    ) -> Result<(), TxMapError> {
        let shape = Shape::from_geojson(name, bytes)?;
        let fill = FillLayer::new(MUNICIPALITY_FILL_LAYER, MUNICIPALITY_SOURCE)
            .with_color(prefecture_palette())
            .with_opacity(MUNICIPALITY_FILL_OPACITY);
        let outline = LineLayer::new(MUNICIPALITY_LINE_LAYER, MUNICIPALITY_SOURCE)
            .with_color(Color::BLACK)
            .with_width(1.0);

        add_all(
            style,
            ShapeSource::new(MUNICIPALITY_SOURCE, shape),
            vec![fill.into(), outline.into()],
        )
    }
}

fn add_all(
    style: &mut Style,
    source: ShapeSource,
    layers: Vec<StyleLayer>,
) -> Result<(), TxMapError> {
    if style.has_source(source.id()) {
        return Err(TxMapError::DuplicateSource(source.id().to_string()));
    }
    if let Some(layer) = layers.iter().find(|layer| style.has_layer(layer.id())) {
        return Err(TxMapError::DuplicateLayer(layer.id().to_string()));
    }

    style.add_source(source)?;
    for layer in layers {
        style.add_layer(layer)?;
    }

    Ok(())
}
