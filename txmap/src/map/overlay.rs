use crate::error::AssetError;

/// Names of the resources drawn over the base map. `None` leaves the layer out.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OverlayPlan {
    /// Resource with the railway line.
    #[serde(default)]
    pub railway: Option<String>,
    /// Resource with the stations.
    #[serde(default)]
    pub station: Option<String>,
    /// Resource with the municipality boundaries.
    #[serde(default)]
    pub municipality: Option<String>,
}

impl Default for OverlayPlan {
    /// Railway and stations from the bundled resources, without municipalities.
    fn default() -> Self {
        Self {
            railway: Some("TX_Railway".into()),
            station: Some("TX_Station".into()),
            municipality: None,
        }
    }
}

impl OverlayPlan {
    /// A plan that draws nothing.
    pub fn empty() -> Self {
        Self {
            railway: None,
            station: None,
            municipality: None,
        }
    }

    /// Sets the municipality resource.
    pub fn with_municipality(mut self, name: impl Into<String>) -> Self {
        self.municipality = Some(name.into());
        self
    }

    /// Planned layers in draw order: municipalities, then the railway, then the stations.
    pub fn layers(&self) -> impl Iterator<Item = (OverlayLayer, &str)> + '_ {
        [
            (OverlayLayer::Municipality, &self.municipality),
            (OverlayLayer::Railway, &self.railway),
            (OverlayLayer::Station, &self.station),
        ]
        .into_iter()
        .filter_map(|(layer, name)| name.as_deref().map(|name| (layer, name)))
    }
}

/// One of the decorative layers drawn over the base map.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum OverlayLayer {
    /// Municipality areas.
    Municipality,
    /// The railway line.
    Railway,
    /// Station markers and names.
    Station,
}

/// Outcome of drawing the overlay.
#[derive(Debug, Default)]
pub struct OverlayReport {
    /// Layers that were added to the style, in draw order.
    pub drawn: Vec<OverlayLayer>,
    /// Layers that were left out because their resource was unavailable.
    pub skipped: Vec<(OverlayLayer, AssetError)>,
}

impl OverlayReport {
    /// Returns true if every planned layer was drawn.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}
