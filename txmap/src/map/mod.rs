//! The map host: owns the style and runs the overlay setup once the base style is ready.

use std::fmt::{Debug, Formatter};

use crate::asset::{load_all, AssetLoader};
use crate::compose::LayerComposer;
use crate::error::TxMapError;
use crate::style::{redact_url, Style, StyleDocument, StyleLoader};

mod builder;
mod camera;
mod overlay;

pub use builder::MapHostBuilder;
pub use camera::{Camera, MAX_ZOOM};
pub use overlay::{OverlayLayer, OverlayPlan, OverlayReport};

/// Continuation run once the style becomes ready.
pub type StyleLoadedHandler = Box<dyn FnOnce(&mut Style) -> Result<(), TxMapError> + Send>;

/// Loading state of the map style.
///
/// The state only ever moves from `Loading` to `Ready`. There is no way back: a loaded style
/// is never reloaded.
#[derive(Debug)]
pub enum StyleState {
    /// The base style document has not arrived yet. Layers cannot be added.
    Loading,
    /// The style is loaded and can be modified.
    Ready(Style),
}

/// Hosts a map style and draws the railway overlay on it.
///
/// The style can only be modified through `&mut MapHost`, so there is always a single writer.
/// Typical use:
///
/// ```no_run
/// use txmap::asset::BundleAssetLoader;
/// use txmap::style::HttpStyleLoader;
/// use txmap::MapHostBuilder;
///
/// # async fn run() -> Result<(), txmap::error::TxMapError> {
/// let mut host = MapHostBuilder::new("https://example.com/style.json").build()?;
/// let report = host
///     .start(&HttpStyleLoader::new(), &BundleAssetLoader::new("assets"))
///     .await?;
/// assert!(report.is_complete());
/// # Ok(())
/// # }
/// ```
pub struct MapHost {
    style_url: String,
    camera: Camera,
    composer: LayerComposer,
    overlay: OverlayPlan,
    state: StyleState,
    on_loaded: Option<StyleLoadedHandler>,
    handler_registered: bool,
}

impl Debug for MapHost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapHost")
            .field("style_url", &redact_url(&self.style_url))
            .field("camera", &self.camera)
            .field("composer", &self.composer)
            .field("overlay", &self.overlay)
            .field("state", &self.state)
            .field("handler_registered", &self.handler_registered)
            .finish()
    }
}

impl MapHost {
    /// Creates a host in the [`StyleState::Loading`] state. See also [`MapHostBuilder`].
    pub fn new(
        style_url: impl Into<String>,
        camera: Camera,
        composer: LayerComposer,
        overlay: OverlayPlan,
    ) -> Self {
        Self {
            style_url: style_url.into(),
            camera,
            composer,
            overlay,
            state: StyleState::Loading,
            on_loaded: None,
            handler_registered: false,
        }
    }

    /// URL of the base style document.
    pub fn style_url(&self) -> &str {
        &self.style_url
    }

    /// Initial view of the map.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Composer used to draw the overlay.
    pub fn composer(&self) -> &LayerComposer {
        &self.composer
    }

    /// Resources drawn over the base map.
    pub fn overlay(&self) -> &OverlayPlan {
        &self.overlay
    }

    /// Current loading state.
    pub fn state(&self) -> &StyleState {
        &self.state
    }

    /// Returns true once the style is loaded.
    pub fn is_ready(&self) -> bool {
        matches!(self.state, StyleState::Ready(_))
    }

    /// The loaded style.
    pub fn style(&self) -> Result<&Style, TxMapError> {
        match &self.state {
            StyleState::Ready(style) => Ok(style),
            StyleState::Loading => Err(TxMapError::StyleNotReady),
        }
    }

    /// Mutable access to the loaded style. Fails with [`TxMapError::StyleNotReady`] while the
    /// style is loading.
    pub fn style_mut(&mut self) -> Result<&mut Style, TxMapError> {
        match &mut self.state {
            StyleState::Ready(style) => Ok(style),
            StyleState::Loading => Err(TxMapError::StyleNotReady),
        }
    }

    /// Registers the continuation to run when the style becomes ready.
    ///
    /// Only one continuation can be registered. If the style is already loaded, the handler is
    /// run immediately and its result is returned.
    pub fn on_style_loaded(
        &mut self,
        handler: impl FnOnce(&mut Style) -> Result<(), TxMapError> + Send + 'static,
    ) -> Result<(), TxMapError> {
        if self.handler_registered {
            return Err(TxMapError::Configuration(
                "style loaded handler is already registered".into(),
            ));
        }
        self.handler_registered = true;

        match &mut self.state {
            StyleState::Ready(style) => handler(style),
            StyleState::Loading => {
                self.on_loaded = Some(Box::new(handler));
                Ok(())
            }
        }
    }

    /// Moves the host to the [`StyleState::Ready`] state with the given base document and runs
    /// the registered continuation.
    ///
    /// Fails with [`TxMapError::StyleAlreadyLoaded`] if the style has already been loaded.
    pub fn finish_loading(&mut self, document: StyleDocument) -> Result<(), TxMapError> {
        if self.is_ready() {
            return Err(TxMapError::StyleAlreadyLoaded);
        }

        log::info!(
            "Style {} is loaded",
            document.name().unwrap_or(redact_url(&self.style_url))
        );
        self.state = StyleState::Ready(Style::new(document));

        match (self.on_loaded.take(), &mut self.state) {
            (Some(handler), StyleState::Ready(style)) => handler(style),
            _ => Ok(()),
        }
    }

    /// Loads the base style document with the given loader and finishes loading.
    pub async fn load_style(&mut self, loader: &dyn StyleLoader) -> Result<(), TxMapError> {
        if self.is_ready() {
            return Err(TxMapError::StyleAlreadyLoaded);
        }

        log::debug!("Loading style {}", redact_url(&self.style_url));
        let document = loader.load(&self.style_url).await?;
        self.finish_loading(document)
    }

    /// Draws the planned overlay layers on the loaded style.
    ///
    /// All resources are loaded concurrently, then composed in draw order: municipalities,
    /// railway, stations. A layer whose resource is unavailable is skipped and reported; the
    /// remaining layers are still drawn. Any other error stops the composition and is returned.
    pub async fn draw_overlay(
        &mut self,
        assets: &dyn AssetLoader,
    ) -> Result<OverlayReport, TxMapError> {
        if !self.is_ready() {
            return Err(TxMapError::StyleNotReady);
        }

        let planned: Vec<_> = self
            .overlay
            .layers()
            .map(|(layer, name)| (layer, name.to_string()))
            .collect();
        let loaded = load_all(assets, planned.iter().map(|(_, name)| name.as_str())).await;

        let composer = self.composer;
        let style = self.style_mut()?;
        let mut report = OverlayReport::default();

        for ((layer, _), (name, result)) in planned.iter().zip(loaded) {
            let composed = result.map_err(TxMapError::from).and_then(|bytes| match layer {
                OverlayLayer::Municipality => {
                    composer.compose_municipality_layer(style, name, &bytes)
                }
                OverlayLayer::Railway => composer.compose_railway_layer(style, name, &bytes),
                OverlayLayer::Station => composer.compose_station_layer(style, name, &bytes),
            });

            match composed {
                Ok(()) => report.drawn.push(*layer),
                Err(TxMapError::Asset(err)) => {
                    log::warn!("Skipping {layer:?} layer: {err}");
                    report.skipped.push((*layer, err));
                }
                Err(err) => return Err(err),
            }
        }

        log::info!(
            "Overlay drawn: {} layers added, {} skipped",
            report.drawn.len(),
            report.skipped.len()
        );

        Ok(report)
    }

    /// Loads the style and then draws the overlay on it.
    pub async fn start(
        &mut self,
        style_loader: &dyn StyleLoader,
        assets: &dyn AssetLoader,
    ) -> Result<OverlayReport, TxMapError> {
        self.load_style(style_loader).await?;
        self.draw_overlay(assets).await
    }

    /// Exports the loaded style with the host camera. See [`Style::export`].
    pub fn export(&self) -> Result<serde_json::Value, TxMapError> {
        self.style()?.export(&self.camera)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use assert_matches::assert_matches;
    use txmap_types::latlon;

    use super::*;
    use crate::asset::{BundleAssetLoader, MemoryAssetLoader};
    use crate::compose::{
        MUNICIPALITY_FILL_LAYER, MUNICIPALITY_LINE_LAYER, RAILWAY_LINE_LAYER,
        STATION_CIRCLE_LAYER, STATION_SYMBOL_LAYER,
    };
    use crate::error::AssetError;
    use crate::style::{LineLayer, ShapeSource, StaticStyleLoader, StyleLayer};
    use crate::tests::{assets_dir, fixture, shape};
    use crate::Color;

    fn host(overlay: OverlayPlan) -> MapHost {
        MapHost::new(
            "https://example.com/style.json",
            Camera::new(latlon!(35.894930906699322, 139.937432307518321), 9.2).unwrap(),
            LayerComposer::new(Color::ORANGE),
            overlay,
        )
    }

    struct CaptureLogger(Mutex<Vec<String>>);

    impl log::Log for CaptureLogger {
        fn enabled(&self, _metadata: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            self.0
                .lock()
                .unwrap()
                .push(format!("{} {}", record.level(), record.args()));
        }

        fn flush(&self) {}
    }

    static LOGS: CaptureLogger = CaptureLogger(Mutex::new(Vec::new()));

    fn full_plan() -> OverlayPlan {
        OverlayPlan::default().with_municipality("TX_Municipality")
    }

    fn layer_ids(host: &MapHost) -> Vec<String> {
        host.style()
            .unwrap()
            .layers()
            .iter()
            .map(|layer| layer.id().to_string())
            .collect()
    }

    #[test]
    fn style_is_not_available_while_loading() {
        let mut host = host(OverlayPlan::default());
        assert!(!host.is_ready());
        assert_matches!(host.style(), Err(TxMapError::StyleNotReady));
        assert_matches!(host.style_mut(), Err(TxMapError::StyleNotReady));
        assert_matches!(host.export(), Err(TxMapError::StyleNotReady));
    }

    #[test]
    fn composition_before_ready_is_rejected() {
        let mut host = host(OverlayPlan::default());
        let result = tokio_test::block_on(host.draw_overlay(&BundleAssetLoader::new(assets_dir())));
        insta::assert_compact_debug_snapshot!(result.map(|report| report.drawn), @"Err(StyleNotReady)");
    }

    #[test]
    fn handler_runs_exactly_once_on_ready() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut host = host(OverlayPlan::default());

        let counter = calls.clone();
        host.on_style_loaded(move |style| {
            counter.fetch_add(1, Ordering::SeqCst);
            style.add_source(ShapeSource::new("railway-source", shape("TX_Railway")))?;
            style.add_layer(LineLayer::new("railway-line-style", "railway-source"))
        })
        .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        host.finish_loading(StyleDocument::empty()).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(layer_ids(&host), vec!["railway-line-style"]);

        assert_matches!(
            host.finish_loading(StyleDocument::empty()),
            Err(TxMapError::StyleAlreadyLoaded)
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(layer_ids(&host), vec!["railway-line-style"]);
    }

    #[test]
    fn second_handler_is_rejected() {
        let mut host = host(OverlayPlan::default());
        host.on_style_loaded(|_| Ok(())).unwrap();
        assert_matches!(
            host.on_style_loaded(|_| Ok(())),
            Err(TxMapError::Configuration(_))
        );
    }

    #[test]
    fn handler_registered_after_ready_runs_immediately() {
        let mut host = host(OverlayPlan::default());
        host.finish_loading(StyleDocument::empty()).unwrap();

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        host.on_style_loaded(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn handler_error_is_returned() {
        let mut host = host(OverlayPlan::default());
        host.on_style_loaded(|style| {
            style.add_layer(LineLayer::new("railway-line-style", "railway-source"))
        })
        .unwrap();

        assert_matches!(
            host.finish_loading(StyleDocument::empty()),
            Err(TxMapError::UnknownSource { .. })
        );
        assert!(host.is_ready());
    }

    #[test]
    fn start_draws_layers_in_order() {
        let mut host = host(full_plan());
        let base = StyleDocument::from_slice(None, br#"{"version": 8, "name": "base"}"#).unwrap();

        let report = tokio_test::block_on(host.start(
            &StaticStyleLoader::new(base),
            &BundleAssetLoader::new(assets_dir()),
        ))
        .unwrap();

        assert!(report.is_complete());
        assert_eq!(
            report.drawn,
            vec![
                OverlayLayer::Municipality,
                OverlayLayer::Railway,
                OverlayLayer::Station
            ]
        );
        assert_eq!(
            layer_ids(&host),
            vec![
                MUNICIPALITY_FILL_LAYER,
                MUNICIPALITY_LINE_LAYER,
                RAILWAY_LINE_LAYER,
                STATION_CIRCLE_LAYER,
                STATION_SYMBOL_LAYER,
            ]
        );
        assert_eq!(host.style().unwrap().document().name(), Some("base"));
    }

    #[test]
    fn start_twice_fails() {
        let mut host = host(OverlayPlan::default());
        let loader = StaticStyleLoader::new(StyleDocument::empty());
        let assets = BundleAssetLoader::new(assets_dir());

        tokio_test::block_on(host.start(&loader, &assets)).unwrap();
        let result = tokio_test::block_on(host.start(&loader, &assets));
        assert_matches!(result, Err(TxMapError::StyleAlreadyLoaded));
        assert_eq!(host.style().unwrap().layers().len(), 3);
    }

    #[test]
    fn missing_asset_skips_only_its_layer() {
        let assets = MemoryAssetLoader::default()
            .with_resource("TX_Station", fixture("TX_Station"))
            .with_resource("TX_Municipality", fixture("TX_Municipality"));
        let mut host = host(full_plan());
        host.finish_loading(StyleDocument::empty()).unwrap();

        let report = tokio_test::block_on(host.draw_overlay(&assets)).unwrap();

        assert!(!report.is_complete());
        assert_eq!(
            report.drawn,
            vec![OverlayLayer::Municipality, OverlayLayer::Station]
        );
        assert_eq!(report.skipped.len(), 1);
        assert_matches!(
            &report.skipped[0],
            (OverlayLayer::Railway, AssetError::NotFound { name }) if name == "TX_Railway"
        );

        let style = host.style().unwrap();
        assert!(!style.has_source("railway-source"));
        assert!(style.layer(RAILWAY_LINE_LAYER).is_none());
        assert_eq!(style.layers().len(), 4);
    }

    #[test]
    fn malformed_asset_is_skipped() {
        let bytes = fixture("TX_Station");
        let assets = MemoryAssetLoader::default()
            .with_resource("TX_Railway", fixture("TX_Railway"))
            .with_resource("TX_Station", bytes[..bytes.len() - 10].to_vec());
        let mut host = host(OverlayPlan::default());
        host.finish_loading(StyleDocument::empty()).unwrap();

        let report = tokio_test::block_on(host.draw_overlay(&assets)).unwrap();

        assert_eq!(report.drawn, vec![OverlayLayer::Railway]);
        assert_matches!(
            &report.skipped[0],
            (OverlayLayer::Station, AssetError::Malformed { .. })
        );
        assert_eq!(layer_ids(&host), vec![RAILWAY_LINE_LAYER]);
    }

    #[test]
    fn id_collision_is_returned() {
        let mut host = host(OverlayPlan::default());
        host.finish_loading(StyleDocument::empty()).unwrap();
        host.style_mut()
            .unwrap()
            .add_source(ShapeSource::new("railway-source", shape("TX_Railway")))
            .unwrap();

        let result = tokio_test::block_on(host.draw_overlay(&BundleAssetLoader::new(assets_dir())));
        assert_matches!(result, Err(TxMapError::DuplicateSource(id)) if id == "railway-source");
    }

    #[test]
    fn exported_style_contains_overlay() {
        let mut host = host(OverlayPlan::default());
        tokio_test::block_on(host.start(
            &StaticStyleLoader::new(StyleDocument::empty()),
            &BundleAssetLoader::new(assets_dir()),
        ))
        .unwrap();

        let exported = host.export().unwrap();
        assert_eq!(exported["zoom"], 9.2);
        let ids: Vec<_> = exported["layers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|layer| layer["id"].as_str().unwrap())
            .collect();
        assert_eq!(
            ids,
            vec![RAILWAY_LINE_LAYER, STATION_CIRCLE_LAYER, STATION_SYMBOL_LAYER]
        );
        assert!(matches!(
            host.style().unwrap().layer(STATION_SYMBOL_LAYER),
            Some(StyleLayer::Symbol(_))
        ));
    }

    #[test]
    fn api_key_is_not_logged() {
        let _ = log::set_logger(&LOGS);
        log::set_max_level(log::LevelFilter::Trace);

        let url = "https://api.maptiler.com/maps/jp-mierune-gray/style.json?key=HOST-LOG-SECRET";
        let document =
            StyleDocument::from_slice(Some(url.into()), br#"{"version": 8}"#).unwrap();
        let mut host = MapHost::new(
            url,
            Camera::new(latlon!(35.89, 139.93), 9.2).unwrap(),
            LayerComposer::new(Color::ORANGE),
            OverlayPlan::default(),
        );

        tokio_test::block_on(host.start(
            &StaticStyleLoader::new(document),
            &MemoryAssetLoader::default(),
        ))
        .unwrap();

        let logs = LOGS.0.lock().unwrap();
        assert!(logs
            .iter()
            .any(|line| line.contains("jp-mierune-gray/style.json")));
        assert!(!logs.iter().any(|line| line.contains("HOST-LOG-SECRET")));
        assert!(!format!("{host:?}").contains("HOST-LOG-SECRET"));
    }
}
