//! Draws the Tsukuba Express line and stations over a base map style and prints the resulting
//! style document.
//!
//! ```shell
//! MAPTILER_API_KEY=... cargo run --example tx_overlay
//! cargo run --example tx_overlay -- txmap/assets/config/mierune_dark.json
//! cargo run --example tx_overlay -- --offline
//! ```
//!
//! With `--offline` the base style is not downloaded and an empty style is used instead.

use std::path::PathBuf;

use anyhow::Result;
use txmap::asset::BundleAssetLoader;
use txmap::config::MapConfig;
use txmap::style::{HttpStyleLoader, StaticStyleLoader, StyleDocument, StyleLoader};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let offline = std::env::args().any(|arg| arg == "--offline");
    let config_path = std::env::args().skip(1).find(|arg| !arg.starts_with("--"));

    let mut config = match config_path {
        Some(path) => MapConfig::from_file(path).await?,
        None => MapConfig::mierune_gray(),
    };
    if offline && config.api_key.is_none() {
        config.api_key = Some("offline".into());
    }

    let style_loader: Box<dyn StyleLoader> = if offline {
        Box::new(StaticStyleLoader::new(StyleDocument::empty()))
    } else {
        Box::new(HttpStyleLoader::new())
    };
    let assets =
        BundleAssetLoader::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets"));

    let mut host = config.to_host_builder()?.build()?;
    let report = host.start(style_loader.as_ref(), &assets).await?;

    log::info!("Drawn layers: {:?}", report.drawn);
    for (layer, err) in &report.skipped {
        log::warn!("{layer:?} layer is not drawn: {err}");
    }

    println!("{}", serde_json::to_string_pretty(&host.export()?)?);

    Ok(())
}
