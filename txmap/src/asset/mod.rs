//! Loading of named GeoJSON resources.
//!
//! Resources are static and read-only, so a failed load is never retried: the caller receives
//! an [`AssetError`] and decides whether the layer built from the resource can be skipped.

use bytes::Bytes;
use futures::future::join_all;

use crate::error::AssetError;

mod bundle;
mod memory;

pub use bundle::BundleAssetLoader;
pub use memory::MemoryAssetLoader;

/// Source of named resources.
#[async_trait::async_trait]
pub trait AssetLoader: Send + Sync {
    /// Loads the raw bytes of the resource with the given name.
    async fn load(&self, name: &str) -> Result<Bytes, AssetError>;
}

/// Loads all the given resources concurrently.
///
/// The loads are independent: one failing resource does not affect the others. Results are
/// returned in the order of `names`, and the function returns only after every load has
/// completed.
pub async fn load_all<'a>(
    loader: &dyn AssetLoader,
    names: impl IntoIterator<Item = &'a str>,
) -> Vec<(&'a str, Result<Bytes, AssetError>)> {
    let loads = names.into_iter().map(|name| async move {
        let result = loader.load(name).await;
        match &result {
            Ok(bytes) => log::debug!("Loaded asset {name} ({} bytes)", bytes.len()),
            Err(err) => log::debug!("Failed to load asset {name}: {err}"),
        }
        (name, result)
    });

    join_all(loads).await
}
