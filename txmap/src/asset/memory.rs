use ahash::HashMap;
use bytes::Bytes;

use super::AssetLoader;
use crate::error::AssetError;

/// Serves resources from memory, e.g. files embedded with `include_bytes!`.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssetLoader {
    resources: HashMap<String, Bytes>,
}

impl MemoryAssetLoader {
    /// Adds a resource, replacing any previous resource with the same name.
    pub fn insert(&mut self, name: impl Into<String>, bytes: impl Into<Bytes>) {
        self.resources.insert(name.into(), bytes.into());
    }

    /// Builder-style version of [`MemoryAssetLoader::insert`].
    pub fn with_resource(mut self, name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        self.insert(name, bytes);
        self
    }
}

#[async_trait::async_trait]
impl AssetLoader for MemoryAssetLoader {
    async fn load(&self, name: &str) -> Result<Bytes, AssetError> {
        self.resources
            .get(name)
            .cloned()
            .ok_or_else(|| AssetError::NotFound { name: name.into() })
    }
}
