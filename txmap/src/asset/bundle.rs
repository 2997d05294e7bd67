use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use bytes::Bytes;

use super::AssetLoader;
use crate::error::AssetError;

const DEFAULT_EXTENSION: &str = "geojson";

/// Reads resources from a folder on the file system. A resource named `TX_Station` is read from
/// `<root>/TX_Station.geojson`.
///
/// Files are read with `tokio::fs`, so loading must happen inside a Tokio runtime.
#[derive(Debug, Clone)]
pub struct BundleAssetLoader {
    root: PathBuf,
    extension: String,
}

impl BundleAssetLoader {
    /// Creates a loader for the given folder.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().into(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Changes the file extension appended to resource names.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Folder the resources are read from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resource_path(&self, name: &str) -> PathBuf {
        if self.extension.is_empty() {
            self.root.join(name)
        } else {
            self.root.join(format!("{name}.{}", self.extension))
        }
    }
}

#[async_trait::async_trait]
impl AssetLoader for BundleAssetLoader {
    async fn load(&self, name: &str) -> Result<Bytes, AssetError> {
        if name.is_empty() || name.contains(['/', '\\']) || name == ".." {
            return Err(AssetError::NotFound { name: name.into() });
        }

        let path = self.resource_path(name);
        log::trace!("Reading asset {name} from {path:?}");

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes.into()),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(AssetError::NotFound { name: name.into() })
            }
            Err(err) => Err(AssetError::Unreadable {
                name: name.into(),
                source: err,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::tests::assets_dir;

    #[test]
    fn loads_bundled_resource() {
        let loader = BundleAssetLoader::new(assets_dir());
        let bytes = tokio_test::block_on(loader.load("TX_Station")).unwrap();
        assert!(!bytes.is_empty());
    }

    #[test]
    fn missing_resource_is_not_found() {
        let loader = BundleAssetLoader::new(assets_dir());
        let result = tokio_test::block_on(loader.load("TX_Monorail"));
        assert_matches!(result, Err(AssetError::NotFound { name }) if name == "TX_Monorail");
    }

    #[test]
    fn dotted_name_keeps_its_suffix() {
        let loader = BundleAssetLoader::new(assets_dir());
        assert_eq!(
            loader.resource_path("TX_Station.v2"),
            assets_dir().join("TX_Station.v2.geojson")
        );

        let result = tokio_test::block_on(loader.load("TX_Station.v2"));
        assert_matches!(result, Err(AssetError::NotFound { name }) if name == "TX_Station.v2");
    }

    #[test]
    fn path_like_names_are_not_found() {
        let loader = BundleAssetLoader::new(assets_dir());
        let result = tokio_test::block_on(loader.load("../Cargo"));
        assert_matches!(result, Err(AssetError::NotFound { .. }));
    }

    #[test]
    fn directory_is_unreadable() {
        let loader = BundleAssetLoader::new(env!("CARGO_MANIFEST_DIR")).with_extension("");
        let result = tokio_test::block_on(loader.load("assets"));
        assert_matches!(result, Err(AssetError::Unreadable { name, .. }) if name == "assets");
    }
}
