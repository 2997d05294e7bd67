//! Error types used by the crate.

use thiserror::Error;

/// A named asset could not be turned into a shape.
///
/// All variants describe the same condition - the asset is unavailable - and differ only in
/// the cause, which is kept for diagnostics.
#[derive(Debug, Error)]
pub enum AssetError {
    /// No resource with the given name exists.
    #[error("asset '{name}' is unavailable: not found")]
    NotFound {
        /// Name of the resource.
        name: String,
    },
    /// The resource exists but its bytes could not be read.
    #[error("asset '{name}' is unavailable: failed to read: {source}")]
    Unreadable {
        /// Name of the resource.
        name: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The bytes are not a valid GeoJSON document.
    #[error("asset '{name}' is unavailable: malformed GeoJSON: {reason}")]
    Malformed {
        /// Name of the resource.
        name: String,
        /// Description of the parsing failure.
        reason: String,
    },
}

impl AssetError {
    /// Name of the resource the error refers to.
    pub fn name(&self) -> &str {
        match self {
            AssetError::NotFound { name }
            | AssetError::Unreadable { name, .. }
            | AssetError::Malformed { name, .. } => name,
        }
    }
}

/// Crate error type.
#[derive(Debug, Error)]
pub enum TxMapError {
    /// An asset required for a layer is unavailable.
    #[error(transparent)]
    Asset(#[from] AssetError),
    /// The operation requires a loaded style, but the style is still loading.
    #[error("style is not loaded yet")]
    StyleNotReady,
    /// The style has already been loaded once.
    #[error("style is already loaded")]
    StyleAlreadyLoaded,
    /// A source with the same id is already present in the style.
    #[error("source '{0}' already exists in the style")]
    DuplicateSource(String),
    /// A layer with the same id is already present in the style.
    #[error("layer '{0}' already exists in the style")]
    DuplicateLayer(String),
    /// A layer references a source that was not added to the style.
    #[error("layer '{layer}' references unknown source '{source_id}'")]
    UnknownSource {
        /// Id of the layer.
        layer: String,
        /// Id of the missing source.
        source_id: String,
    },
    /// Zoom stops of an interpolated property are invalid.
    #[error("invalid zoom stops: {0}")]
    InvalidStops(String),
    /// Camera parameters are out of range.
    #[error("invalid camera: {0}")]
    InvalidCamera(String),
    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// The style document could not be obtained or is not a style document.
    #[error("invalid style document: {0}")]
    StyleDocument(String),
    /// I/O error (network or file).
    #[error("failed to load data: {0}")]
    IO(String),
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for TxMapError {
    fn from(value: reqwest::Error) -> Self {
        // The request URL carries the access key.
        Self::IO(value.without_url().to_string())
    }
}

impl From<std::io::Error> for TxMapError {
    fn from(value: std::io::Error) -> Self {
        Self::IO(value.to_string())
    }
}
