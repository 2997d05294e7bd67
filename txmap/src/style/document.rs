//! The base style document and the ways to obtain it.

use std::fmt::{Debug, Formatter};

use serde_json::{json, Value};

use crate::error::TxMapError;

/// Vector map style document describing the base map.
///
/// The document belongs to a third-party rendering engine. It is kept as raw JSON: the crate
/// only reads its name and appends its own sources and layers on export.
#[derive(Clone, PartialEq)]
pub struct StyleDocument {
    url: Option<String>,
    json: Value,
}

impl StyleDocument {
    /// Creates a document from its JSON. The JSON must be an object.
    pub fn new(url: Option<String>, json: Value) -> Result<Self, TxMapError> {
        if !json.is_object() {
            return Err(TxMapError::StyleDocument(
                "style document must be a JSON object".into(),
            ));
        }

        Ok(Self { url, json })
    }

    /// Parses a document from bytes.
    pub fn from_slice(url: Option<String>, bytes: &[u8]) -> Result<Self, TxMapError> {
        let json = serde_json::from_slice(bytes)
            .map_err(|err| TxMapError::StyleDocument(err.to_string()))?;
        Self::new(url, json)
    }

    /// An empty style without base layers.
    pub fn empty() -> Self {
        Self {
            url: None,
            json: json!({
                "version": 8,
                "sources": {},
                "layers": [],
            }),
        }
    }

    /// URL the document was loaded from.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Name of the style, if the document has one.
    pub fn name(&self) -> Option<&str> {
        self.json.get("name").and_then(Value::as_str)
    }

    /// Raw JSON of the document.
    pub fn json(&self) -> &Value {
        &self.json
    }
}

impl Debug for StyleDocument {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyleDocument")
            .field("url", &self.url.as_deref().map(redact_url))
            .field("json", &self.json)
            .finish()
    }
}

/// Strips the query and fragment of a URL. Style URLs carry the access key in the query, so
/// only the redacted form is logged or printed.
pub(crate) fn redact_url(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    &url[..end]
}

/// Obtains the style document for a style URL.
#[async_trait::async_trait]
pub trait StyleLoader: Send + Sync {
    /// Loads the document.
    async fn load(&self, url: &str) -> Result<StyleDocument, TxMapError>;
}

/// Downloads style documents over HTTP(S).
#[cfg(feature = "http")]
#[derive(Debug, Clone, Default)]
pub struct HttpStyleLoader {
    client: reqwest::Client,
}

#[cfg(feature = "http")]
impl HttpStyleLoader {
    /// Creates a loader with a default client.
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(feature = "http")]
#[async_trait::async_trait]
impl StyleLoader for HttpStyleLoader {
    async fn load(&self, url: &str) -> Result<StyleDocument, TxMapError> {
        log::debug!("Requesting style document");
        let response = self.client.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        log::debug!("Received style document: {} bytes", bytes.len());

        StyleDocument::from_slice(Some(url.to_string()), &bytes)
    }
}

/// Serves the same preloaded document for any URL. Useful for offline use and tests.
#[derive(Debug, Clone)]
pub struct StaticStyleLoader {
    document: StyleDocument,
}

impl StaticStyleLoader {
    /// Creates a new loader.
    pub fn new(document: StyleDocument) -> Self {
        Self { document }
    }
}

#[async_trait::async_trait]
impl StyleLoader for StaticStyleLoader {
    async fn load(&self, _url: &str) -> Result<StyleDocument, TxMapError> {
        Ok(self.document.clone())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn redacted_url_has_no_query() {
        assert_eq!(
            redact_url("https://api.maptiler.com/maps/jp-mierune-gray/style.json?key=abc#top"),
            "https://api.maptiler.com/maps/jp-mierune-gray/style.json"
        );
        assert_eq!(
            redact_url("https://example.com/style.json"),
            "https://example.com/style.json"
        );

        let document = StyleDocument::new(
            Some("https://example.com/style.json?key=abc".into()),
            json!({}),
        )
        .unwrap();
        let debug = format!("{document:?}");
        assert!(debug.contains("https://example.com/style.json"));
        assert!(!debug.contains("abc"));
    }

    #[test]
    fn document_name() {
        let document =
            StyleDocument::from_slice(None, br#"{"version": 8, "name": "jp-mierune-gray"}"#)
                .unwrap();
        assert_eq!(document.name(), Some("jp-mierune-gray"));
        assert_eq!(StyleDocument::empty().name(), None);
    }

    #[test]
    fn non_object_document_is_rejected() {
        assert_matches!(
            StyleDocument::from_slice(None, b"[1, 2, 3]"),
            Err(TxMapError::StyleDocument(_))
        );
        assert_matches!(
            StyleDocument::from_slice(None, b"{\"version\": "),
            Err(TxMapError::StyleDocument(_))
        );
    }
}
