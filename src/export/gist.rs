// Gist Publishing
// Payload and response handling for uploading the catalog as a private gist

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

use super::json::CatalogExport;
use crate::catalog::{Catalog, PatternRecord};

pub const GIST_FILENAME: &str = "beatgrid.json";
pub const GIST_DESCRIPTION: &str = "BeatGrid export";

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Gist save failed: response had no URL")]
    MissingUrl,
}

pub type PublishResult<T> = Result<T, PublishError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GistFile {
    pub content: String,
}

/// Request body for creating a gist
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GistPayload {
    pub description: String,
    pub public: bool,
    pub files: BTreeMap<String, GistFile>,
}

impl GistPayload {
    /// Private gist holding the whole catalog as one JSON file
    pub fn for_catalog(catalog: &Catalog) -> PublishResult<Self> {
        #[derive(Serialize)]
        struct Patterns<'a> {
            drums: &'a [Arc<PatternRecord>],
            basses: &'a [Arc<PatternRecord>],
            leads: &'a [Arc<PatternRecord>],
        }

        let export = CatalogExport::new(catalog, 0);
        let content = serde_json::to_string_pretty(&Patterns {
            drums: &export.drums,
            basses: &export.basses,
            leads: &export.leads,
        })?;

        let mut files = BTreeMap::new();
        files.insert(GIST_FILENAME.to_string(), GistFile { content });

        Ok(GistPayload {
            description: GIST_DESCRIPTION.to_string(),
            public: false,
            files,
        })
    }
}

/// What a successful upload gives back
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GistReceipt {
    pub html_url: String,
}

impl GistReceipt {
    /// Read the gist URL from a create-gist response body
    pub fn from_response(body: &str) -> PublishResult<Self> {
        #[derive(Deserialize)]
        struct Response {
            html_url: Option<String>,
        }

        let response: Response = serde_json::from_str(body)?;
        match response.html_url {
            Some(html_url) if !html_url.is_empty() => Ok(GistReceipt { html_url }),
            _ => Err(PublishError::MissingUrl),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_payload_shape() {
        let catalog = Catalog::builtin();
        let payload = GistPayload::for_catalog(&catalog).unwrap();
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(value["description"], GIST_DESCRIPTION);
        assert_eq!(value["public"], false);

        let content = value["files"][GIST_FILENAME]["content"].as_str().unwrap();
        let inner: Value = serde_json::from_str(content).unwrap();
        assert_eq!(inner["drums"].as_array().unwrap().len(), catalog.summary().drums);
        assert!(inner.get("tempo").is_none());
    }

    #[test]
    fn test_receipt_from_response() {
        let receipt = GistReceipt::from_response(r#"{"id":"abc","html_url":"https://gist.github.com/abc"}"#).unwrap();
        assert_eq!(receipt.html_url, "https://gist.github.com/abc");

        assert!(matches!(
            GistReceipt::from_response(r#"{"message":"Bad credentials"}"#),
            Err(PublishError::MissingUrl)
        ));
        assert!(matches!(GistReceipt::from_response("<html>"), Err(PublishError::Json(_))));
    }
}
