//! Document retrieval from a local file or a remote URL

use std::path::Path;
use std::time::Duration;

use crate::config::SourceConfig;
use crate::document::node::Document;
use crate::document::parser::parse_document;
use crate::error::{Error, Result};

/// Read and parse a document from a local file
pub async fn read_from_file(path: &Path) -> Result<Document> {
    if path.as_os_str().is_empty() {
        return Err(Error::blank("document path"));
    }
    let location = path.display().to_string();

    let bytes = tokio::fs::read(path).await.map_err(|e| Error::FetchError {
        location: location.clone(),
        message: e.to_string(),
    })?;

    parse_document(&bytes, &location)
}

/// Fetch and parse a document from a URL
pub async fn read_from_url(url: &str, timeout: Duration) -> Result<Document> {
    if url.trim().is_empty() {
        return Err(Error::blank("document url"));
    }
    let fetch_error = |e: reqwest::Error| Error::FetchError {
        location: url.to_string(),
        message: e.to_string(),
    };

    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(fetch_error)?;

    tracing::info!(url, "Fetching document");
    let bytes = client
        .get(url)
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(fetch_error)?
        .bytes()
        .await
        .map_err(fetch_error)?;

    parse_document(&bytes, url)
}

/// Load the document named by the source configuration. A file takes precedence over a URL.
pub async fn load(source: &SourceConfig) -> Result<Document> {
    let file = source.file.as_deref().filter(|f| !f.trim().is_empty());
    let url = source.url.as_deref().filter(|u| !u.trim().is_empty());

    match (file, url) {
        (Some(file), _) => read_from_file(Path::new(file)).await,
        (None, Some(url)) => read_from_url(url, Duration::from_secs(source.timeout_seconds)).await,
        (None, None) => Err(Error::InvalidArgument(
            "no document source: set source.file or source.url".to_string(),
        )),
    }
}
