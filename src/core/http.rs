use std::path::Path;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_ENCODING};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::core::error::{InstallError, InstallResult};

const APP_USER_AGENT: &str = concat!("mc-quick/", env!("CARGO_PKG_VERSION"));

pub fn build_http_client() -> Result<Client, reqwest::Error> {
    let mut default_headers = HeaderMap::new();
    default_headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("identity"));

    Client::builder()
        .user_agent(APP_USER_AGENT)
        .default_headers(default_headers)
        .build()
}

/// Fetch a JSON document and decode it into `T`.
///
/// `location` is either an `http(s)://` URL or a local path (`file://` prefix
/// optional). Anything but HTTP 200 is an error.
pub async fn fetch_json<T: DeserializeOwned>(client: &Client, location: &str) -> InstallResult<T> {
    if !is_remote(location) {
        let path = location.strip_prefix("file://").unwrap_or(location);
        return read_json_file(Path::new(path)).await;
    }

    debug!("GET {}", location);
    let response = client.get(location).send().await?;

    let status = response.status();
    if status != reqwest::StatusCode::OK {
        return Err(InstallError::DownloadFailed {
            url: location.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|source| InstallError::Json {
        location: location.to_string(),
        source,
    })
}

/// Read and decode a JSON file from disk.
pub async fn read_json_file<T: DeserializeOwned>(path: &Path) -> InstallResult<T> {
    let body = tokio::fs::read(path)
        .await
        .map_err(|e| InstallError::io(path, e))?;

    serde_json::from_slice(&body).map_err(|source| InstallError::Json {
        location: path.display().to_string(),
        source,
    })
}

fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}
