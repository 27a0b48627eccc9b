// ─── Version Metadata ───
// Per-version JSON; only the server download is of interest here.

use serde::Deserialize;

use crate::core::error::{InstallError, InstallResult};
use crate::core::http::fetch_json;

#[derive(Debug, Deserialize)]
pub struct VersionMetadata {
    #[serde(default)]
    pub id: Option<String>,
    pub downloads: VersionDownloads,
}

#[derive(Debug, Deserialize)]
pub struct VersionDownloads {
    pub server: Option<DownloadArtifact>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DownloadArtifact {
    pub sha1: String,
    #[serde(default)]
    pub size: Option<u64>,
    pub url: String,
}

impl VersionMetadata {
    pub async fn fetch(client: &reqwest::Client, location: &str) -> InstallResult<Self> {
        fetch_json(client, location).await
    }

    /// The dedicated server jar. Very old versions do not publish one.
    pub fn server_artifact(&self, version: &str) -> InstallResult<&DownloadArtifact> {
        self.downloads
            .server
            .as_ref()
            .ok_or_else(|| InstallError::NoServerDownload(version.to_string()))
    }
}
