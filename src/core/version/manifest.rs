// ─── Version Manifest ───
// Fetches the Mojang version manifest and resolves version aliases against it.

use serde::Deserialize;
use tracing::info;

use crate::core::error::{InstallError, InstallResult};
use crate::core::http::fetch_json;

/// Alias for the newest release.
pub const LATEST: &str = "latest";
/// Alias for the newest snapshot.
pub const LATEST_SNAPSHOT: &str = "latest-snapshot";

/// Top-level Mojang version manifest.
#[derive(Debug, Deserialize)]
pub struct VersionManifest {
    pub latest: LatestVersions,
    pub versions: Vec<VersionEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LatestVersions {
    pub release: String,
    pub snapshot: String,
}

/// A single entry in the manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionEntry {
    pub id: String,
    #[serde(rename = "type", default)]
    pub version_type: String,
    pub url: String,
}

impl VersionManifest {
    /// Fetch the version manifest from `location` using a shared HTTP client.
    pub async fn fetch(client: &reqwest::Client, location: &str) -> InstallResult<Self> {
        info!("Fetching Minecraft version manifest...");

        let manifest: VersionManifest = fetch_json(client, location).await?;

        info!("Loaded {} versions from manifest", manifest.versions.len());
        Ok(manifest)
    }

    /// Turn `latest` / `latest-snapshot` into a concrete id.
    ///
    /// Anything else is returned unchanged; existence is checked by
    /// [`VersionManifest::metadata_url`].
    pub fn resolve_version(&self, requested: &str) -> String {
        match requested {
            LATEST => self.latest.release.clone(),
            LATEST_SNAPSHOT => self.latest.snapshot.clone(),
            other => other.to_string(),
        }
    }

    /// Find a specific version entry by ID (e.g. "1.20.4").
    pub fn find_version(&self, id: &str) -> Option<&VersionEntry> {
        self.versions.iter().find(|v| v.id == id)
    }

    /// URL of the per-version metadata document. The only existence check for a version.
    pub fn metadata_url(&self, id: &str) -> InstallResult<&str> {
        self.find_version(id)
            .map(|entry| entry.url.as_str())
            .ok_or_else(|| InstallError::VersionNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> VersionManifest {
        serde_json::from_str(
            r#"{
                "latest": { "release": "1.21", "snapshot": "24w33a" },
                "versions": [
                    { "id": "24w33a", "type": "snapshot", "url": "https://meta/24w33a.json" },
                    { "id": "1.21", "type": "release", "url": "https://meta/1.21.json" },
                    { "id": "1.20.1", "type": "release", "url": "https://meta/1.20.1.json" }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn latest_resolves_to_release() {
        assert_eq!(manifest().resolve_version("latest"), "1.21");
    }

    #[test]
    fn latest_snapshot_resolves_to_snapshot() {
        assert_eq!(manifest().resolve_version("latest-snapshot"), "24w33a");
    }

    #[test]
    fn concrete_ids_pass_through_unchecked() {
        let m = manifest();
        assert_eq!(m.resolve_version("1.20.1"), "1.20.1");
        assert_eq!(m.resolve_version("b1.7.3"), "b1.7.3");
    }

    #[test]
    fn metadata_url_for_known_version() {
        assert_eq!(manifest().metadata_url("1.20.1").unwrap(), "https://meta/1.20.1.json");
    }

    #[test]
    fn unknown_version_is_not_found() {
        let err = manifest().metadata_url("1.99").unwrap_err();
        assert!(matches!(err, InstallError::VersionNotFound(id) if id == "1.99"));
    }

    #[test]
    fn deserialize_manifest_entry_without_type() {
        let entry: VersionEntry =
            serde_json::from_str(r#"{ "id": "1.20.4", "url": "https://example.com/1.20.4.json" }"#)
                .unwrap();
        assert_eq!(entry.id, "1.20.4");
        assert_eq!(entry.version_type, "");
    }
}
