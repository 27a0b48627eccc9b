// ─── Modrinth ───
// Picks the primary file of the newest compatible release of a project.

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::core::config::LoaderType;
use crate::core::error::{InstallError, InstallResult};
use crate::core::http::fetch_json;

/// One release of a project, as listed by `/project/{slug}/version`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectVersion {
    #[serde(default)]
    pub version_number: Option<String>,
    #[serde(default)]
    pub files: Vec<ModrinthFile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModrinthFile {
    pub url: String,
    pub filename: String,
    #[serde(default)]
    pub primary: bool,
    #[serde(default)]
    pub hashes: FileHashes,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileHashes {
    #[serde(default)]
    pub sha1: String,
}

impl ModrinthFile {
    pub fn sha1(&self) -> &str {
        &self.hashes.sha1
    }
}

pub struct ModrinthClient {
    client: Client,
    api_base: String,
}

impl ModrinthClient {
    pub fn new(client: Client, api_base: &str) -> Self {
        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    /// `/project/{slug}/version` filtered to one loader and one game version.
    pub fn project_versions_url(
        &self,
        slug: &str,
        loader: LoaderType,
        mc_version: &str,
    ) -> InstallResult<String> {
        if matches!(slug, "" | "." | "..") {
            return Err(InstallError::Config(format!("Invalid Modrinth project slug {slug:?}")));
        }

        let mut url = url::Url::parse(&self.api_base).map_err(|source| InstallError::InvalidUrl {
            url: self.api_base.clone(),
            source,
        })?;
        // Pushed as path segments so `/` and `%` inside the slug are escaped.
        url.path_segments_mut()
            .map_err(|_| InstallError::InvalidUrl {
                url: self.api_base.clone(),
                source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
            })?
            .pop_if_empty()
            .extend(["project", slug, "version"]);
        url.query_pairs_mut()
            .append_pair("loaders", &json_singleton(&loader.to_string()))
            .append_pair("game_versions", &json_singleton(mc_version));

        Ok(url.into())
    }

    pub async fn project_versions(
        &self,
        slug: &str,
        loader: LoaderType,
        mc_version: &str,
    ) -> InstallResult<Vec<ProjectVersion>> {
        let url = self.project_versions_url(slug, loader, mc_version)?;
        debug!("Listing Modrinth versions: {}", url);
        fetch_json(&self.client, &url).await
    }

    /// Primary file of the first listed compatible release.
    ///
    /// The API's own ordering is trusted as newest-first.
    pub async fn fetch_primary_file(
        &self,
        slug: &str,
        loader: LoaderType,
        mc_version: &str,
    ) -> InstallResult<ModrinthFile> {
        let versions = self.project_versions(slug, loader, mc_version).await?;
        let file = select_primary_file(slug, mc_version, versions)?;
        info!("Resolved {} to {}", slug, file.filename);
        Ok(file)
    }
}

/// Take the first release and its file flagged primary.
pub fn select_primary_file(
    slug: &str,
    mc_version: &str,
    versions: Vec<ProjectVersion>,
) -> InstallResult<ModrinthFile> {
    let newest = versions
        .into_iter()
        .next()
        .ok_or_else(|| InstallError::NoCompatibleRelease {
            slug: slug.to_string(),
            mc_version: mc_version.to_string(),
        })?;

    newest
        .files
        .into_iter()
        .find(|file| file.primary)
        .ok_or_else(|| InstallError::NoPrimaryFile(slug.to_string()))
}

fn json_singleton(value: &str) -> String {
    serde_json::json!([value]).to_string()
}
