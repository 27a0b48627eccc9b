use crate::core::config::InstallConfig;
use crate::core::downloader::Downloader;
use crate::core::modrinth::ModrinthClient;
use crate::core::process::ProcessRunner;

/// Everything an install step may touch.
/// Borrowed for the length of one run.
pub struct InstallContext<'a> {
    pub config: &'a InstallConfig,
    pub http_client: &'a reqwest::Client,
    pub downloader: &'a Downloader,
    pub modrinth: &'a ModrinthClient,
    pub runner: &'a dyn ProcessRunner,
}

/// A Minecraft version that exists in the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersion {
    pub id: String,
    pub metadata_url: String,
}
