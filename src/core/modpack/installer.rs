use std::path::PathBuf;

use tracing::{debug, info, warn};

use super::extract::{extract_archive, restrict_permissions};
use super::index::{
    ModpackIndex, INDEX_FILE, MODPACK_EXTENSION, OVERRIDES_DIR,
    SERVER_OVERRIDES_DIR,
};
use super::overrides::merge_overrides;
use crate::core::config::InstallConfig;
use crate::core::downloader::{DownloadOutcome, DownloadTarget, Downloader};
use crate::core::error::{InstallError, InstallResult};
use crate::core::http::read_json_file;
use crate::core::modrinth::ModrinthClient;
use crate::core::paths;

/// What a modpack install did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ModpackSummary {
    pub fetched: usize,
    pub reused: usize,
    /// Server-required entries skipped because they list no download URL.
    pub missing_downloads: Vec<String>,
    /// Entries not required on a server.
    pub ignored: usize,
    pub overrides_copied: usize,
}

/// Installs a `.mrpack` bundle onto the install directory.
pub struct ModpackInstaller<'a> {
    config: &'a InstallConfig,
    modrinth: &'a ModrinthClient,
    downloader: &'a Downloader,
}

impl<'a> ModpackInstaller<'a> {
    pub fn new(
        config: &'a InstallConfig,
        modrinth: &'a ModrinthClient,
        downloader: &'a Downloader,
    ) -> Self {
        Self {
            config,
            modrinth,
            downloader,
        }
    }

    /// Resolve, fetch, extract and apply the modpack `slug`. Empty slug is a no-op.
    pub async fn install(&self, slug: &str, mc_version: &str) -> InstallResult<ModpackSummary> {
        info!("=> Installing Modrinth modpack...");

        let slug = slug.trim();
        if slug.is_empty() {
            return Ok(ModpackSummary::default());
        }

        let root = self.config.install_dir.as_path();
        let overwrite = self.config.overwrite;

        // 1. Resolve the bundle.
        let pack = self
            .modrinth
            .fetch_primary_file(slug, self.config.loader, mc_version)
            .await?;
        if !pack.filename.ends_with(MODPACK_EXTENSION) {
            return Err(InstallError::NotAModpack {
                slug: slug.to_string(),
                filename: pack.filename,
            });
        }

        // 2. Fetch and unpack it in place.
        let archive = root.join(paths::file_name(&pack.filename)?);
        self.downloader
            .ensure(&DownloadTarget::new(&archive, &pack.url, pack.sha1()), overwrite)
            .await?;

        let extract_root = root.to_path_buf();
        let index_path = root.join(INDEX_FILE);
        let restricted: Vec<PathBuf> = vec![
            index_path.clone(),
            root.join(OVERRIDES_DIR),
            root.join(SERVER_OVERRIDES_DIR),
        ];
        tokio::task::spawn_blocking(move || -> InstallResult<()> {
            extract_archive(&archive, &extract_root)?;
            restrict_permissions(&restricted)
        })
        .await??;

        // 3. Read the manifest.
        let index: ModpackIndex = read_json_file(&index_path).await?;
        if let Some(pack_mc) = index.minecraft_version() {
            if pack_mc != mc_version {
                warn!(
                    "Modpack {} targets Minecraft {} but installing for {}",
                    slug, pack_mc, mc_version
                );
            }
        }
        info!(
            "Modpack {} lists {} files",
            index.name.as_deref().unwrap_or(slug),
            index.files.len()
        );

        // 4. Server-required files only.
        let mut summary = ModpackSummary::default();
        for file in &index.files {
            if !file.required_on_server() {
                debug!("Skipping {} (not required on server)", file.path);
                summary.ignored += 1;
                continue;
            }

            let Some(url) = file.primary_download() else {
                warn!("Modpack mod {} does not have a download URL", file.path);
                summary.missing_downloads.push(file.path.clone());
                continue;
            };

            let dest = root.join(paths::relative_to_root(&file.path)?);
            let target = DownloadTarget::new(dest, url, &file.hashes.sha1);
            match self.downloader.ensure(&target, overwrite).await? {
                DownloadOutcome::Fetched => summary.fetched += 1,
                DownloadOutcome::Skipped => summary.reused += 1,
            }
        }

        // 5. Overrides, then server-only overrides on top.
        info!("Applying overrides...");
        let merge_root = root.to_path_buf();
        summary.overrides_copied = tokio::task::spawn_blocking(move || -> InstallResult<usize> {
            let common = merge_overrides(&merge_root.join(OVERRIDES_DIR), &merge_root)?;
            let server = merge_overrides(&merge_root.join(SERVER_OVERRIDES_DIR), &merge_root)?;
            Ok(common + server)
        })
        .await??;

        Ok(summary)
    }
}
