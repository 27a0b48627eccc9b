use async_trait::async_trait;
use tracing::{info, warn};

use crate::core::config::{InstallConfig, LoaderType};
use crate::core::downloader::DownloadTarget;
use crate::core::error::InstallResult;
use crate::core::modpack::ModpackInstaller;
use crate::core::mods::install_mods;
use crate::core::process::CommandSpec;
use crate::core::version::VersionManifest;

use super::{
    context::{InstallContext, ResolvedVersion},
    fabric::FabricInstaller,
    forge::ForgeInstaller,
    vanilla::VanillaInstaller,
};

/// Per-loader behaviour. The orchestration around it is shared.
#[async_trait]
pub trait LoaderStrategy: Send + Sync {
    /// Artifacts to place in the install directory before the installer runs.
    async fn resolve_artifacts(
        &self,
        ctx: &InstallContext<'_>,
        version: &ResolvedVersion,
    ) -> InstallResult<Vec<DownloadTarget>>;

    /// Run the loader's own installer, if it has one.
    async fn invoke_installer(
        &self,
        ctx: &InstallContext<'_>,
        version: &ResolvedVersion,
    ) -> InstallResult<()>;

    /// Whether Modrinth content can be layered on top.
    fn supports_mods(&self) -> bool;

    /// How `start` runs the installed server.
    fn launch_command(&self, config: &InstallConfig) -> CommandSpec;
}

/// The loader picked for this run, chosen once from [`LoaderType`].
pub enum Installer {
    Vanilla(VanillaInstaller),
    Fabric(FabricInstaller),
    Forge(ForgeInstaller),
}

impl Installer {
    pub fn new(loader: LoaderType) -> Self {
        match loader {
            LoaderType::Vanilla => Self::Vanilla(VanillaInstaller),
            LoaderType::Fabric => Self::Fabric(FabricInstaller),
            LoaderType::Forge => Self::Forge(ForgeInstaller),
        }
    }

    pub fn strategy(&self) -> &dyn LoaderStrategy {
        match self {
            Installer::Vanilla(i) => i,
            Installer::Fabric(i) => i,
            Installer::Forge(i) => i,
        }
    }
}

/// Fetch the manifest, resolve aliases and confirm the version exists.
pub async fn resolve_version(ctx: &InstallContext<'_>) -> InstallResult<ResolvedVersion> {
    let manifest =
        VersionManifest::fetch(ctx.http_client, &ctx.config.endpoints.version_manifest_url)
            .await?;

    let id = manifest.resolve_version(&ctx.config.mc_version);
    let metadata_url = manifest.metadata_url(&id)?.to_string();
    info!("Minecraft version: {}", id);

    Ok(ResolvedVersion { id, metadata_url })
}

/// Full `install` run: version, loader artifacts, loader installer, then content.
pub async fn install_server(ctx: &InstallContext<'_>) -> InstallResult<ResolvedVersion> {
    info!("=> Installing server...");

    let config = ctx.config;
    let version = resolve_version(ctx).await?;

    let installer = Installer::new(config.loader);
    let strategy = installer.strategy();

    for target in strategy.resolve_artifacts(ctx, &version).await? {
        ctx.downloader.ensure(&target, config.overwrite).await?;
    }
    strategy.invoke_installer(ctx, &version).await?;

    if !strategy.supports_mods() {
        if config.modpack.is_some() || !config.mods.is_empty() {
            warn!("Modpacks and mods need a mod loader; ignoring them for {}", config.loader);
        }
        return Ok(version);
    }

    let modpack = config.modpack.as_deref().unwrap_or_default();
    ModpackInstaller::new(config, ctx.modrinth, ctx.downloader)
        .install(modpack, &version.id)
        .await?;
    install_mods(config, ctx.modrinth, ctx.downloader, &version.id).await?;

    info!("{} server {} installed", config.loader, version.id);
    Ok(version)
}
