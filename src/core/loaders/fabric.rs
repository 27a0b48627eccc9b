use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use super::context::{InstallContext, ResolvedVersion};
use super::installer::LoaderStrategy;
use crate::core::config::InstallConfig;
use crate::core::downloader::DownloadTarget;
use crate::core::error::{InstallError, InstallResult};
use crate::core::http::fetch_json;
use crate::core::process::CommandSpec;

pub const INSTALLER_JAR: &str = "fabric-installer.jar";
pub const LAUNCH_JAR: &str = "fabric-server-launch.jar";

/// Entry of `<meta>/versions/installer`.
#[derive(Debug, Clone, Deserialize)]
pub struct FabricInstallerVersion {
    pub url: String,
    pub version: String,
    #[serde(default)]
    pub stable: bool,
}

/// First stable build, falling back to the newest one listed.
pub fn pick_installer(versions: &[FabricInstallerVersion]) -> Option<&FabricInstallerVersion> {
    versions.iter().find(|v| v.stable).or_else(|| versions.first())
}

pub struct FabricInstaller;

#[async_trait]
impl LoaderStrategy for FabricInstaller {
    async fn resolve_artifacts(
        &self,
        ctx: &InstallContext<'_>,
        _version: &ResolvedVersion,
    ) -> InstallResult<Vec<DownloadTarget>> {
        let meta_url = format!(
            "{}/versions/installer",
            ctx.config.endpoints.fabric_meta_url.trim_end_matches('/')
        );
        let versions: Vec<FabricInstallerVersion> = fetch_json(ctx.http_client, &meta_url).await?;

        let installer = pick_installer(&versions).ok_or_else(|| InstallError::LoaderVersionNotFound {
            loader: "Fabric".into(),
            version: "installer".into(),
        })?;
        info!("Fabric installer {}", installer.version);

        // Meta publishes no checksum for the installer jar.
        Ok(vec![DownloadTarget::new(
            ctx.config.install_dir.join(INSTALLER_JAR),
            &installer.url,
            "",
        )])
    }

    async fn invoke_installer(
        &self,
        ctx: &InstallContext<'_>,
        version: &ResolvedVersion,
    ) -> InstallResult<()> {
        info!("Running Fabric installer for {}", version.id);
        let cmd = CommandSpec::java_jar(
            &ctx.config.java,
            INSTALLER_JAR,
            ["server", "-downloadMinecraft", "-mcversion", version.id.as_str()],
            &ctx.config.install_dir,
        );
        ctx.runner.run(&cmd).await
    }

    fn supports_mods(&self) -> bool {
        true
    }

    fn launch_command(&self, config: &InstallConfig) -> CommandSpec {
        CommandSpec::java_jar(&config.java, LAUNCH_JAR, ["--nogui"], &config.install_dir)
    }
}
