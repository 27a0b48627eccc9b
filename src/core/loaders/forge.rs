use async_trait::async_trait;
use tracing::info;

use super::context::{InstallContext, ResolvedVersion};
use super::installer::LoaderStrategy;
use crate::core::config::InstallConfig;
use crate::core::downloader::DownloadTarget;
use crate::core::error::InstallResult;
use crate::core::http::fetch_json;
use crate::core::process::CommandSpec;
use crate::core::version::{resolve_loader_version, LoaderPromotions, LoaderVersionRequest};

pub const INSTALLER_JAR: &str = "forge-installer.jar";

const FORGE_PATH: &str = "net/minecraftforge/forge";

pub fn promotions_url(files_base: &str) -> String {
    format!("{}/maven/{FORGE_PATH}/promotions_slim.json", files_base.trim_end_matches('/'))
}

/// `<maven>/net/minecraftforge/forge/<v>/forge-<v>-installer.jar`
pub fn installer_url(maven_base: &str, forge_version: &str) -> String {
    format!(
        "{}/{FORGE_PATH}/{forge_version}/forge-{forge_version}-installer.jar",
        maven_base.trim_end_matches('/')
    )
}

pub struct ForgeInstaller;

#[async_trait]
impl LoaderStrategy for ForgeInstaller {
    async fn resolve_artifacts(
        &self,
        ctx: &InstallContext<'_>,
        version: &ResolvedVersion,
    ) -> InstallResult<Vec<DownloadTarget>> {
        let endpoints = &ctx.config.endpoints;
        let requested = LoaderVersionRequest::parse(&ctx.config.forge_version);
        let promotions = promotions_url(&endpoints.forge_files_url);

        let forge_version = resolve_loader_version("Forge", &version.id, &requested, || {
            fetch_json::<LoaderPromotions>(ctx.http_client, &promotions)
        })
        .await?;
        info!("Forge version: {}", forge_version);

        // The maven publishes no checksum alongside the installer.
        Ok(vec![DownloadTarget::new(
            ctx.config.install_dir.join(INSTALLER_JAR),
            installer_url(&endpoints.forge_maven_url, &forge_version),
            "",
        )])
    }

    async fn invoke_installer(
        &self,
        ctx: &InstallContext<'_>,
        _version: &ResolvedVersion,
    ) -> InstallResult<()> {
        info!("Running Forge installer");
        let cmd = CommandSpec::java_jar(
            &ctx.config.java,
            INSTALLER_JAR,
            ["--installServer"],
            &ctx.config.install_dir,
        );
        ctx.runner.run(&cmd).await
    }

    fn supports_mods(&self) -> bool {
        true
    }

    /// The installer leaves a run script behind; it carries the JVM arguments.
    fn launch_command(&self, config: &InstallConfig) -> CommandSpec {
        let script = if cfg!(windows) { "run.bat" } else { "run.sh" };
        CommandSpec::new(
            config.install_dir.join(script).to_string_lossy(),
            ["--nogui"],
            &config.install_dir,
        )
    }
}
