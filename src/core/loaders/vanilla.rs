use async_trait::async_trait;
use tracing::debug;

use super::context::{InstallContext, ResolvedVersion};
use super::installer::LoaderStrategy;
use crate::core::config::InstallConfig;
use crate::core::downloader::DownloadTarget;
use crate::core::error::InstallResult;
use crate::core::process::CommandSpec;
use crate::core::version::VersionMetadata;

pub const SERVER_JAR: &str = "server.jar";

/// Plain Mojang server. The only checksum-verified loader.
pub struct VanillaInstaller;

#[async_trait]
impl LoaderStrategy for VanillaInstaller {
    async fn resolve_artifacts(
        &self,
        ctx: &InstallContext<'_>,
        version: &ResolvedVersion,
    ) -> InstallResult<Vec<DownloadTarget>> {
        let metadata = VersionMetadata::fetch(ctx.http_client, &version.metadata_url).await?;
        let artifact = metadata.server_artifact(&version.id)?;
        debug!("Server jar for {}: {} ({:?} bytes)", version.id, artifact.url, artifact.size);

        Ok(vec![DownloadTarget::new(
            ctx.config.install_dir.join(SERVER_JAR),
            &artifact.url,
            &artifact.sha1,
        )])
    }

    async fn invoke_installer(
        &self,
        _ctx: &InstallContext<'_>,
        _version: &ResolvedVersion,
    ) -> InstallResult<()> {
        Ok(())
    }

    fn supports_mods(&self) -> bool {
        false
    }

    fn launch_command(&self, config: &InstallConfig) -> CommandSpec {
        CommandSpec::java_jar(&config.java, SERVER_JAR, ["--nogui"], &config.install_dir)
    }
}
