// ─── Server Launch ───
// Runs an installed server in the foreground until it exits.

use tracing::info;

use crate::core::config::InstallConfig;
use crate::core::error::InstallResult;
use crate::core::loaders::Installer;
use crate::core::process::ProcessRunner;

/// Start the server for `config.loader` from `config.install_dir`.
///
/// Nothing is downloaded; a missing jar surfaces as the JVM's own failure.
pub async fn start_server(config: &InstallConfig, runner: &dyn ProcessRunner) -> InstallResult<()> {
    info!("=> Starting server...");

    let installer = Installer::new(config.loader);
    let cmd = installer.strategy().launch_command(config);
    runner.run(&cmd).await
}
