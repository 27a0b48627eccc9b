// ─── Named mods ───
// Each `--modrinth-mod` slug becomes mods/<primary file>.

use futures_util::stream::{self, StreamExt, TryStreamExt};
use tracing::info;

use crate::core::config::InstallConfig;
use crate::core::downloader::{DownloadOutcome, DownloadTarget, Downloader};
use crate::core::error::InstallResult;
use crate::core::modrinth::ModrinthClient;
use crate::core::paths;

/// Resolve and acquire every configured mod, at most `config.jobs` at a time.
///
/// The first failure aborts the whole loop; in-flight siblings are dropped.
pub async fn install_mods(
    config: &InstallConfig,
    modrinth: &ModrinthClient,
    downloader: &Downloader,
    mc_version: &str,
) -> InstallResult<Vec<DownloadOutcome>> {
    info!("=> Installing Modrinth mods...");

    let mods_dir = config.mods_dir();
    let mods_dir = &mods_dir;

    stream::iter(config.mods.iter())
        .map(|slug| async move {
            let file = modrinth
                .fetch_primary_file(slug, config.loader, mc_version)
                .await?;
            let dest = mods_dir.join(paths::file_name(&file.filename)?);
            let target = DownloadTarget::new(dest, &file.url, file.sha1());
            downloader.ensure(&target, config.overwrite).await
        })
        .buffered(config.jobs.max(1))
        .try_collect()
        .await
}
