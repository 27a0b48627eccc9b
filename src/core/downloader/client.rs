use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use reqwest::Client;
use sha1::{Digest, Sha1};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::core::error::{InstallError, InstallResult};

/// A single artifact to place at `dest`, optionally guarded by a SHA-1.
///
/// `sha1 == None` means the artifact cannot be verified and is always
/// treated as stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    pub url: String,
    pub dest: PathBuf,
    pub sha1: Option<String>,
}

impl DownloadTarget {
    /// Build a target; an empty checksum string means "no integrity check".
    pub fn new(dest: impl Into<PathBuf>, url: impl Into<String>, sha1: &str) -> Self {
        let sha1 = sha1.trim();
        Self {
            url: url.into(),
            dest: dest.into(),
            sha1: (!sha1.is_empty()).then(|| sha1.to_ascii_lowercase()),
        }
    }
}

/// Why [`Downloader::ensure`] decided to download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchReason {
    Forced,
    /// No published checksum to compare against.
    Unverified,
    Missing,
    ChecksumMismatch { expected: String, actual: String },
}

/// What [`Downloader::ensure`] ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    Fetched,
    Skipped,
}

/// Checksum-gated downloader. Reuses verified local files, fetches everything else.
pub struct Downloader {
    client: Client,
}

impl Downloader {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    // ── Gate ────────────────────────────────────────────

    /// Make sure `target.dest` holds the artifact, fetching only when needed.
    ///
    /// Precedence: `force_overwrite`, then a missing checksum, then a missing
    /// local file, then a checksum comparison against the local copy.
    pub async fn ensure(
        &self,
        target: &DownloadTarget,
        force_overwrite: bool,
    ) -> InstallResult<DownloadOutcome> {
        match Self::fetch_reason(target, force_overwrite).await? {
            None => {
                info!("OK {}", target.dest.display());
                return Ok(DownloadOutcome::Skipped);
            }
            Some(FetchReason::ChecksumMismatch { expected, actual }) => warn!(
                "Checksum did not match for {}. Expected {} but got {}",
                target.dest.display(),
                expected,
                actual
            ),
            Some(reason) => debug!("Fetching {}: {:?}", target.dest.display(), reason),
        }

        self.download_file(target).await?;
        Ok(DownloadOutcome::Fetched)
    }

    /// Why `target` has to be (re)fetched, or `None` when the local copy is verified.
    pub async fn fetch_reason(
        target: &DownloadTarget,
        force_overwrite: bool,
    ) -> InstallResult<Option<FetchReason>> {
        if force_overwrite {
            return Ok(Some(FetchReason::Forced));
        }

        let Some(expected) = target.sha1.as_deref() else {
            return Ok(Some(FetchReason::Unverified));
        };

        let exists = tokio::fs::try_exists(&target.dest)
            .await
            .map_err(|e| InstallError::io(&target.dest, e))?;
        if !exists {
            return Ok(Some(FetchReason::Missing));
        }

        let actual = sha1_file(&target.dest).await?;
        if actual == expected {
            return Ok(None);
        }
        Ok(Some(FetchReason::ChecksumMismatch {
            expected: expected.to_string(),
            actual,
        }))
    }

    // ── Single file download ────────────────────────────

    /// Stream `target.url` into `target.dest`, replacing any existing content.
    ///
    /// Creates parent directories as needed. Nothing is cleaned up on failure.
    async fn download_file(&self, target: &DownloadTarget) -> InstallResult<()> {
        let dest = target.dest.as_path();
        info!("Downloading {}...", dest.display());

        let response = self.client.get(&target.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(InstallError::DownloadFailed {
                url: target.url.clone(),
                status: status.as_u16(),
            });
        }

        if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| InstallError::io(parent, e))?;
        }

        let mut hasher = Sha1::new();
        {
            let mut file = tokio::fs::File::create(dest)
                .await
                .map_err(|e| InstallError::io(dest, e))?;

            let mut stream = response.bytes_stream();
            while let Some(chunk) = stream.next().await {
                let chunk = chunk?;
                hasher.update(&chunk);
                file.write_all(&chunk)
                    .await
                    .map_err(|e| InstallError::io(dest, e))?;
            }

            file.flush().await.map_err(|e| InstallError::io(dest, e))?;
        }

        if let Some(expected) = target.sha1.as_deref() {
            let actual = hex::encode(hasher.finalize());
            if actual != expected {
                return Err(InstallError::Sha1Mismatch {
                    path: dest.to_path_buf(),
                    expected: expected.to_string(),
                    actual,
                });
            }
        }

        debug!("Downloaded: {} -> {:?}", target.url, dest);
        Ok(())
    }
}

/// Lowercase hex SHA-1 of a file, read in chunks.
pub async fn sha1_file(path: &Path) -> InstallResult<String> {
    let mut file = tokio::fs::File::open(path)
        .await
        .map_err(|e| InstallError::io(path, e))?;

    let mut hasher = Sha1::new();
    let mut buf = vec![0u8; 64 * 1024];
    loop {
        let read = file
            .read(&mut buf)
            .await
            .map_err(|e| InstallError::io(path, e))?;
        if read == 0 {
            break;
        }
        hasher.update(&buf[..read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::core::http::build_http_client;
    use crate::core::test_support::{sha1_hex, FixtureServer};

    const BODY: &[u8] = b"server jar bytes";

    fn downloader() -> Downloader {
        Downloader::new(build_http_client().unwrap())
    }

    #[test]
    fn empty_checksum_means_unverified() {
        let target = DownloadTarget::new("a.jar", "http://x/a.jar", "");
        assert_eq!(target.sha1, None);

        let target = DownloadTarget::new("a.jar", "http://x/a.jar", "ABCDEF");
        assert_eq!(target.sha1.as_deref(), Some("abcdef"));
    }

    #[tokio::test]
    async fn verified_file_is_not_fetched_twice() {
        let server = FixtureServer::start();
        server.route("/server.jar", BODY);
        let dir = tempfile::tempdir().unwrap();
        let target = DownloadTarget::new(
            dir.path().join("server.jar"),
            server.url("/server.jar"),
            &sha1_hex(BODY),
        );
        let dl = downloader();

        assert_eq!(dl.ensure(&target, false).await.unwrap(), DownloadOutcome::Fetched);
        assert_eq!(dl.ensure(&target, false).await.unwrap(), DownloadOutcome::Skipped);
        assert_eq!(server.hits("/server.jar"), 1);
        assert_eq!(std::fs::read(&target.dest).unwrap(), BODY);
    }

    #[tokio::test]
    async fn corrupted_local_copy_is_refetched() {
        let server = FixtureServer::start();
        server.route("/server.jar", BODY);
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("server.jar");
        std::fs::write(&dest, b"server jar bytez").unwrap();
        let target = DownloadTarget::new(&dest, server.url("/server.jar"), &sha1_hex(BODY));

        let outcome = downloader().ensure(&target, false).await.unwrap();

        assert_eq!(outcome, DownloadOutcome::Fetched);
        assert_eq!(server.hits("/server.jar"), 1);
        assert_eq!(std::fs::read(&dest).unwrap(), BODY);
    }

    #[tokio::test]
    async fn fetch_reason_follows_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("server.jar");
        let target = DownloadTarget::new(&dest, "http://unused/server.jar", &sha1_hex(BODY));

        assert_eq!(
            Downloader::fetch_reason(&target, false).await.unwrap(),
            Some(FetchReason::Missing)
        );

        std::fs::write(&dest, BODY).unwrap();
        assert_eq!(Downloader::fetch_reason(&target, false).await.unwrap(), None);
        assert_eq!(
            Downloader::fetch_reason(&target, true).await.unwrap(),
            Some(FetchReason::Forced)
        );

        let unverified = DownloadTarget::new(&dest, "http://unused/server.jar", "");
        assert_eq!(
            Downloader::fetch_reason(&unverified, false).await.unwrap(),
            Some(FetchReason::Unverified)
        );
    }

    #[tokio::test]
    async fn one_changed_byte_reports_both_digests() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("server.jar");
        let mut corrupted = BODY.to_vec();
        corrupted[0] ^= 0x01;
        std::fs::write(&dest, &corrupted).unwrap();
        let target = DownloadTarget::new(&dest, "http://unused/server.jar", &sha1_hex(BODY));

        let reason = Downloader::fetch_reason(&target, false).await.unwrap();

        assert_eq!(
            reason,
            Some(FetchReason::ChecksumMismatch {
                expected: sha1_hex(BODY),
                actual: sha1_hex(&corrupted),
            })
        );
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn mismatch_warning_names_expected_and_actual() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let server = FixtureServer::start();
        server.route("/server.jar", BODY);
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("server.jar");
        std::fs::write(&dest, b"stale").unwrap();
        let target = DownloadTarget::new(&dest, server.url("/server.jar"), &sha1_hex(BODY));

        downloader().ensure(&target, false).await.unwrap();

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        let expected_line = format!(
            "Checksum did not match for {}. Expected {} but got {}",
            dest.display(),
            sha1_hex(BODY),
            sha1_hex(b"stale")
        );
        assert!(output.contains("WARN"), "{output}");
        assert!(output.contains(&expected_line), "{output}");
    }

    #[tokio::test]
    async fn unverified_artifact_is_always_refetched() {
        let server = FixtureServer::start();
        server.route("/installer.jar", BODY);
        let dir = tempfile::tempdir().unwrap();
        let target = DownloadTarget::new(
            dir.path().join("installer.jar"),
            server.url("/installer.jar"),
            "",
        );
        let dl = downloader();

        dl.ensure(&target, false).await.unwrap();
        let second = dl.ensure(&target, false).await.unwrap();

        assert_eq!(second, DownloadOutcome::Fetched);
        assert_eq!(server.hits("/installer.jar"), 2);
    }

    #[tokio::test]
    async fn force_overwrite_beats_valid_checksum() {
        let server = FixtureServer::start();
        server.route("/server.jar", BODY);
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("server.jar");
        std::fs::write(&dest, BODY).unwrap();
        let target = DownloadTarget::new(&dest, server.url("/server.jar"), &sha1_hex(BODY));

        let outcome = downloader().ensure(&target, true).await.unwrap();

        assert_eq!(outcome, DownloadOutcome::Fetched);
        assert_eq!(server.hits("/server.jar"), 1);
    }

    #[tokio::test]
    async fn creates_parent_directories() {
        let server = FixtureServer::start();
        server.route("/mod.jar", BODY);
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("mods").join("nested").join("mod.jar");
        let target = DownloadTarget::new(&dest, server.url("/mod.jar"), &sha1_hex(BODY));

        downloader().ensure(&target, false).await.unwrap();

        assert!(dest.is_file());
    }

    #[tokio::test]
    async fn non_success_status_is_fatal() {
        let server = FixtureServer::start();
        let dir = tempfile::tempdir().unwrap();
        let target = DownloadTarget::new(dir.path().join("gone.jar"), server.url("/gone.jar"), "");

        let err = downloader().ensure(&target, false).await.unwrap_err();

        assert!(matches!(err, InstallError::DownloadFailed { status: 404, .. }));
        assert!(!target.dest.exists());
    }

    #[tokio::test]
    async fn upstream_bytes_that_do_not_match_are_rejected() {
        let server = FixtureServer::start();
        server.route("/server.jar", b"tampered".to_vec());
        let dir = tempfile::tempdir().unwrap();
        let target = DownloadTarget::new(
            dir.path().join("server.jar"),
            server.url("/server.jar"),
            &sha1_hex(BODY),
        );

        let err = downloader().ensure(&target, false).await.unwrap_err();

        assert!(matches!(err, InstallError::Sha1Mismatch { .. }));
    }

    #[tokio::test]
    async fn sha1_file_matches_in_memory_digest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob");
        let data = vec![7u8; 200_000];
        std::fs::write(&path, &data).unwrap();

        assert_eq!(sha1_file(&path).await.unwrap(), sha1_hex(&data));
    }
}
