use std::path::PathBuf;
use thiserror::Error;

/// Central error type for the installer.
/// Every module returns `Result<T, InstallError>`; the run stops at the first one.
#[derive(Debug, Error)]
pub enum InstallError {
    // ── IO ──────────────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Network ─────────────────────────────────────────
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to fetch {url}: status code {status}")]
    DownloadFailed { url: String, status: u16 },

    #[error("Invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    // ── JSON ────────────────────────────────────────────
    #[error("Failed to parse JSON from {location}: {source}")]
    Json {
        location: String,
        source: serde_json::Error,
    },

    // ── Integrity ───────────────────────────────────────
    #[error("SHA-1 mismatch for {path:?}: expected {expected}, got {actual}")]
    Sha1Mismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    // ── Resolution ──────────────────────────────────────
    #[error("Could not find Minecraft version {0}")]
    VersionNotFound(String),

    #[error("Minecraft version {0} has no server download")]
    NoServerDownload(String),

    #[error("Could not find {loader} version: {version}")]
    LoaderVersionNotFound { loader: String, version: String },

    #[error("Could not find a valid version on Modrinth for {slug} for Minecraft {mc_version}")]
    NoCompatibleRelease { slug: String, mc_version: String },

    #[error("Found version on Modrinth for {0}, but could not find a primary file")]
    NoPrimaryFile(String),

    #[error("Modpack {slug} is not a .mrpack (got {filename})")]
    NotAModpack { slug: String, filename: String },

    #[error("Refusing to write outside the install directory: {0}")]
    UnsafePath(String),

    // ── Processes ───────────────────────────────────────
    #[error("Failed to start {program}: {source}")]
    ProcessSpawn {
        program: String,
        source: std::io::Error,
    },

    #[error("{program} command failed (code {code:?})")]
    ProcessFailed { program: String, code: Option<i32> },

    // ── Archive ─────────────────────────────────────────
    #[error("Zip extraction error: {0}")]
    Zip(#[from] zip::result::ZipError),

    // ── Config ──────────────────────────────────────────
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Convenience alias used throughout the crate.
pub type InstallResult<T> = Result<T, InstallError>;

impl InstallError {
    /// Wrap an IO error with the path it happened at.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        InstallError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<std::io::Error> for InstallError {
    fn from(source: std::io::Error) -> Self {
        InstallError::Io {
            path: PathBuf::new(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_errors_carry_distinguishing_messages() {
        let missing = InstallError::VersionNotFound("1.99".into());
        assert_eq!(missing.to_string(), "Could not find Minecraft version 1.99");

        let promo = InstallError::LoaderVersionNotFound {
            loader: "Forge".into(),
            version: "1.20.1-recommended".into(),
        };
        assert_eq!(
            promo.to_string(),
            "Could not find Forge version: 1.20.1-recommended"
        );

        let wrong = InstallError::NotAModpack {
            slug: "sodium".into(),
            filename: "sodium.jar".into(),
        };
        assert!(wrong.to_string().contains("is not a .mrpack"));
    }
}
