pub mod manifest;
pub mod metadata;
pub mod promotions;

pub use manifest::{LatestVersions, VersionEntry, VersionManifest, LATEST, LATEST_SNAPSHOT};
pub use metadata::{DownloadArtifact, VersionDownloads, VersionMetadata};
pub use promotions::{resolve_loader_version, LoaderPromotions, LoaderVersionRequest};
