use std::collections::HashMap;

use serde::Deserialize;

use crate::core::modrinth::FileHashes;

/// Manifest file at the root of every `.mrpack`.
pub const INDEX_FILE: &str = "modrinth.index.json";
/// Files copied onto the install root for both client and server.
pub const OVERRIDES_DIR: &str = "overrides";
/// Server-only overrides, applied after [`OVERRIDES_DIR`].
pub const SERVER_OVERRIDES_DIR: &str = "server-overrides";
pub const MODPACK_EXTENSION: &str = ".mrpack";

/// `modrinth.index.json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModpackIndex {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version_id: Option<String>,
    #[serde(default)]
    pub files: Vec<ModpackFile>,
    /// e.g. `minecraft`, `fabric-loader`, `forge` → version.
    #[serde(default)]
    pub dependencies: HashMap<String, String>,
}

/// A file entry within the index.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModpackFile {
    /// Target path relative to the install root (e.g. `mods/fabric-api.jar`).
    pub path: String,
    #[serde(default)]
    pub hashes: FileHashes,
    #[serde(default)]
    pub env: Option<FileEnv>,
    /// Mirrors, most preferred first.
    #[serde(default)]
    pub downloads: Vec<String>,
    #[serde(default)]
    pub file_size: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileEnv {
    #[serde(default)]
    pub client: Option<EnvRequirement>,
    #[serde(default)]
    pub server: Option<EnvRequirement>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EnvRequirement {
    Required,
    Optional,
    Unsupported,
}

impl ModpackFile {
    /// `None` when the entry has no `env` block or no `server` key.
    pub fn server_requirement(&self) -> Option<EnvRequirement> {
        self.env.as_ref().and_then(|env| env.server)
    }

    /// Only entries explicitly marked `server: required` are installed.
    pub fn required_on_server(&self) -> bool {
        self.server_requirement() == Some(EnvRequirement::Required)
    }

    pub fn primary_download(&self) -> Option<&str> {
        self.downloads.first().map(String::as_str)
    }
}

impl ModpackIndex {
    pub fn minecraft_version(&self) -> Option<&str> {
        self.dependencies.get("minecraft").map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_index_entries() {
        let index: ModpackIndex = serde_json::from_str(
            r#"{
                "formatVersion": 1,
                "game": "minecraft",
                "versionId": "1.0.0",
                "name": "Pack",
                "files": [
                    {
                        "path": "mods/a.jar",
                        "hashes": { "sha1": "aa", "sha512": "bb" },
                        "env": { "client": "required", "server": "optional" },
                        "downloads": ["https://cdn/a.jar", "https://mirror/a.jar"],
                        "fileSize": 10
                    },
                    { "path": "mods/b.jar", "hashes": { "sha1": "cc" }, "downloads": [] }
                ],
                "dependencies": { "minecraft": "1.20.1", "fabric-loader": "0.15.0" }
            }"#,
        )
        .unwrap();

        assert_eq!(index.minecraft_version(), Some("1.20.1"));
        assert_eq!(index.files[0].server_requirement(), Some(EnvRequirement::Optional));
        assert!(!index.files[0].required_on_server());
        assert_eq!(index.files[0].primary_download(), Some("https://cdn/a.jar"));
        assert_eq!(index.files[0].hashes.sha1, "aa");
        assert_eq!(index.files[1].server_requirement(), None);
        assert!(!index.files[1].required_on_server());
        assert_eq!(index.files[1].primary_download(), None);
    }

    #[test]
    fn missing_server_key_is_not_required() {
        let file: ModpackFile = serde_json::from_str(
            r#"{ "path": "mods/c.jar", "env": { "client": "required" }, "downloads": [] }"#,
        )
        .unwrap();
        assert_eq!(file.server_requirement(), None);
        assert!(!file.required_on_server());
    }

    #[test]
    fn unknown_requirement_value_is_a_decode_error() {
        let parsed = serde_json::from_str::<FileEnv>(r#"{ "client": "required", "server": "maybe" }"#);
        assert!(parsed.is_err());
    }
}
