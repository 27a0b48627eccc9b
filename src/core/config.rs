// ─── Configuration ───
// Layered settings: defaults < ~/.config/mc-quick/config.json < $CONFIG_FILE
// < --config file < command-line flags. Built once, then passed by reference.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::error::{InstallError, InstallResult};

pub const DEFAULT_VERSION_MANIFEST_URL: &str =
    "https://launchermeta.mojang.com/mc/game/version_manifest.json";
pub const DEFAULT_MODRINTH_API_URL: &str = "https://api.modrinth.com/v2";
pub const DEFAULT_FORGE_FILES_URL: &str = "https://files.minecraftforge.net";
pub const DEFAULT_FORGE_MAVEN_URL: &str = "https://maven.minecraftforge.net";
pub const DEFAULT_FABRIC_META_URL: &str = "https://meta.fabricmc.net/v2";

const HOME_CONFIG_FILE: &str = ".config/mc-quick/config.json";
const CONFIG_FILE_ENV: &str = "CONFIG_FILE";

/// Supported server loaders.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LoaderType {
    Vanilla,
    Fabric,
    Forge,
}

impl std::fmt::Display for LoaderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoaderType::Vanilla => write!(f, "vanilla"),
            LoaderType::Fabric => write!(f, "fabric"),
            LoaderType::Forge => write!(f, "forge"),
        }
    }
}

impl FromStr for LoaderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vanilla" => Ok(LoaderType::Vanilla),
            "fabric" => Ok(LoaderType::Fabric),
            "forge" => Ok(LoaderType::Forge),
            other => Err(format!(
                "Loader must be either vanilla, fabric, or forge (got {other})"
            )),
        }
    }
}

/// Base URLs of every upstream service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub version_manifest_url: String,
    pub modrinth_api_url: String,
    pub forge_files_url: String,
    pub forge_maven_url: String,
    pub fabric_meta_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            version_manifest_url: DEFAULT_VERSION_MANIFEST_URL.to_string(),
            modrinth_api_url: DEFAULT_MODRINTH_API_URL.to_string(),
            forge_files_url: DEFAULT_FORGE_FILES_URL.to_string(),
            forge_maven_url: DEFAULT_FORGE_MAVEN_URL.to_string(),
            fabric_meta_url: DEFAULT_FABRIC_META_URL.to_string(),
        }
    }
}

/// Fully resolved, immutable settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallConfig {
    /// Requested Minecraft version, possibly an alias (`latest`, `latest-snapshot`).
    pub mc_version: String,
    pub loader: LoaderType,
    /// Requested Forge version, possibly an alias (`recommended`, `latest`).
    pub forge_version: String,
    pub overwrite: bool,
    pub modpack: Option<String>,
    pub mods: Vec<String>,
    pub install_dir: PathBuf,
    pub java: String,
    /// Parallel downloads for named mods. 1 keeps them strictly sequential.
    pub jobs: usize,
    pub endpoints: Endpoints,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            mc_version: "latest".to_string(),
            loader: LoaderType::Vanilla,
            forge_version: "recommended".to_string(),
            overwrite: false,
            modpack: None,
            mods: Vec::new(),
            install_dir: PathBuf::from("."),
            java: "java".to_string(),
            jobs: 1,
            endpoints: Endpoints::default(),
        }
    }
}

/// One source of settings. Every key is optional; later layers win.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConfigLayer {
    pub version: Option<String>,
    pub loader: Option<LoaderType>,
    pub forge_version: Option<String>,
    pub overwrite: Option<bool>,
    pub modrinth_modpack: Option<String>,
    pub modrinth_mod: Option<Vec<String>>,
    pub version_manifest_url: Option<String>,
    pub modrinth_api_url: Option<String>,
    pub forge_files_url: Option<String>,
    pub forge_maven_url: Option<String>,
    pub fabric_meta_url: Option<String>,
    pub dir: Option<PathBuf>,
    pub java: Option<String>,
    pub jobs: Option<usize>,
}

impl ConfigLayer {
    /// Read a JSON config file.
    pub fn load(path: &Path) -> InstallResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| InstallError::io(path, e))?;
        serde_json::from_str(&raw).map_err(|source| InstallError::Json {
            location: path.display().to_string(),
            source,
        })
    }

    /// Overlay `over` on top of `self`.
    pub fn merge(self, over: ConfigLayer) -> ConfigLayer {
        ConfigLayer {
            version: over.version.or(self.version),
            loader: over.loader.or(self.loader),
            forge_version: over.forge_version.or(self.forge_version),
            overwrite: over.overwrite.or(self.overwrite),
            modrinth_modpack: over.modrinth_modpack.or(self.modrinth_modpack),
            modrinth_mod: over.modrinth_mod.or(self.modrinth_mod),
            version_manifest_url: over.version_manifest_url.or(self.version_manifest_url),
            modrinth_api_url: over.modrinth_api_url.or(self.modrinth_api_url),
            forge_files_url: over.forge_files_url.or(self.forge_files_url),
            forge_maven_url: over.forge_maven_url.or(self.forge_maven_url),
            fabric_meta_url: over.fabric_meta_url.or(self.fabric_meta_url),
            dir: over.dir.or(self.dir),
            java: over.java.or(self.java),
            jobs: over.jobs.or(self.jobs),
        }
    }
}

/// A config file to consider, and whether its absence is an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSource {
    pub path: PathBuf,
    pub required: bool,
}

impl ConfigSource {
    /// Home file (optional), then `$CONFIG_FILE`, then an explicit `--config`.
    pub fn discover(explicit: Option<&Path>) -> Vec<ConfigSource> {
        let mut sources = Vec::new();

        if let Some(home) = dirs::home_dir() {
            sources.push(ConfigSource {
                path: home.join(HOME_CONFIG_FILE),
                required: false,
            });
        }

        if let Some(env_path) = std::env::var_os(CONFIG_FILE_ENV) {
            sources.push(ConfigSource {
                path: PathBuf::from(env_path),
                required: true,
            });
        }

        if let Some(path) = explicit {
            sources.push(ConfigSource {
                path: path.to_path_buf(),
                required: true,
            });
        }

        sources
    }
}

/// Fold every existing source into one layer, in order.
pub fn load_layers(sources: &[ConfigSource]) -> InstallResult<ConfigLayer> {
    let mut merged = ConfigLayer::default();

    for source in sources {
        if !source.required && !source.path.exists() {
            continue;
        }
        debug!("Loading config file {}", source.path.display());
        merged = merged.merge(ConfigLayer::load(&source.path)?);
    }

    Ok(merged)
}

impl InstallConfig {
    /// Apply defaults under `layer` and validate.
    pub fn from_layer(layer: ConfigLayer) -> InstallResult<Self> {
        let defaults = InstallConfig::default();
        let endpoints = Endpoints::default();

        let jobs = layer.jobs.unwrap_or(defaults.jobs);
        if jobs == 0 {
            return Err(InstallError::Config("jobs must be at least 1".into()));
        }

        let config = InstallConfig {
            mc_version: layer.version.unwrap_or(defaults.mc_version),
            loader: layer.loader.unwrap_or(defaults.loader),
            forge_version: layer.forge_version.unwrap_or(defaults.forge_version),
            overwrite: layer.overwrite.unwrap_or(defaults.overwrite),
            modpack: layer.modrinth_modpack.filter(|slug| !slug.trim().is_empty()),
            mods: layer
                .modrinth_mod
                .unwrap_or_default()
                .into_iter()
                .filter(|slug| !slug.trim().is_empty())
                .collect(),
            install_dir: layer.dir.unwrap_or(defaults.install_dir),
            java: layer.java.unwrap_or(defaults.java),
            jobs,
            endpoints: Endpoints {
                version_manifest_url: layer
                    .version_manifest_url
                    .unwrap_or(endpoints.version_manifest_url),
                modrinth_api_url: layer.modrinth_api_url.unwrap_or(endpoints.modrinth_api_url),
                forge_files_url: layer.forge_files_url.unwrap_or(endpoints.forge_files_url),
                forge_maven_url: layer.forge_maven_url.unwrap_or(endpoints.forge_maven_url),
                fabric_meta_url: layer.fabric_meta_url.unwrap_or(endpoints.fabric_meta_url),
            },
        };

        if config.mc_version.trim().is_empty() {
            return Err(InstallError::Config("version must not be empty".into()));
        }

        Ok(config)
    }

    /// `mods/` inside the install directory.
    pub fn mods_dir(&self) -> PathBuf {
        self.install_dir.join("mods")
    }
}
