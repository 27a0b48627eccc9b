// ─── Command Line ───
// Flags map one-to-one onto config file keys; anything left unset falls
// through to the file layers.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::core::config::{ConfigLayer, LoaderType};

#[derive(Parser, Debug)]
#[command(
    name = "mc-quick",
    about = "Quickly install and start Minecraft servers (vanilla, Fabric, Forge) with Modrinth content"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub options: Options,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Download and install the server, its loader and any Modrinth content
    Install,
    /// Run a previously installed server in the foreground
    Start,
}

#[derive(Args, Debug, Default)]
pub struct Options {
    /// Minecraft version, or `latest` / `latest-snapshot`
    #[arg(short = 'v', long = "version", global = true)]
    pub version: Option<String>,

    /// Server loader: vanilla, fabric or forge
    #[arg(short, long, global = true)]
    pub loader: Option<LoaderType>,

    /// Forge version, or `recommended` / `latest`
    #[arg(long, global = true)]
    pub forge_version: Option<String>,

    /// Refetch artifacts even when a verified local copy exists
    #[arg(short = 'O', long, global = true)]
    pub overwrite: bool,

    /// Modrinth modpack slug
    #[arg(short = 'M', long, global = true)]
    pub modrinth_modpack: Option<String>,

    /// Modrinth mod slug (repeatable)
    #[arg(short = 'm', long, global = true)]
    pub modrinth_mod: Vec<String>,

    #[arg(long, global = true)]
    pub version_manifest_url: Option<String>,

    #[arg(long, global = true)]
    pub modrinth_api_url: Option<String>,

    #[arg(long, global = true)]
    pub forge_files_url: Option<String>,

    #[arg(long, global = true)]
    pub forge_maven_url: Option<String>,

    #[arg(long, global = true)]
    pub fabric_meta_url: Option<String>,

    /// Server directory
    #[arg(short, long, global = true)]
    pub dir: Option<PathBuf>,

    /// Java executable used for installers and `start`
    #[arg(long, global = true)]
    pub java: Option<String>,

    /// Mods downloaded concurrently
    #[arg(short, long, global = true)]
    pub jobs: Option<usize>,

    /// Extra JSON config file, applied above $CONFIG_FILE
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Debug logging (ignored when RUST_LOG is set)
    #[arg(long, global = true)]
    pub verbose: bool,
}

impl Options {
    /// The flag layer: only what was actually passed.
    pub fn to_layer(&self) -> ConfigLayer {
        ConfigLayer {
            version: self.version.clone(),
            loader: self.loader,
            forge_version: self.forge_version.clone(),
            overwrite: self.overwrite.then_some(true),
            modrinth_modpack: self.modrinth_modpack.clone(),
            modrinth_mod: (!self.modrinth_mod.is_empty()).then(|| self.modrinth_mod.clone()),
            version_manifest_url: self.version_manifest_url.clone(),
            modrinth_api_url: self.modrinth_api_url.clone(),
            forge_files_url: self.forge_files_url.clone(),
            forge_maven_url: self.forge_maven_url.clone(),
            fabric_meta_url: self.fabric_meta_url.clone(),
            dir: self.dir.clone(),
            java: self.java.clone(),
            jobs: self.jobs,
        }
    }
}
