// ─── mc-quick Core ───
// Installs and starts Minecraft servers from public metadata.
//
// Architecture:
//   core/
//     config       Layered settings (file, env, flags)
//     version/     Mojang manifest, version metadata, loader promotions
//     downloader/  Checksum-gated artifact acquisition
//     modrinth     Primary-file lookup for project slugs
//     modpack/     .mrpack fetch, extract, mods, overrides
//     mods         Named mods into mods/
//     loaders/     Vanilla, Fabric, Forge strategies + orchestration
//     launch       Foreground server start
//     process      External command seam

pub mod config;
pub mod downloader;
pub mod error;
pub mod http;
pub mod launch;
pub mod loaders;
pub mod modpack;
pub mod modrinth;
pub mod mods;
pub mod paths;
pub mod process;
pub mod version;

#[cfg(test)]
pub mod test_support;
