mod extract;
mod index;
mod installer;
mod overrides;

pub use extract::{extract_archive, restrict_permissions};
pub use index::{
    EnvRequirement, FileEnv, ModpackFile, ModpackIndex, INDEX_FILE, MODPACK_EXTENSION,
    OVERRIDES_DIR, SERVER_OVERRIDES_DIR,
};
pub use installer::{ModpackInstaller, ModpackSummary};
pub use overrides::merge_overrides;
