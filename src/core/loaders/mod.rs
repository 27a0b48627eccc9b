pub mod context;
pub mod fabric;
pub mod forge;
pub mod installer;
pub mod vanilla;

pub use context::{InstallContext, ResolvedVersion};
pub use installer::{install_server, resolve_version, Installer, LoaderStrategy};
