pub mod sandbox;
pub mod teleport;

pub use sandbox::{bucket_from_spec, catches, LevelProgress, SandboxPlugin, Spout};
pub use teleport::TeleportPlugin;
