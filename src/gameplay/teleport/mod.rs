pub mod effect;
pub mod systems;

pub use effect::{GrainBody, Teleportation, WaveRing, WAVE_COUNT, WAVE_PERIOD};
pub use systems::{teleport_gizmo_config, TeleportGizmos, TeleportPlugin};
