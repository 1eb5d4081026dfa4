pub mod config;

pub use config::{
    BucketSpec, EditorConfig, GameConfig, HudConfig, LevelConfig, PhysicsConfig, PointDef,
    SoundConfig, TeleporterSpec, WindowConfig,
};
