pub mod app;
pub mod audio;
pub mod core;
pub mod editor;
pub mod gameplay;
pub mod rendering;

// Curated re-exports
pub use app::game::GamePlugin;
pub use core::config::GameConfig;
pub use editor::{EditorViewPlugin, LevelDesignerPlugin};
