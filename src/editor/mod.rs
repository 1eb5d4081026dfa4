//! Standalone level designer: draw walls, place buckets and the spout, save JSON.
pub mod design;
pub mod draw;
pub mod message;
pub mod plugin;

pub use design::{BucketPlacement, EditState, EditorAction, EditorEffect, LevelDesign, Wall};
pub use draw::{wall_color, EditorViewPlugin, StatusText, WallVisual};
pub use message::MessageDisplay;
pub use plugin::{
    apply_editor_actions, read_editor_input, CursorPosition, EditorLogicSet, EditorSettings,
    LevelDesignerPlugin,
};
