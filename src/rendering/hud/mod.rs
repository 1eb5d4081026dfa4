pub mod layout;
pub mod systems;

pub use layout::{gravity_glyph, layout_hud, BucketReadout, HudAnchor, HudFont, HudSnapshot, HudText};
pub use systems::{draw_hud, HudFonts, HudLabel, HudPlugin, HudStatus};
