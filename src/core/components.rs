use bevy::prelude::*;

/// Marker for a sugar grain entity.
#[derive(Component)]
pub struct Grain;

/// Physics-space state of a body: metres, origin bottom-left, y up.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct PhysicsBody {
    pub position: Vec2,
    pub velocity: Vec2,
}

impl PhysicsBody {
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Self { position, velocity }
    }
}

/// A target container. `x` is the horizontal centre in pixels, `y` the top edge
/// in pixels measured up from the bottom of the window.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Bucket {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub needed: u32,
    pub count: i64,
}

impl Bucket {
    pub fn is_full(&self) -> bool {
        self.count >= self.needed as i64
    }
}
