//! Physics space (metres, origin bottom-left, y up) vs screen space
//! (pixels, origin top-left, y down) vs Bevy world space (pixels, origin at
//! the window centre, y up).
use bevy::prelude::*;

/// Physics position -> screen pixels.
#[inline]
pub fn to_screen(p: Vec2, scale: f32, height: f32) -> Vec2 {
    Vec2::new(p.x * scale, height - p.y * scale)
}

/// Screen pixels -> physics position. Inverse of [`to_screen`].
#[inline]
pub fn to_physics(s: Vec2, scale: f32, height: f32) -> Vec2 {
    Vec2::new(s.x / scale, (height - s.y) / scale)
}

/// Scale and window extent shared by every consumer that converts between spaces.
#[derive(Debug, Clone, Copy, PartialEq, Resource)]
pub struct ScreenSpace {
    pub scale: f32,
    pub width: f32,
    pub height: f32,
}

impl ScreenSpace {
    pub fn new(scale: f32, width: f32, height: f32) -> Self {
        Self { scale, width, height }
    }

    pub fn to_screen(&self, p: Vec2) -> Vec2 {
        to_screen(p, self.scale, self.height)
    }

    pub fn to_physics(&self, s: Vec2) -> Vec2 {
        to_physics(s, self.scale, self.height)
    }

    /// Screen pixels -> world coordinates of a default `Camera2d`.
    pub fn screen_to_world(&self, s: Vec2) -> Vec2 {
        Vec2::new(s.x - self.width * 0.5, self.height * 0.5 - s.y)
    }
}
