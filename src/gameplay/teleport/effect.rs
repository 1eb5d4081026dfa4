//! Teleporter pair: radius-triggered relocation of grains plus a cosmetic
//! wave animation. Entry and exit are stored in screen pixels; grains live in
//! physics space and are converted with the pair's [`ScreenSpace`].
use bevy::prelude::*;

use crate::core::components::PhysicsBody;
use crate::core::config::TeleporterSpec;
use crate::core::coords::ScreenSpace;

/// Seconds for one wave to grow from the exit radius to twice that.
pub const WAVE_PERIOD: f32 = 2.0;
/// Concurrent waves, staggered evenly across the period.
pub const WAVE_COUNT: usize = 3;

/// Position access the teleporter needs from a physics body.
pub trait GrainBody {
    fn position(&self) -> Vec2;
    fn set_position(&mut self, position: Vec2);
}

impl GrainBody for PhysicsBody {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }
}

/// One animated ring, screen pixels. `brightness` runs 1 -> 0 as the ring grows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveRing {
    pub center: Vec2,
    pub radius: f32,
    pub brightness: f32,
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Teleportation {
    pub entry: Vec2,
    pub exit: Vec2,
    pub entry_radius: f32,
    pub exit_radius: f32,
    pub space: ScreenSpace,
    wave_time: f32,
}

impl Teleportation {
    pub fn new(
        entry: Vec2,
        exit: Vec2,
        entry_radius: f32,
        exit_radius: f32,
        space: ScreenSpace,
    ) -> Self {
        Self {
            entry,
            exit,
            entry_radius,
            exit_radius,
            space,
            wave_time: 0.0,
        }
    }

    pub fn from_spec(spec: &TeleporterSpec, space: ScreenSpace) -> Self {
        Self::new(
            spec.entry.into(),
            spec.exit.into(),
            spec.entry_radius,
            spec.exit_radius,
            space,
        )
    }

    pub fn wave_time(&self) -> f32 {
        self.wave_time
    }

    /// Advances the animation clock. Never reset; the phase wraps in [`Self::wave_rings`].
    pub fn update(&mut self, dt: f32) {
        self.wave_time += dt;
    }

    /// Wave rings for the current phase, entry then exit for each wave.
    pub fn wave_rings(&self) -> Vec<WaveRing> {
        let spacing = WAVE_PERIOD / WAVE_COUNT as f32;
        let mut rings = Vec::with_capacity(WAVE_COUNT * 2);
        for i in 0..WAVE_COUNT {
            let offset = (self.wave_time + i as f32 * spacing).rem_euclid(WAVE_PERIOD);
            let progress = offset / WAVE_PERIOD;
            let radius = self.exit_radius + progress * self.exit_radius;
            let brightness = (1.0 - progress).max(0.0);
            for center in [self.entry, self.exit] {
                rings.push(WaveRing {
                    center,
                    radius,
                    brightness,
                });
            }
        }
        rings
    }

    /// Moves `grain` to the exit when it lies within the entry radius (inclusive).
    /// Velocity is left alone. There is no cooldown: a grain that lands inside
    /// another entry radius is moved again on the next check.
    pub fn transport<G: GrainBody + ?Sized>(&self, grain: &mut G) -> bool {
        let on_screen = self.space.to_screen(grain.position());
        if on_screen.distance(self.entry) > self.entry_radius {
            return false;
        }
        grain.set_position(self.space.to_physics(self.exit));
        true
    }
}
