//! Minimal grain playground: a spout, gravity and buckets. No wall collisions.
use bevy::prelude::*;
use rand::Rng;

use crate::audio::{GameSounds, PlaySound};
use crate::core::components::{Bucket, Grain, PhysicsBody};
use crate::core::config::{BucketSpec, GameConfig};
use crate::core::coords::ScreenSpace;
use crate::core::system::{ScoringSet, SimulationSet};
use crate::rendering::hud::HudStatus;

const GRAIN_SIZE: f32 = 4.0;
const GRAIN_COLOR: Color = Color::srgb(1.0, 1.0, 1.0);
/// Horizontal jitter (m/s) given to freshly poured grains.
const SPOUT_JITTER: f32 = 0.5;
/// Metres a grain may leave the window before it is dropped.
const LOST_MARGIN: f32 = 1.0;

#[derive(Resource, Debug)]
pub struct Spout {
    pub position: Vec2,
    pub total: u32,
    pub emitted: u32,
    timer: Option<Timer>,
}

impl Spout {
    /// `rate` is grains per second; a non-positive rate leaves the spout closed.
    pub fn new(position: Vec2, total: u32, rate: f32) -> Self {
        let timer = (rate > 0.0).then(|| Timer::from_seconds(1.0 / rate, TimerMode::Repeating));
        Self {
            position,
            total,
            emitted: 0,
            timer,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.total.saturating_sub(self.emitted)
    }

    /// Advances the pour clock and returns how many grains to release now.
    pub fn advance(&mut self, dt: std::time::Duration) -> u32 {
        let Some(timer) = self.timer.as_mut() else {
            return 0;
        };
        timer.tick(dt);
        let due = timer.times_finished_this_tick().min(self.remaining());
        self.emitted += due;
        due
    }
}

/// Set once every bucket is full.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LevelProgress {
    pub complete: bool,
}

/// Bucket from its config entry. Config uses screen pixels with the centre at
/// (x, y); the component stores the top edge measured up from the bottom.
pub fn bucket_from_spec(spec: &BucketSpec, space: ScreenSpace) -> Bucket {
    Bucket {
        x: spec.x,
        y: space.height - (spec.y - spec.height * 0.5),
        width: spec.width,
        height: spec.height,
        needed: spec.needed_sugar,
        count: 0,
    }
}

/// `pixel` is in bottom-up pixels (physics position times scale). Edges count.
pub fn catches(bucket: &Bucket, pixel: Vec2) -> bool {
    let half = bucket.width * 0.5;
    (bucket.x - half..=bucket.x + half).contains(&pixel.x)
        && (bucket.y - bucket.height..=bucket.y).contains(&pixel.y)
}

pub struct SandboxPlugin;

impl Plugin for SandboxPlugin {
    fn build(&self, app: &mut App) {
        let cfg = app
            .world()
            .get_resource::<GameConfig>()
            .cloned()
            .unwrap_or_default();
        let space = cfg.screen_space();
        app.insert_resource(space)
            .insert_resource(Spout::new(
                space.to_physics(cfg.level.spout.into()),
                cfg.level.grains,
                cfg.physics.spout_rate,
            ))
            .init_resource::<LevelProgress>()
            .init_resource::<HudStatus>()
            .add_event::<PlaySound>()
            .add_systems(Startup, (spawn_buckets, start_level))
            .add_systems(
                FixedUpdate,
                (
                    (pour_grains, integrate_grains).chain().in_set(SimulationSet),
                    (catch_grains, drop_lost_grains).chain().in_set(ScoringSet),
                ),
            )
            .add_systems(Update, (sandbox_controls, sync_grain_sprites));
    }
}

fn spawn_buckets(mut commands: Commands, cfg: Res<GameConfig>, space: Res<ScreenSpace>) {
    for (i, spec) in cfg.level.buckets.iter().enumerate() {
        let bucket = bucket_from_spec(spec, *space);
        let center = space.screen_to_world(Vec2::new(spec.x, spec.y));
        commands.spawn((
            Name::new(format!("Bucket{i}")),
            Sprite::from_color(Color::srgba(0.75, 0.0, 1.0, 0.35), Vec2::new(bucket.width, bucket.height)),
            Transform::from_translation(center.extend(0.0)),
            bucket,
        ));
    }
}

fn start_level(
    cfg: Res<GameConfig>,
    spout: Res<Spout>,
    mut status: ResMut<HudStatus>,
    mut sounds: EventWriter<PlaySound>,
) {
    status.level = cfg.level.number as i64;
    status.level_by = cfg.level.level_by.clone();
    status.grains_left = spout.remaining() as i64;
    status.gravity = cfg.physics.gravity.abs();
    sounds.write(PlaySound::looping("level"));
    info!(
        target: "hud",
        "level {} ({} grains, {} bucket(s))",
        cfg.level.number,
        cfg.level.grains,
        cfg.level.buckets.len()
    );
}

pub fn pour_grains(
    mut commands: Commands,
    time: Res<Time>,
    mut spout: ResMut<Spout>,
    mut status: ResMut<HudStatus>,
) {
    let due = spout.advance(time.delta());
    if due == 0 {
        return;
    }
    let mut rng = rand::thread_rng();
    for _ in 0..due {
        let velocity = Vec2::new(rng.gen_range(-SPOUT_JITTER..SPOUT_JITTER), 0.0);
        commands.spawn((
            Name::new("Grain"),
            Grain,
            PhysicsBody::new(spout.position, velocity),
            Sprite::from_color(GRAIN_COLOR, Vec2::splat(GRAIN_SIZE)),
            Transform::default(),
        ));
    }
    status.grains_left = spout.remaining() as i64;
}

/// Semi-implicit Euler. `HudStatus::gravity` is the downward pull; its sign flips with G.
pub fn integrate_grains(
    time: Res<Time>,
    status: Res<HudStatus>,
    mut grains: Query<&mut PhysicsBody, With<Grain>>,
) {
    let dt = time.delta_secs();
    let accel = Vec2::new(0.0, -status.gravity);
    for mut body in grains.iter_mut() {
        body.velocity += accel * dt;
        let step = body.velocity * dt;
        body.position += step;
    }
}

pub fn catch_grains(
    mut commands: Commands,
    space: Res<ScreenSpace>,
    mut progress: ResMut<LevelProgress>,
    grains: Query<(Entity, &PhysicsBody), With<Grain>>,
    mut buckets: Query<&mut Bucket>,
    mut sounds: EventWriter<PlaySound>,
) {
    for (entity, body) in grains.iter() {
        let pixel = body.position * space.scale;
        let Some(mut bucket) = buckets.iter_mut().find(|b| catches(b, pixel)) else {
            continue;
        };
        commands.entity(entity).despawn();
        bucket.count += 1;
        sounds.write(PlaySound::once("bucket"));
        if bucket.count == bucket.needed as i64 {
            sounds.write(PlaySound::once("bonus"));
        }
    }
    if !progress.complete && !buckets.is_empty() && buckets.iter().all(|b| b.is_full()) {
        progress.complete = true;
        sounds.write(PlaySound::once("level_complete"));
        info!(target: "hud", "level complete");
    }
}

fn drop_lost_grains(
    mut commands: Commands,
    space: Res<ScreenSpace>,
    grains: Query<(Entity, &PhysicsBody), With<Grain>>,
) {
    let max = Vec2::new(space.width, space.height) / space.scale + LOST_MARGIN;
    for (entity, body) in grains.iter() {
        let p = body.position;
        if p.x < -LOST_MARGIN || p.y < -LOST_MARGIN || p.x > max.x || p.y > max.y {
            commands.entity(entity).despawn();
        }
    }
}

fn sandbox_controls(
    keys: Res<ButtonInput<KeyCode>>,
    mut status: ResMut<HudStatus>,
    mut sounds: ResMut<GameSounds>,
    mut exit: EventWriter<AppExit>,
) {
    if keys.just_pressed(KeyCode::KeyG) {
        status.gravity = -status.gravity;
        info!(target: "hud", "gravity flipped ({})", status.gravity);
    }
    if keys.just_pressed(KeyCode::KeyM) {
        if sounds.is_mute() {
            sounds.unmute_all();
        } else {
            sounds.mute_all();
        }
        info!(target: "audio", "muted={}", sounds.is_mute());
    }
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}

fn sync_grain_sprites(
    space: Res<ScreenSpace>,
    mut grains: Query<(&PhysicsBody, &mut Transform), With<Grain>>,
) {
    for (body, mut transform) in grains.iter_mut() {
        let world = space.screen_to_world(space.to_screen(body.position));
        transform.translation = world.extend(1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn spout_pours_at_rate_until_empty() {
        let mut spout = Spout::new(Vec2::ZERO, 5, 4.0);
        assert_eq!(spout.advance(Duration::from_millis(500)), 2);
        assert_eq!(spout.remaining(), 3);
        assert_eq!(spout.advance(Duration::from_secs(10)), 3);
        assert_eq!(spout.advance(Duration::from_secs(1)), 0);
    }

    #[test]
    fn closed_spout_never_pours() {
        let mut spout = Spout::new(Vec2::ZERO, 5, 0.0);
        assert_eq!(spout.advance(Duration::from_secs(5)), 0);
        assert_eq!(spout.remaining(), 5);
    }

    #[test]
    fn bucket_spec_flips_to_bottom_up_top_edge() {
        let space = ScreenSpace::new(30.0, 1024.0, 800.0);
        let spec = BucketSpec {
            x: 700.0,
            y: 650.0,
            width: 80.0,
            height: 60.0,
            needed_sugar: 10,
        };
        let bucket = bucket_from_spec(&spec, space);
        assert_eq!(bucket.y, 180.0);
        assert!(catches(&bucket, Vec2::new(700.0, 150.0)));
        assert!(catches(&bucket, Vec2::new(740.0, 120.0)));
        assert!(!catches(&bucket, Vec2::new(741.0, 150.0)));
        assert!(!catches(&bucket, Vec2::new(700.0, 181.0)));
    }
}
