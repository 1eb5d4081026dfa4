use bevy::prelude::*;

use super::effect::Teleportation;
use crate::core::components::{Grain, PhysicsBody};
use crate::core::config::GameConfig;
use crate::core::system::TransportSet;

const ENTRY_COLOR: Color = Color::srgb(0.0, 1.0, 0.0);
const EXIT_COLOR: Color = Color::srgb(0.0, 0.0, 1.0);
const RING_LINE_WIDTH: f32 = 2.0;

/// Gizmo group for teleporter rings, drawn with their own line width.
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct TeleportGizmos;

pub fn teleport_gizmo_config() -> GizmoConfig {
    GizmoConfig {
        line: GizmoLineConfig {
            width: RING_LINE_WIDTH,
            ..default()
        },
        ..default()
    }
}

/// Spawns the configured teleporter pairs; animation and transport tick in `FixedUpdate`.
pub struct TeleportPlugin;

impl Plugin for TeleportPlugin {
    fn build(&self, app: &mut App) {
        app.insert_gizmo_config(TeleportGizmos, teleport_gizmo_config())
            .add_systems(Startup, spawn_configured_teleporters)
            .add_systems(
                FixedUpdate,
                (advance_teleporters, transport_grains.in_set(TransportSet)),
            )
            .add_systems(Update, draw_teleporters);
    }
}

fn spawn_configured_teleporters(mut commands: Commands, cfg: Res<GameConfig>) {
    let space = cfg.screen_space();
    for (i, spec) in cfg.level.teleporters.iter().enumerate() {
        commands.spawn((
            Name::new(format!("Teleporter{i}")),
            Teleportation::from_spec(spec, space),
        ));
    }
    info!(
        target: "teleport",
        "spawned {} teleporter pair(s)",
        cfg.level.teleporters.len()
    );
}

pub fn advance_teleporters(time: Res<Time>, mut teleporters: Query<&mut Teleportation>) {
    let dt = time.delta_secs();
    for mut tp in teleporters.iter_mut() {
        tp.update(dt);
    }
}

pub fn transport_grains(
    teleporters: Query<&Teleportation>,
    mut grains: Query<(Entity, &mut PhysicsBody), With<Grain>>,
) {
    for tp in teleporters.iter() {
        for (entity, mut body) in grains.iter_mut() {
            if tp.transport(&mut *body) {
                debug!(target: "teleport", "grain {entity} -> {:?}", body.position);
            }
        }
    }
}

pub fn draw_teleporters(mut gizmos: Gizmos<TeleportGizmos>, teleporters: Query<&Teleportation>) {
    for tp in teleporters.iter() {
        let space = tp.space;
        gizmos.circle_2d(
            Isometry2d::from_translation(space.screen_to_world(tp.entry)),
            tp.entry_radius,
            ENTRY_COLOR,
        );
        gizmos.circle_2d(
            Isometry2d::from_translation(space.screen_to_world(tp.exit)),
            tp.exit_radius,
            EXIT_COLOR,
        );
        for ring in tp.wave_rings() {
            gizmos.circle_2d(
                Isometry2d::from_translation(space.screen_to_world(ring.center)),
                ring.radius,
                Color::srgb(0.0, 0.0, ring.brightness),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rings_use_two_pixel_lines() {
        let config = teleport_gizmo_config();
        assert_eq!(config.line.width, 2.0);
        assert!(config.enabled);
    }
}
