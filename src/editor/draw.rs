use bevy::color::Srgba;
use bevy::prelude::*;

use super::design::{LevelDesign, Wall};
use super::message::MessageDisplay;
use super::plugin::{EditorLogicSet, EditorSettings};
use crate::core::coords::ScreenSpace;

const BUCKET_COLOR: Color = Color::srgb(0.0, 0.0, 1.0);
const SPOUT_COLOR: Color = Color::srgb(1.0, 0.0, 0.0);
const STATUS_COLOR: Color = Color::srgb(1.0, 0.0, 0.0);
const SPOUT_RADIUS: f32 = 10.0;
const STATUS_FONT_SIZE: f32 = 24.0;

/// Sprite standing in for one committed wall; index into `LevelDesign::walls`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallVisual(pub usize);

#[derive(Component)]
pub struct StatusText;

/// Renders the design: walls as sprites, everything transient as gizmos.
pub struct EditorViewPlugin;

impl Plugin for EditorViewPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_status_text).add_systems(
            Update,
            (
                sync_wall_sprites.run_if(resource_changed::<LevelDesign>),
                draw_design_gizmos,
                update_status_text,
            )
                .after(EditorLogicSet),
        );
    }
}

/// Named colours the level files use; anything else is tried as a hex string.
pub fn wall_color(name: &str) -> Color {
    match name.to_ascii_lowercase().as_str() {
        "black" => Color::BLACK,
        "white" => Color::WHITE,
        "red" => Color::srgb(1.0, 0.0, 0.0),
        "green" => Color::srgb(0.0, 1.0, 0.0),
        "blue" => Color::srgb(0.0, 0.0, 1.0),
        "gray" | "grey" => Color::srgb(0.5, 0.5, 0.5),
        other => Srgba::hex(other).map(Color::from).unwrap_or(Color::BLACK),
    }
}

fn wall_sprite(wall: &Wall, space: ScreenSpace) -> (Sprite, Transform) {
    let a = space.screen_to_world(wall.start.as_vec2());
    let b = space.screen_to_world(wall.end.as_vec2());
    let delta = b - a;
    let thickness = wall.line_width as f32;
    let sprite = Sprite::from_color(
        wall_color(&wall.color),
        Vec2::new(delta.length().max(1.0), thickness),
    );
    let transform = Transform::from_translation(((a + b) * 0.5).extend(0.0))
        .with_rotation(Quat::from_rotation_z(delta.y.atan2(delta.x)));
    (sprite, transform)
}

fn sync_wall_sprites(
    mut commands: Commands,
    design: Res<LevelDesign>,
    settings: Res<EditorSettings>,
    visuals: Query<(Entity, &WallVisual)>,
) {
    let walls = design.walls();
    let mut have = vec![false; walls.len()];
    for (entity, visual) in visuals.iter() {
        if visual.0 < walls.len() {
            have[visual.0] = true;
        } else {
            commands.entity(entity).despawn();
        }
    }
    let space = settings.space();
    for (index, wall) in walls.iter().enumerate().filter(|(i, _)| !have[*i]) {
        let (sprite, transform) = wall_sprite(wall, space);
        commands.spawn((Name::new(format!("Wall{index}")), WallVisual(index), sprite, transform));
    }
}

fn draw_design_gizmos(mut gizmos: Gizmos, design: Res<LevelDesign>, settings: Res<EditorSettings>) {
    let space = settings.space();
    if let Some(wall) = design.wall_in_progress() {
        gizmos.line_2d(
            space.screen_to_world(wall.start.as_vec2()),
            space.screen_to_world(wall.end.as_vec2()),
            wall_color(&wall.color),
        );
    }
    for bucket in design.buckets() {
        gizmos.rect_2d(
            Isometry2d::from_translation(space.screen_to_world(bucket.center.as_vec2())),
            Vec2::new(bucket.width as f32, bucket.height as f32),
            BUCKET_COLOR,
        );
    }
    if let Some(spout) = design.spout() {
        gizmos.circle_2d(
            Isometry2d::from_translation(space.screen_to_world(spout.as_vec2())),
            SPOUT_RADIUS,
            SPOUT_COLOR,
        );
    }
}

fn spawn_status_text(mut commands: Commands) {
    commands.spawn((
        Name::new("EditorStatus"),
        StatusText,
        Text::new(""),
        TextFont::from_font_size(STATUS_FONT_SIZE),
        TextColor(STATUS_COLOR),
        TextLayout::new_with_justify(JustifyText::Center),
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            top: Val::Percent(50.0),
            justify_content: JustifyContent::Center,
            ..default()
        },
    ));
}

fn update_status_text(messages: Res<MessageDisplay>, mut texts: Query<&mut Text, With<StatusText>>) {
    let want = messages.current().unwrap_or("");
    for mut text in texts.iter_mut() {
        if text.0 != want {
            text.0 = want.to_string();
        }
    }
}
