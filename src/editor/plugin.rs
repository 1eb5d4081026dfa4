use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use std::path::PathBuf;

use super::design::{EditState, EditorAction, EditorEffect, LevelDesign};
use super::message::MessageDisplay;
use crate::core::config::GameConfig;
use crate::core::coords::ScreenSpace;

/// Last known cursor position in window pixels (top-left origin).
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct CursorPosition(pub Option<Vec2>);

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct EditorSettings {
    pub output_path: PathBuf,
    pub width: f32,
    pub height: f32,
}

impl EditorSettings {
    pub fn from_config(cfg: &GameConfig) -> Self {
        Self {
            output_path: PathBuf::from(&cfg.editor.output_path),
            width: cfg.editor.width,
            height: cfg.editor.height,
        }
    }

    /// Window pixels map 1:1; only the origin moves.
    pub fn space(&self) -> ScreenSpace {
        ScreenSpace::new(1.0, self.width, self.height)
    }
}

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct EditorLogicSet;

/// Editing session: input mapping, state machine, save, status messages.
/// Drawing lives in [`super::draw::EditorViewPlugin`].
pub struct LevelDesignerPlugin;

impl Plugin for LevelDesignerPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<EditorSettings>() {
            let settings = app
                .world()
                .get_resource::<GameConfig>()
                .map(EditorSettings::from_config)
                .unwrap_or_else(|| EditorSettings::from_config(&GameConfig::default()));
            app.insert_resource(settings);
        }
        app.init_resource::<LevelDesign>()
            .init_resource::<MessageDisplay>()
            .init_resource::<CursorPosition>()
            .add_event::<EditorAction>()
            .add_systems(
                Update,
                (
                    track_cursor,
                    read_editor_input,
                    apply_editor_actions,
                    expire_messages,
                )
                    .chain()
                    .in_set(EditorLogicSet),
            );
    }
}

fn track_cursor(windows: Query<&Window, With<PrimaryWindow>>, mut cursor: ResMut<CursorPosition>) {
    let Ok(window) = windows.single() else {
        return;
    };
    if let Some(p) = window.cursor_position() {
        if cursor.0 != Some(p) {
            cursor.0 = Some(p);
        }
    }
}

/// Maps keyboard and mouse state to [`EditorAction`]s.
pub fn read_editor_input(
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    cursor: Res<CursorPosition>,
    design: Res<LevelDesign>,
    mut actions: EventWriter<EditorAction>,
) {
    if keys.just_pressed(KeyCode::Escape) {
        actions.write(EditorAction::Quit);
        return;
    }
    let at = cursor.0.map(|p| p.round().as_ivec2());

    if let Some(p) = at {
        if mouse.just_pressed(MouseButton::Left) {
            actions.write(EditorAction::PressPointer(p));
        } else if let EditState::DrawingWall { end, .. } = design.state() {
            if mouse.pressed(MouseButton::Left) && end != p {
                actions.write(EditorAction::MovePointer(p));
            }
        }
    }
    if mouse.just_released(MouseButton::Left) {
        actions.write(EditorAction::ReleasePointer);
    }

    // Before the window reports a cursor, keyboard placements land at the origin.
    let key_at = at.unwrap_or(IVec2::ZERO);
    if keys.just_pressed(KeyCode::KeyB) {
        actions.write(EditorAction::PlaceBucket(key_at));
    }
    if keys.just_pressed(KeyCode::KeyS) {
        actions.write(EditorAction::SetSpout(key_at));
    }
    if keys.any_just_pressed([KeyCode::Enter, KeyCode::NumpadEnter]) {
        actions.write(EditorAction::Save);
    }
    if keys.just_pressed(KeyCode::KeyC) {
        actions.write(EditorAction::Clear);
    }
}

pub fn apply_editor_actions(
    mut actions: EventReader<EditorAction>,
    mut design: ResMut<LevelDesign>,
    mut messages: ResMut<MessageDisplay>,
    settings: Res<EditorSettings>,
    time: Res<Time<Real>>,
    mut exit: EventWriter<AppExit>,
) {
    let now_ms = time.elapsed().as_millis() as u64;
    for action in actions.read() {
        match design.apply(*action) {
            EditorEffect::None => {}
            EditorEffect::Status { text, seconds } => {
                info!(
                    target: "editor",
                    "{text}: walls={} buckets={} spout={:?}",
                    design.walls().len(),
                    design.buckets().len(),
                    design.spout()
                );
                messages.show(text, seconds, now_ms);
            }
            EditorEffect::SaveRequested => {
                let level = design.to_level_file();
                match level.save(&settings.output_path) {
                    Ok(()) => {
                        info!(
                            target: "editor",
                            "saved {} (walls={} buckets={})",
                            settings.output_path.display(),
                            level.statics.len(),
                            level.buckets.len()
                        );
                        messages.show("Level saved", 2.0, now_ms);
                    }
                    Err(e) => {
                        error!(target: "editor", "save failed: {e:#}");
                        messages.show("Save failed", 2.0, now_ms);
                    }
                }
            }
            EditorEffect::Quit => {
                info!(target: "editor", "quit requested");
                exit.write(AppExit::Success);
            }
        }
    }
}

/// Real time: virtual time would clamp a stalled frame to `max_delta`.
fn expire_messages(time: Res<Time<Real>>, mut messages: ResMut<MessageDisplay>) {
    let now_ms = time.elapsed().as_millis() as u64;
    if messages.current().is_some() {
        messages.update(now_ms);
    }
}
