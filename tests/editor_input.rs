use bevy::prelude::*;
use bevy::time::Real;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use sugar_pop::core::level::{LevelFile, DESIGNER_TAG};
use sugar_pop::editor::{
    CursorPosition, EditState, EditorSettings, LevelDesign, LevelDesignerPlugin, MessageDisplay,
};

fn editor_app(output_path: PathBuf) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(ButtonInput::<KeyCode>::default());
    app.insert_resource(ButtonInput::<MouseButton>::default());
    app.insert_resource(EditorSettings {
        output_path,
        width: 800.0,
        height: 600.0,
    });
    app.add_plugins(LevelDesignerPlugin);
    app
}

fn point_at(app: &mut App, x: f32, y: f32) {
    app.world_mut().resource_mut::<CursorPosition>().0 = Some(Vec2::new(x, y));
}

/// Runs one frame, then clears edge-triggered input the way the input plugin would.
fn frame(app: &mut App) {
    app.update();
    app.world_mut().resource_mut::<ButtonInput<KeyCode>>().clear();
    app.world_mut().resource_mut::<ButtonInput<MouseButton>>().clear();
}

fn tap(app: &mut App, key: KeyCode) {
    app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(key);
    frame(app);
    app.world_mut().resource_mut::<ButtonInput<KeyCode>>().release(key);
    frame(app);
}

fn status(app: &App) -> Option<String> {
    app.world().resource::<MessageDisplay>().current().map(str::to_string)
}

#[test]
fn drag_draws_a_wall() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = editor_app(dir.path().join("level.json"));

    point_at(&mut app, 10.0, 20.0);
    app.world_mut().resource_mut::<ButtonInput<MouseButton>>().press(MouseButton::Left);
    frame(&mut app);
    point_at(&mut app, 40.0, 60.0);
    frame(&mut app);
    {
        let design = app.world().resource::<LevelDesign>();
        assert_eq!(
            design.state(),
            EditState::DrawingWall { start: IVec2::new(10, 20), end: IVec2::new(40, 60) }
        );
        assert!(design.walls().is_empty());
    }

    app.world_mut().resource_mut::<ButtonInput<MouseButton>>().release(MouseButton::Left);
    frame(&mut app);
    let design = app.world().resource::<LevelDesign>();
    assert_eq!(design.state(), EditState::Idle);
    assert_eq!(design.walls().len(), 1);
    assert_eq!(design.walls()[0].end, IVec2::new(40, 60));
    assert_eq!(status(&app).as_deref(), Some("Wall added"));
}

#[test]
fn click_without_motion_commits_zero_length_wall() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = editor_app(dir.path().join("level.json"));
    point_at(&mut app, 100.0, 100.0);
    app.world_mut().resource_mut::<ButtonInput<MouseButton>>().press(MouseButton::Left);
    frame(&mut app);
    app.world_mut().resource_mut::<ButtonInput<MouseButton>>().release(MouseButton::Left);
    frame(&mut app);
    let walls = app.world().resource::<LevelDesign>().walls().to_vec();
    assert_eq!(walls.len(), 1);
    assert_eq!(walls[0].start, walls[0].end);
}

#[test]
fn keys_place_bucket_and_spout_at_cursor() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = editor_app(dir.path().join("level.json"));
    point_at(&mut app, 300.0, 400.0);
    tap(&mut app, KeyCode::KeyB);
    assert_eq!(status(&app).as_deref(), Some("Bucket placed"));
    point_at(&mut app, 50.0, 60.0);
    tap(&mut app, KeyCode::KeyS);
    assert_eq!(status(&app).as_deref(), Some("Spout set"));

    let design = app.world().resource::<LevelDesign>();
    assert_eq!(design.buckets()[0].center, IVec2::new(300, 400));
    assert_eq!(design.spout(), Some(IVec2::new(50, 60)));
}

#[test]
fn clear_resets_geometry() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = editor_app(dir.path().join("level.json"));
    point_at(&mut app, 300.0, 400.0);
    tap(&mut app, KeyCode::KeyB);
    tap(&mut app, KeyCode::KeyS);
    tap(&mut app, KeyCode::KeyC);
    let design = app.world().resource::<LevelDesign>();
    assert!(design.buckets().is_empty());
    assert_eq!(design.spout(), None);
    assert_eq!(status(&app).as_deref(), Some("Level cleared"));
}

#[test]
fn enter_saves_current_geometry() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom_level.json");
    let mut app = editor_app(path.clone());

    point_at(&mut app, 0.0, 10.0);
    app.world_mut().resource_mut::<ButtonInput<MouseButton>>().press(MouseButton::Left);
    frame(&mut app);
    point_at(&mut app, 200.0, 250.0);
    frame(&mut app);
    app.world_mut().resource_mut::<ButtonInput<MouseButton>>().release(MouseButton::Left);
    frame(&mut app);
    point_at(&mut app, 300.0, 500.0);
    tap(&mut app, KeyCode::KeyB);
    point_at(&mut app, 120.0, 40.0);
    tap(&mut app, KeyCode::KeyS);
    tap(&mut app, KeyCode::Enter);

    assert_eq!(status(&app).as_deref(), Some("Level saved"));
    let saved = LevelFile::load(&path).unwrap();
    assert_eq!(saved.level_by, DESIGNER_TAG);
    assert_eq!((saved.spout_x, saved.spout_y), (120, 40));
    assert_eq!(saved.buckets.len(), 1);
    assert_eq!((saved.buckets[0].x, saved.buckets[0].y), (300, 500));
    assert_eq!((saved.buckets[0].width, saved.buckets[0].needed_sugar), (50, 10));
    assert_eq!(saved.statics.len(), 1);
    let wall = &saved.statics[0];
    assert_eq!((wall.x1, wall.y1, wall.x2, wall.y2), (0, 10, 200, 250));
    assert_eq!((wall.color.as_str(), wall.line_width), ("black", 5));
    assert_eq!((wall.friction, wall.restitution), (0.5, 0.5));
    assert_eq!(saved.number_sugar_grains, 100);
}

#[test]
fn unwritable_path_reports_save_failure() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = editor_app(dir.path().join("missing").join("level.json"));
    tap(&mut app, KeyCode::NumpadEnter);
    assert_eq!(status(&app).as_deref(), Some("Save failed"));
    assert!(app.should_exit().is_none());
}

#[test]
fn escape_requests_exit() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = editor_app(dir.path().join("level.json"));
    app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(KeyCode::Escape);
    app.update();
    assert_eq!(app.should_exit(), Some(AppExit::Success));
}

#[test]
fn keys_before_any_cursor_report_use_the_origin() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = editor_app(dir.path().join("level.json"));
    assert_eq!(app.world().resource::<CursorPosition>().0, None);
    tap(&mut app, KeyCode::KeyB);
    tap(&mut app, KeyCode::KeyS);
    let design = app.world().resource::<LevelDesign>();
    assert_eq!(design.buckets().len(), 1);
    assert_eq!(design.buckets()[0].center, IVec2::ZERO);
    assert_eq!(design.spout(), Some(IVec2::ZERO));
}

#[test]
fn status_expires_on_real_time_after_a_long_stall() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = App::new();
    app.insert_resource(ButtonInput::<KeyCode>::default());
    app.insert_resource(ButtonInput::<MouseButton>::default());
    app.insert_resource(EditorSettings {
        output_path: dir.path().join("level.json"),
        width: 800.0,
        height: 600.0,
    });
    let start = Instant::now();
    let mut real = Time::<Real>::new(start);
    real.update_with_instant(start);
    app.insert_resource(real);
    app.add_plugins(LevelDesignerPlugin);

    app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(KeyCode::KeyS);
    frame(&mut app);
    assert_eq!(status(&app).as_deref(), Some("Spout set"));

    // One 1.5 s frame; virtual time would only advance by its 250 ms cap.
    app.world_mut()
        .resource_mut::<Time<Real>>()
        .update_with_instant(start + Duration::from_millis(1500));
    frame(&mut app);
    assert_eq!(status(&app), None);
}
