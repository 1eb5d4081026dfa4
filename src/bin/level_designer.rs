use bevy::prelude::*;

use sugar_pop::app::{log_config_report, ConfigReport};
use sugar_pop::editor::{EditorSettings, EditorViewPlugin, LevelDesignerPlugin};
use sugar_pop::rendering::CameraPlugin;

fn main() {
    let (cfg, report) = ConfigReport::load(["assets/config/game.ron"]);
    let settings = EditorSettings::from_config(&cfg);

    App::new()
        .insert_resource(ClearColor(Color::WHITE))
        .insert_resource(settings)
        .insert_resource(report)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: cfg.editor.title.clone(),
                resolution: (cfg.editor.width, cfg.editor.height).into(),
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .add_plugins((CameraPlugin, LevelDesignerPlugin, EditorViewPlugin))
        .add_systems(Startup, log_config_report)
        .run();
}
