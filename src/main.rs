use bevy::prelude::*;
use clap::Parser;
use std::path::PathBuf;

use sugar_pop::app::ConfigReport;
use sugar_pop::GamePlugin;

#[derive(Parser, Debug)]
#[command(about = "Sugar Pop playground: spout, buckets, teleporters, HUD", version)]
struct Args {
    /// Base config file; `game.local.ron` next to it is layered on top when present.
    #[arg(long, default_value = "assets/config/game.ron")]
    config: PathBuf,
    /// Author credited by the HUD.
    #[arg(long)]
    level_by: Option<String>,
}

fn main() {
    let args = Args::parse();
    let local = args.config.with_file_name("game.local.ron");
    let mut layers = vec![args.config.clone()];
    if local.exists() {
        layers.push(local);
    }
    let (mut cfg, report) = ConfigReport::load(&layers);
    if let Some(author) = args.level_by {
        cfg.level.level_by = author;
    }

    App::new()
        .insert_resource(cfg.clone())
        .insert_resource(report)
        .insert_resource(ClearColor(Color::BLACK))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: cfg.window.title.clone(),
                resolution: (cfg.window.width, cfg.window.height).into(),
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(GamePlugin)
        .run();
}
