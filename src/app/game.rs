use bevy::prelude::*;

use crate::audio::SoundPlugin;
use crate::core::config::GameConfig;
use crate::core::system::{ScoringSet, SimulationSet, TransportSet};
use crate::gameplay::{SandboxPlugin, TeleportPlugin};
use crate::rendering::hud::HudPlugin;
use crate::rendering::CameraPlugin;

/// Outcome of config loading, logged once the log subscriber is up.
#[derive(Resource, Debug, Clone, Default)]
pub struct ConfigReport {
    pub used: Vec<String>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ConfigReport {
    /// Loads `paths` as layers and validates the result. Never fails; problems land in the report.
    pub fn load<P, I>(paths: I) -> (GameConfig, Self)
    where
        P: AsRef<std::path::Path>,
        I: IntoIterator<Item = P>,
    {
        let (cfg, used, errors) = GameConfig::load_layered(paths);
        let warnings = cfg.validate();
        (cfg, Self { used, errors, warnings })
    }
}

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        let fps = app
            .world()
            .get_resource::<GameConfig>()
            .map(|cfg| cfg.physics.fps)
            .filter(|fps| *fps > 0.0)
            .unwrap_or(60.0);
        app.insert_resource(Time::<Fixed>::from_hz(fps as f64))
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet,
                    TransportSet.after(SimulationSet),
                    ScoringSet.after(TransportSet),
                ),
            )
            .add_plugins((
                CameraPlugin,
                SoundPlugin,
                TeleportPlugin,
                HudPlugin,
                SandboxPlugin,
            ))
            .add_systems(Startup, log_config_report);
    }
}

/// Startup: writes the config report to the log. Binaries add this themselves when
/// they do not use [`GamePlugin`].
pub fn log_config_report(report: Option<Res<ConfigReport>>) {
    let Some(report) = report else {
        return;
    };
    for e in &report.errors {
        warn!(target: "config", "load issue: {e}");
    }
    if report.used.is_empty() {
        info!(target: "config", "no config layers found; using defaults");
    } else {
        info!(target: "config", used = ?report.used, "config layers loaded");
    }
    for w in &report.warnings {
        warn!(target: "config", "{w}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;
    use std::io::Write;

    #[test]
    fn broken_layer_is_reported_not_swallowed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"( window: ( width: ").unwrap();
        let (cfg, report) = ConfigReport::load([file.path()]);
        assert_eq!(cfg, GameConfig::default());
        assert!(report.used.is_empty());
        assert_eq!(report.errors.len(), 1, "{:?}", report.errors);
        assert!(report.errors[0].contains("parse error"));
    }

    #[test]
    fn missing_layer_and_validation_warnings_are_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"( editor: ( width: 0.0, output_path: \"\" ) )").unwrap();
        let (cfg, report) =
            ConfigReport::load([file.path(), std::path::Path::new("no/such/game.local.ron")]);
        assert_eq!(cfg.editor.width, 0.0);
        assert_eq!(report.used.len(), 1);
        assert!(report.errors[0].contains("read error"));
        assert!(report.warnings.iter().any(|w| w.contains("editor window")));
        assert!(report.warnings.iter().any(|w| w.contains("output_path")));
    }

    #[test]
    fn report_logger_runs_with_and_without_report() {
        let mut app = App::new();
        app.add_systems(Startup, log_config_report);
        app.update();
        app.insert_resource(ConfigReport {
            used: vec!["assets/config/game.ron".into()],
            errors: vec!["x: parse error".into()],
            warnings: vec!["editor.output_path is empty".into()],
        });
        app.world_mut().run_system_once(log_config_report).unwrap();
    }
}
