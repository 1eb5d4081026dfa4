use bevy::prelude::*;
use serde::Deserialize;
use std::{collections::BTreeMap, fs, path::Path};

use crate::core::coords::ScreenSpace;

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 800.0,
            title: "Sugar Pop".into(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Pixels per metre.
    pub scale: f32,
    /// Fixed simulation rate (ticks per second).
    pub fps: f32,
    /// Sandbox gravity, metres / s². Only the magnitude is used; direction starts downward.
    pub gravity: f32,
    /// Sandbox spout emission, grains per second.
    pub spout_rate: f32,
}
impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            scale: 30.0,
            fps: 60.0,
            gravity: -9.8,
            spout_rate: 20.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SoundConfig {
    pub channels: usize,
    /// Sound name -> asset path (relative to the asset root).
    pub assets: BTreeMap<String, String>,
}
impl Default for SoundConfig {
    fn default() -> Self {
        let assets = [
            ("level", "sounds/Level.mp3"),
            ("bonus", "sounds/bucket_explode.wav"),
            ("bucket", "sounds/ball_tap.wav"),
            ("level_complete", "sounds/complete2.wav"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        Self {
            channels: 8,
            assets,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct HudConfig {
    pub symbol_font: String,
    pub small_size: f32,
    pub medium_size: f32,
    pub large_size: f32,
    pub symbol_size: f32,
}
impl Default for HudConfig {
    fn default() -> Self {
        Self {
            symbol_font: "fonts/Segoe-UI-Symbol.ttf".into(),
            small_size: 20.0,
            medium_size: 30.0,
            large_size: 50.0,
            symbol_size: 64.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq)]
pub struct PointDef {
    pub x: f32,
    pub y: f32,
}
impl From<PointDef> for Vec2 {
    fn from(p: PointDef) -> Self {
        Vec2::new(p.x, p.y)
    }
}

/// Bucket placement in screen pixels (centre x/y), same convention as level files.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct BucketSpec {
    pub x: f32,
    pub y: f32,
    #[serde(default = "default_bucket_extent")]
    pub width: f32,
    #[serde(default = "default_bucket_extent")]
    pub height: f32,
    #[serde(default = "default_needed_sugar")]
    pub needed_sugar: u32,
}
fn default_bucket_extent() -> f32 {
    50.0
}
fn default_needed_sugar() -> u32 {
    10
}

/// Teleporter pair in screen pixels.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TeleporterSpec {
    pub entry: PointDef,
    pub exit: PointDef,
    pub entry_radius: f32,
    pub exit_radius: f32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LevelConfig {
    pub number: u32,
    pub level_by: String,
    pub grains: u32,
    pub spout: PointDef,
    pub buckets: Vec<BucketSpec>,
    pub teleporters: Vec<TeleporterSpec>,
}
impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            number: 1,
            level_by: String::new(),
            grains: 100,
            spout: PointDef { x: 200.0, y: 120.0 },
            buckets: vec![BucketSpec {
                x: 700.0,
                y: 650.0,
                width: 80.0,
                height: 60.0,
                needed_sugar: 10,
            }],
            teleporters: vec![TeleporterSpec {
                entry: PointDef { x: 200.0, y: 500.0 },
                exit: PointDef { x: 700.0, y: 300.0 },
                entry_radius: 30.0,
                exit_radius: 20.0,
            }],
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EditorConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    pub output_path: String,
}
impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            title: "Sugar Pop Level Designer".into(),
            output_path: "custom_level.json".into(),
        }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, Default, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub physics: PhysicsConfig,
    pub sounds: SoundConfig,
    pub hud: HudConfig,
    pub level: LevelConfig,
    pub editor: EditorConfig,
}

impl GameConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let txt = fs::read_to_string(&path)
            .map_err(|e| format!("read config {:?}: {e}", path.as_ref()))?;
        ron::from_str(&txt).map_err(|e| format!("parse config {:?}: {e}", path.as_ref()))
    }

    /// Deep-merges RON maps from `paths` in order (later wins) and deserializes the result.
    /// Returns (config, used paths, errors); never fails, falls back to defaults.
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();
        fn merge_value(base: &mut Value, overlay: Value) {
            match (base, overlay) {
                (Value::Map(bm), Value::Map(om)) => {
                    for (k, v) in om.into_iter() {
                        let mut incoming = Some(v);
                        for (ek, ev) in bm.iter_mut() {
                            if *ek == k {
                                if let Some(val) = incoming.take() {
                                    merge_value(ev, val);
                                }
                                break;
                            }
                        }
                        if let Some(val) = incoming {
                            bm.insert(k, val);
                        }
                    }
                }
                (b, o) => *b = o,
            }
        }
        for p in paths {
            let path_ref = p.as_ref();
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        match &mut merged {
                            Some(cur) => merge_value(cur, val),
                            None => merged = Some(val),
                        }
                        used.push(path_ref.display().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }
        let Some(val) = merged else {
            return (Self::default(), used, errors);
        };
        match val.into_rust::<GameConfig>() {
            Ok(cfg) => (cfg, used, errors),
            Err(e) => {
                errors.push(format!(
                    "failed to deserialize merged config; using defaults: {e}"
                ));
                (Self::default(), used, errors)
            }
        }
    }

    pub fn screen_space(&self) -> ScreenSpace {
        ScreenSpace::new(self.physics.scale, self.window.width, self.window.height)
    }

    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if self.editor.width <= 0.0 || self.editor.height <= 0.0 {
            w.push("editor window dimensions must be > 0".into());
        }
        if self.physics.scale <= 0.0 {
            w.push(format!(
                "physics.scale {} must be > 0 (pixels per metre)",
                self.physics.scale
            ));
        }
        if self.physics.fps <= 0.0 {
            w.push(format!("physics.fps {} must be > 0", self.physics.fps));
        }
        if self.physics.spout_rate < 0.0 {
            w.push("physics.spout_rate negative -> spout disabled".into());
        }
        if self.sounds.channels == 0 {
            w.push("sounds.channels is 0; every play request will be dropped".into());
        }
        if self.sounds.assets.is_empty() {
            w.push("sounds.assets is empty; nothing can be played".into());
        }
        if self.editor.output_path.trim().is_empty() {
            w.push("editor.output_path is empty".into());
        }
        for (i, b) in self.level.buckets.iter().enumerate() {
            if b.width <= 0.0 || b.height <= 0.0 {
                w.push(format!("level.buckets[{i}] size must be > 0"));
            }
        }
        for (i, t) in self.level.teleporters.iter().enumerate() {
            if t.entry_radius <= 0.0 || t.exit_radius <= 0.0 {
                w.push(format!("level.teleporters[{i}] radii must be > 0"));
            }
        }
        w
    }
}
