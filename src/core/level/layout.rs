//! Level file schema shared with the game's level loader.
//!
//! Field names and the fixed defaults below are a compatibility contract;
//! renaming anything breaks existing level files.
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Author tag written by the level designer.
pub const DESIGNER_TAG: &str = "Level Designer";
pub const DEFAULT_FRICTION: f32 = 0.5;
pub const DEFAULT_RESTITUTION: f32 = 0.5;
pub const DEFAULT_GRAIN_COUNT: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketDef {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub needed_sugar: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticDef {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
    pub color: String,
    pub line_width: i32,
    pub friction: f32,
    pub restitution: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelFile {
    pub level_by: String,
    pub spout_x: i32,
    pub spout_y: i32,
    pub buckets: Vec<BucketDef>,
    pub statics: Vec<StaticDef>,
    pub number_sugar_grains: u32,
}

impl LevelFile {
    /// Pretty JSON with four-space indentation.
    pub fn to_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser).context("serialize level")?;
        String::from_utf8(buf).context("level json is not utf-8")
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json()?;
        fs::write(path, json).with_context(|| format!("write level {}", path.display()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let txt =
            fs::read_to_string(path).with_context(|| format!("read level {}", path.display()))?;
        serde_json::from_str(&txt).with_context(|| format!("parse level {}", path.display()))
    }
}
