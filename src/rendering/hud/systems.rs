use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::layout::{layout_hud, BucketReadout, HudAnchor, HudFont, HudSnapshot};
use crate::core::assets::{asset_root, require_asset};
use crate::core::components::Bucket;
use crate::core::config::GameConfig;

/// Width of the box a centred bucket count is laid out in.
const CENTERED_BOX: f32 = 120.0;

/// Numbers the game loop hands the HUD each frame.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct HudStatus {
    pub level: i64,
    pub grains_left: i64,
    pub level_by: String,
    pub gravity: f32,
}

impl Default for HudStatus {
    fn default() -> Self {
        Self {
            level: 0,
            grains_left: 0,
            level_by: String::new(),
            gravity: 1.0,
        }
    }
}

/// Fonts created once at startup.
#[derive(Resource, Debug, Clone)]
pub struct HudFonts {
    pub small: TextFont,
    pub medium: TextFont,
    pub large: TextFont,
    pub symbol: TextFont,
}

impl HudFonts {
    pub fn get(&self, slot: HudFont) -> &TextFont {
        match slot {
            HudFont::Small => &self.small,
            HudFont::Medium => &self.medium,
            HudFont::Large => &self.large,
            HudFont::Symbol => &self.symbol,
        }
    }
}

/// Pooled HUD text entity; the index is its slot in the frame's layout.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudLabel(pub usize);

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HudStatus>()
            .add_systems(Startup, load_hud_fonts)
            .add_systems(Update, draw_hud.run_if(resource_exists::<HudFonts>));
    }
}

/// Startup: the symbol font must exist on disk; a missing file aborts startup.
fn load_hud_fonts(mut commands: Commands, cfg: Res<GameConfig>, asset_server: Res<AssetServer>) {
    let hud = &cfg.hud;
    if let Err(e) = require_asset(&asset_root(), &hud.symbol_font) {
        panic!("HUD: {e:#}");
    }
    commands.insert_resource(HudFonts {
        small: TextFont::from_font_size(hud.small_size),
        medium: TextFont::from_font_size(hud.medium_size),
        large: TextFont::from_font_size(hud.large_size),
        symbol: TextFont {
            font: asset_server.load(hud.symbol_font.clone()),
            font_size: hud.symbol_size,
            ..default()
        },
    });
    debug!(target: "hud", "fonts ready (symbol={})", hud.symbol_font);
}

fn anchor_node(anchor: HudAnchor) -> (Node, JustifyText) {
    let mut node = Node {
        position_type: PositionType::Absolute,
        ..default()
    };
    let justify = match anchor {
        HudAnchor::TopLeft(p) => {
            node.left = Val::Px(p.x);
            node.top = Val::Px(p.y);
            JustifyText::Left
        }
        HudAnchor::CenteredOn { x, top } => {
            node.left = Val::Px(x - CENTERED_BOX * 0.5);
            node.width = Val::Px(CENTERED_BOX);
            node.top = Val::Px(top);
            JustifyText::Center
        }
        HudAnchor::TopRight { margin, top } => {
            node.right = Val::Px(margin);
            node.top = Val::Px(top);
            JustifyText::Right
        }
    };
    (node, justify)
}

type LabelParts = (
    Entity,
    &'static HudLabel,
    &'static mut Text,
    &'static mut TextFont,
    &'static mut TextColor,
    &'static mut TextLayout,
    &'static mut Node,
);

/// Lays out the frame's HUD and syncs it onto the pooled text entities.
pub fn draw_hud(
    mut commands: Commands,
    fonts: Res<HudFonts>,
    status: Res<HudStatus>,
    cfg: Res<GameConfig>,
    windows: Query<&Window, With<PrimaryWindow>>,
    buckets: Query<&Bucket>,
    mut labels: Query<LabelParts>,
) {
    let screen_height = windows
        .single()
        .map(|w| w.height())
        .unwrap_or(cfg.window.height);
    let readouts: Vec<BucketReadout> = buckets
        .iter()
        .map(|b| BucketReadout {
            x: b.x,
            y: b.y,
            count: b.count,
        })
        .collect();
    let items = layout_hud(&HudSnapshot {
        buckets: &readouts,
        grains_left: status.grains_left,
        level: status.level,
        level_by: &status.level_by,
        gravity: status.gravity,
        screen_height,
    });

    let mut seen = vec![false; items.len()];
    for (entity, label, mut text, mut font, mut color, mut layout, mut node) in labels.iter_mut() {
        let Some(item) = items.get(label.0) else {
            commands.entity(entity).despawn();
            continue;
        };
        seen[label.0] = true;
        if text.0 != item.text {
            text.0 = item.text.clone();
        }
        let want_font = fonts.get(item.font);
        if font.font != want_font.font || font.font_size != want_font.font_size {
            *font = want_font.clone();
        }
        if color.0 != item.color {
            color.0 = item.color;
        }
        let (want_node, justify) = anchor_node(item.anchor);
        if layout.justify != justify {
            layout.justify = justify;
        }
        if *node != want_node {
            *node = want_node;
        }
    }

    for (index, item) in items.iter().enumerate() {
        if seen[index] {
            continue;
        }
        let (node, justify) = anchor_node(item.anchor);
        commands.spawn((
            Name::new(format!("HudLabel{index}")),
            HudLabel(index),
            Text::new(item.text.clone()),
            fonts.get(item.font).clone(),
            TextColor(item.color),
            TextLayout::new_with_justify(justify),
            node,
        ));
    }
}
