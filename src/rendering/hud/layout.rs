//! Per-frame HUD layout. Pure: given the frame's numbers, produce every text
//! item with its font slot, anchor and colour. No validation; values are
//! shown as given.
use bevy::prelude::*;

pub const HUD_COLOR: Color = Color::srgb(191.0 / 255.0, 0.0, 1.0);
pub const AUTHOR_COLOR: Color = Color::srgba(191.0 / 255.0, 191.0 / 255.0, 1.0, 50.0 / 255.0);
pub const GRAVITY_DOWN: &str = "⇓";
pub const GRAVITY_UP: &str = "⇑";
pub const LEVEL_HEADER: &str = "Level  Remaining";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudFont {
    Small,
    Medium,
    Large,
    Symbol,
}

/// Where an item sits, in screen pixels (top-left origin).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HudAnchor {
    TopLeft(Vec2),
    /// Horizontally centred on `x`.
    CenteredOn { x: f32, top: f32 },
    /// Right edge `margin` pixels from the right of the screen.
    TopRight { margin: f32, top: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct HudText {
    pub text: String,
    pub font: HudFont,
    pub anchor: HudAnchor,
    pub color: Color,
}

/// Bucket fields the HUD reads: centre x and top edge y (measured up from the bottom).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BucketReadout {
    pub x: f32,
    pub y: f32,
    pub count: i64,
}

#[derive(Debug, Clone, Copy)]
pub struct HudSnapshot<'a> {
    pub buckets: &'a [BucketReadout],
    pub grains_left: i64,
    pub level: i64,
    pub level_by: &'a str,
    pub gravity: f32,
    pub screen_height: f32,
}

/// Only the sign matters: negative gravity is "up", anything else "down".
pub fn gravity_glyph(gravity: f32) -> &'static str {
    if gravity < 0.0 {
        GRAVITY_UP
    } else {
        GRAVITY_DOWN
    }
}

pub fn layout_hud(frame: &HudSnapshot) -> Vec<HudText> {
    let mut items = Vec::with_capacity(frame.buckets.len() + 4);
    for bucket in frame.buckets {
        items.push(HudText {
            text: bucket.count.to_string(),
            font: HudFont::Medium,
            anchor: HudAnchor::CenteredOn {
                x: bucket.x,
                top: frame.screen_height - bucket.y - 8.0,
            },
            color: HUD_COLOR,
        });
    }
    items.push(HudText {
        text: LEVEL_HEADER.into(),
        font: HudFont::Small,
        anchor: HudAnchor::TopLeft(Vec2::new(10.0, 10.0)),
        color: HUD_COLOR,
    });
    items.push(HudText {
        text: format!("{}   {}", frame.level, frame.grains_left),
        font: HudFont::Large,
        anchor: HudAnchor::TopLeft(Vec2::new(15.0, 30.0)),
        color: HUD_COLOR,
    });
    items.push(HudText {
        text: gravity_glyph(frame.gravity).into(),
        font: HudFont::Symbol,
        anchor: HudAnchor::TopLeft(Vec2::new(130.0, -10.0)),
        color: HUD_COLOR,
    });
    if !frame.level_by.is_empty() {
        items.push(HudText {
            text: format!("level by {}", frame.level_by),
            font: HudFont::Medium,
            anchor: HudAnchor::TopRight {
                margin: 10.0,
                top: 10.0,
            },
            color: AUTHOR_COLOR,
        });
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame<'a>(buckets: &'a [BucketReadout], level_by: &'a str, gravity: f32) -> HudSnapshot<'a> {
        HudSnapshot {
            buckets,
            grains_left: 73,
            level: 4,
            level_by,
            gravity,
            screen_height: 800.0,
        }
    }

    fn glyph_of(items: &[HudText]) -> &str {
        items
            .iter()
            .find(|i| i.font == HudFont::Symbol)
            .map(|i| i.text.as_str())
            .unwrap()
    }

    #[test]
    fn gravity_sign_picks_glyph() {
        assert_eq!(glyph_of(&layout_hud(&frame(&[], "", 1.0))), GRAVITY_DOWN);
        assert_eq!(glyph_of(&layout_hud(&frame(&[], "", -1.0))), GRAVITY_UP);
        assert_eq!(gravity_glyph(0.0), GRAVITY_DOWN);
        assert_eq!(gravity_glyph(-0.25), GRAVITY_UP);
        assert_eq!(gravity_glyph(3.0), GRAVITY_DOWN);
    }

    #[test]
    fn bucket_counts_sit_above_each_bucket() {
        let buckets = [
            BucketReadout { x: 120.0, y: 200.0, count: 3 },
            BucketReadout { x: 500.0, y: 90.0, count: -2 },
        ];
        let items = layout_hud(&frame(&buckets, "", 1.0));
        assert_eq!(items[0].text, "3");
        assert_eq!(items[0].anchor, HudAnchor::CenteredOn { x: 120.0, top: 592.0 });
        assert_eq!(items[1].text, "-2");
        assert_eq!(items[1].anchor, HudAnchor::CenteredOn { x: 500.0, top: 702.0 });
    }

    #[test]
    fn stats_and_author_lines() {
        let items = layout_hud(&frame(&[], "Brett", 1.0));
        let texts: Vec<&str> = items.iter().map(|i| i.text.as_str()).collect();
        assert!(texts.contains(&LEVEL_HEADER));
        assert!(texts.contains(&"4   73"));
        let author = items.last().unwrap();
        assert_eq!(author.text, "level by Brett");
        assert!(matches!(author.anchor, HudAnchor::TopRight { .. }));
        assert_eq!(author.color, AUTHOR_COLOR);
    }

    #[test]
    fn empty_author_is_not_drawn() {
        let items = layout_hud(&frame(&[], "", 1.0));
        assert_eq!(items.len(), 3);
        assert!(items.iter().all(|i| !i.text.starts_with("level by")));
    }
}
