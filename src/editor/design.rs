//! Level designer editing session: geometry plus the wall-drawing state machine.
//!
//! Coordinates are integer window pixels, top-left origin, which is what the
//! level loader reads back.
use bevy::prelude::*;

use crate::core::level::{
    BucketDef, LevelFile, StaticDef, DEFAULT_FRICTION, DEFAULT_GRAIN_COUNT, DEFAULT_RESTITUTION,
    DESIGNER_TAG,
};

pub const DEFAULT_BUCKET_SIZE: i32 = 50;
pub const DEFAULT_NEEDED_SUGAR: u32 = 10;
pub const DEFAULT_WALL_COLOR: &str = "black";
pub const DEFAULT_WALL_WIDTH: i32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wall {
    pub start: IVec2,
    pub end: IVec2,
    pub color: String,
    pub line_width: i32,
}

impl Wall {
    pub fn new(start: IVec2, end: IVec2) -> Self {
        Self {
            start,
            end,
            color: DEFAULT_WALL_COLOR.into(),
            line_width: DEFAULT_WALL_WIDTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketPlacement {
    pub center: IVec2,
    pub width: i32,
    pub height: i32,
    pub needed_sugar: u32,
}

impl BucketPlacement {
    pub fn at(center: IVec2) -> Self {
        Self {
            center,
            width: DEFAULT_BUCKET_SIZE,
            height: DEFAULT_BUCKET_SIZE,
            needed_sugar: DEFAULT_NEEDED_SUGAR,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    Idle,
    DrawingWall { start: IVec2, end: IVec2 },
}

/// Input already mapped to editing intent.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    PressPointer(IVec2),
    MovePointer(IVec2),
    ReleasePointer,
    PlaceBucket(IVec2),
    SetSpout(IVec2),
    Save,
    Clear,
    Quit,
}

/// What the host has to do after an action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorEffect {
    None,
    Status { text: &'static str, seconds: f32 },
    SaveRequested,
    Quit,
}

#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct LevelDesign {
    walls: Vec<Wall>,
    buckets: Vec<BucketPlacement>,
    spout: Option<IVec2>,
    state: EditState,
}

impl LevelDesign {
    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn buckets(&self) -> &[BucketPlacement] {
        &self.buckets
    }

    pub fn spout(&self) -> Option<IVec2> {
        self.spout
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    /// The wall being dragged, for live preview.
    pub fn wall_in_progress(&self) -> Option<Wall> {
        match self.state {
            EditState::DrawingWall { start, end } => Some(Wall::new(start, end)),
            EditState::Idle => None,
        }
    }

    pub fn apply(&mut self, action: EditorAction) -> EditorEffect {
        match action {
            EditorAction::PressPointer(at) => {
                self.state = EditState::DrawingWall { start: at, end: at };
                EditorEffect::None
            }
            EditorAction::MovePointer(at) => {
                if let EditState::DrawingWall { end, .. } = &mut self.state {
                    *end = at;
                }
                EditorEffect::None
            }
            EditorAction::ReleasePointer => match std::mem::take(&mut self.state) {
                EditState::DrawingWall { start, end } => {
                    self.walls.push(Wall::new(start, end));
                    EditorEffect::Status {
                        text: "Wall added",
                        seconds: 1.0,
                    }
                }
                EditState::Idle => EditorEffect::None,
            },
            EditorAction::PlaceBucket(at) => {
                self.buckets.push(BucketPlacement::at(at));
                EditorEffect::Status {
                    text: "Bucket placed",
                    seconds: 1.0,
                }
            }
            EditorAction::SetSpout(at) => {
                self.spout = Some(at);
                EditorEffect::Status {
                    text: "Spout set",
                    seconds: 1.0,
                }
            }
            EditorAction::Save => EditorEffect::SaveRequested,
            EditorAction::Clear => {
                self.clear();
                EditorEffect::Status {
                    text: "Level cleared",
                    seconds: 2.0,
                }
            }
            EditorAction::Quit => EditorEffect::Quit,
        }
    }

    /// Drops committed geometry. A wall being dragged is kept.
    pub fn clear(&mut self) {
        self.walls.clear();
        self.buckets.clear();
        self.spout = None;
    }

    /// Level file for the current geometry; an unset spout saves as (0, 0).
    pub fn to_level_file(&self) -> LevelFile {
        let spout = self.spout.unwrap_or(IVec2::ZERO);
        LevelFile {
            level_by: DESIGNER_TAG.into(),
            spout_x: spout.x,
            spout_y: spout.y,
            buckets: self
                .buckets
                .iter()
                .map(|b| BucketDef {
                    x: b.center.x,
                    y: b.center.y,
                    width: b.width,
                    height: b.height,
                    needed_sugar: b.needed_sugar,
                })
                .collect(),
            statics: self
                .walls
                .iter()
                .map(|w| StaticDef {
                    x1: w.start.x,
                    y1: w.start.y,
                    x2: w.end.x,
                    y2: w.end.y,
                    color: w.color.clone(),
                    line_width: w.line_width,
                    friction: DEFAULT_FRICTION,
                    restitution: DEFAULT_RESTITUTION,
                })
                .collect(),
            number_sugar_grains: DEFAULT_GRAIN_COUNT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drag(design: &mut LevelDesign, from: IVec2, to: IVec2) {
        design.apply(EditorAction::PressPointer(from));
        design.apply(EditorAction::MovePointer(to));
        design.apply(EditorAction::ReleasePointer);
    }

    #[test]
    fn drag_previews_then_commits() {
        let mut design = LevelDesign::default();
        design.apply(EditorAction::PressPointer(IVec2::new(10, 20)));
        assert_eq!(
            design.state(),
            EditState::DrawingWall { start: IVec2::new(10, 20), end: IVec2::new(10, 20) }
        );
        design.apply(EditorAction::MovePointer(IVec2::new(40, 60)));
        assert_eq!(design.wall_in_progress().unwrap().end, IVec2::new(40, 60));
        assert!(design.walls().is_empty());
        design.apply(EditorAction::ReleasePointer);
        assert_eq!(design.state(), EditState::Idle);
        assert_eq!(design.walls(), &[Wall::new(IVec2::new(10, 20), IVec2::new(40, 60))]);
    }

    #[test]
    fn click_without_motion_keeps_zero_length_wall() {
        let mut design = LevelDesign::default();
        design.apply(EditorAction::PressPointer(IVec2::new(5, 5)));
        design.apply(EditorAction::ReleasePointer);
        assert_eq!(design.walls().len(), 1);
        assert_eq!(design.walls()[0].start, design.walls()[0].end);
    }

    #[test]
    fn idle_motion_and_release_do_nothing() {
        let mut design = LevelDesign::default();
        assert_eq!(design.apply(EditorAction::MovePointer(IVec2::new(1, 1))), EditorEffect::None);
        assert_eq!(design.apply(EditorAction::ReleasePointer), EditorEffect::None);
        assert_eq!(design, LevelDesign::default());
    }

    #[test]
    fn spout_is_overwritten() {
        let mut design = LevelDesign::default();
        design.apply(EditorAction::SetSpout(IVec2::new(1, 2)));
        design.apply(EditorAction::SetSpout(IVec2::new(3, 4)));
        assert_eq!(design.spout(), Some(IVec2::new(3, 4)));
    }

    #[test]
    fn clear_empties_everything() {
        let mut design = LevelDesign::default();
        drag(&mut design, IVec2::new(0, 0), IVec2::new(100, 0));
        drag(&mut design, IVec2::new(0, 50), IVec2::new(100, 80));
        design.apply(EditorAction::PlaceBucket(IVec2::new(300, 400)));
        design.apply(EditorAction::SetSpout(IVec2::new(50, 50)));
        let effect = design.apply(EditorAction::Clear);
        assert_eq!(effect, EditorEffect::Status { text: "Level cleared", seconds: 2.0 });
        assert!(design.walls().is_empty());
        assert!(design.buckets().is_empty());
        assert_eq!(design.spout(), None);
    }

    #[test]
    fn bucket_defaults_and_messages() {
        let mut design = LevelDesign::default();
        let effect = design.apply(EditorAction::PlaceBucket(IVec2::new(300, 400)));
        assert_eq!(effect, EditorEffect::Status { text: "Bucket placed", seconds: 1.0 });
        let b = &design.buckets()[0];
        assert_eq!((b.width, b.height, b.needed_sugar), (50, 50, 10));
        assert_eq!(design.apply(EditorAction::Save), EditorEffect::SaveRequested);
        assert_eq!(design.apply(EditorAction::Quit), EditorEffect::Quit);
    }

    #[test]
    fn unset_spout_saves_as_origin() {
        let file = LevelDesign::default().to_level_file();
        assert_eq!((file.spout_x, file.spout_y), (0, 0));
        assert_eq!(file.level_by, DESIGNER_TAG);
        assert_eq!(file.number_sugar_grains, 100);
        assert!(file.buckets.is_empty() && file.statics.is_empty());
    }
}
