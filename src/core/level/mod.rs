pub mod layout;

pub use layout::{
    BucketDef, LevelFile, StaticDef, DEFAULT_FRICTION, DEFAULT_GRAIN_COUNT, DEFAULT_RESTITUTION,
    DESIGNER_TAG,
};
