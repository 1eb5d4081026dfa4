//! Sound channel manager: named samples over a fixed pool of playback channels.
pub mod channels;
pub mod mixer;
pub mod plugin;

pub use channels::{ChannelBackend, SoundChannels};
pub use mixer::{ChannelVoice, GameSounds, Mixer};
pub use plugin::{PlaySound, SoundPlugin};
