use bevy::audio::AudioSource;
use bevy::prelude::*;

use super::mixer::{release_finished_voices, start_queued_voices, sync_voice_pause, GameSounds};
use crate::core::assets::{asset_root, require_asset};
use crate::core::config::{GameConfig, SoundConfig};

/// Request to play a named sound on the first free channel.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct PlaySound {
    pub name: String,
    pub looping: bool,
}

impl PlaySound {
    pub fn once(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            looping: false,
        }
    }

    pub fn looping(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            looping: true,
        }
    }
}

pub struct SoundPlugin;

impl Plugin for SoundPlugin {
    fn build(&self, app: &mut App) {
        let channels = app
            .world()
            .get_resource::<GameConfig>()
            .map(|cfg| cfg.sounds.channels)
            .unwrap_or_else(|| SoundConfig::default().channels);
        app.insert_resource(GameSounds::with_channels(channels))
            .add_event::<PlaySound>()
            .add_systems(Startup, load_sounds)
            .add_systems(
                Update,
                (
                    release_finished_voices,
                    play_requested_sounds,
                    start_queued_voices,
                    sync_voice_pause,
                )
                    .chain(),
            );
    }
}

/// Startup: resolves every configured sound. A missing file aborts startup.
fn load_sounds(cfg: Res<GameConfig>, asset_server: Res<AssetServer>, mut sounds: ResMut<GameSounds>) {
    let root = asset_root();
    let loaded = sounds.load_sounds(&cfg.sounds.assets, |path| {
        require_asset(&root, path)?;
        Ok(asset_server.load::<AudioSource>(path.to_string()))
    });
    match loaded {
        Ok(count) => info!(
            target: "audio",
            "GameSounds: loaded {count} sounds, {} channels",
            cfg.sounds.channels
        ),
        Err(e) => panic!("GameSounds: {e:#}"),
    }
}

pub fn play_requested_sounds(mut requests: EventReader<PlaySound>, mut sounds: ResMut<GameSounds>) {
    for req in requests.read() {
        if let Some(channel) = sounds.play(&req.name, req.looping) {
            debug!(target: "audio", "'{}' on channel {channel} (loop={})", req.name, req.looping);
        }
    }
}
