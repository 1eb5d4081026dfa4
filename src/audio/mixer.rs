//! Bevy-backed channel pool.
//!
//! Each channel owns at most one voice entity (`AudioPlayer`). One-shot voices
//! use `PlaybackSettings::DESPAWN`, so a channel frees itself when its voice
//! entity disappears. Pause state lives on the slot and is pushed onto the
//! voice's `AudioSink` every frame, since the sink only appears once the
//! source asset has loaded.
use bevy::audio::{AudioPlayer, AudioSink, AudioSinkPlayback, AudioSource, PlaybackSettings};
use bevy::prelude::*;

use super::channels::{ChannelBackend, SoundChannels};

/// Voice entity spawned for a channel.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelVoice {
    pub channel: usize,
}

#[derive(Debug, Clone)]
struct QueuedStart {
    sample: Handle<AudioSource>,
    looping: bool,
}

#[derive(Debug, Clone, Default)]
struct MixerSlot {
    voice: Option<Entity>,
    queued: Option<QueuedStart>,
    paused: bool,
}

#[derive(Debug, Default)]
pub struct Mixer {
    slots: Vec<MixerSlot>,
}

impl Mixer {
    pub fn with_channels(channels: usize) -> Self {
        Self {
            slots: vec![MixerSlot::default(); channels],
        }
    }

    pub fn voice(&self, channel: usize) -> Option<Entity> {
        self.slots.get(channel).and_then(|s| s.voice)
    }

    pub fn is_paused(&self, channel: usize) -> bool {
        self.slots.get(channel).is_some_and(|s| s.paused)
    }
}

impl ChannelBackend for Mixer {
    type Sample = Handle<AudioSource>;

    fn channel_count(&self) -> usize {
        self.slots.len()
    }

    fn is_busy(&self, channel: usize) -> bool {
        self.slots
            .get(channel)
            .is_some_and(|s| s.voice.is_some() || s.queued.is_some())
    }

    fn start(&mut self, channel: usize, sample: &Self::Sample, looping: bool) {
        if let Some(slot) = self.slots.get_mut(channel) {
            slot.queued = Some(QueuedStart {
                sample: sample.clone(),
                looping,
            });
            slot.paused = false;
        }
    }

    fn pause(&mut self, channel: usize) {
        if let Some(slot) = self.slots.get_mut(channel) {
            slot.paused = true;
        }
    }

    fn resume(&mut self, channel: usize) {
        if let Some(slot) = self.slots.get_mut(channel) {
            slot.paused = false;
        }
    }
}

/// Channel manager resource used by the game.
#[derive(Resource, Deref, DerefMut)]
pub struct GameSounds(pub SoundChannels<Mixer>);

impl GameSounds {
    pub fn with_channels(channels: usize) -> Self {
        Self(SoundChannels::new(Mixer::with_channels(channels)))
    }
}

/// Frees channels whose voice entity has been despawned (playback finished).
pub fn release_finished_voices(mut sounds: ResMut<GameSounds>, voices: Query<(), With<ChannelVoice>>) {
    for slot in sounds.backend_mut().slots.iter_mut() {
        if let Some(voice) = slot.voice {
            if voices.get(voice).is_err() {
                slot.voice = None;
            }
        }
    }
}

/// Spawns voice entities for channels started since the last frame.
pub fn start_queued_voices(mut commands: Commands, mut sounds: ResMut<GameSounds>) {
    for (channel, slot) in sounds.backend_mut().slots.iter_mut().enumerate() {
        let Some(queued) = slot.queued.take() else {
            continue;
        };
        if let Some(old) = slot.voice.take() {
            commands.entity(old).despawn();
        }
        let settings = if queued.looping {
            PlaybackSettings::LOOP
        } else {
            PlaybackSettings::DESPAWN
        };
        let voice = commands
            .spawn((
                Name::new(format!("channel-{channel}")),
                ChannelVoice { channel },
                AudioPlayer::new(queued.sample),
                settings,
            ))
            .id();
        slot.voice = Some(voice);
    }
}

/// Applies per-channel pause state to live sinks.
pub fn sync_voice_pause(sounds: Res<GameSounds>, mut sinks: Query<(&ChannelVoice, &mut AudioSink)>) {
    let mixer = sounds.backend();
    for (voice, mut sink) in sinks.iter_mut() {
        let want_paused = mixer.is_paused(voice.channel);
        if want_paused && !sink.is_paused() {
            sink.pause();
        } else if !want_paused && sink.is_paused() {
            sink.play();
        }
    }
}
