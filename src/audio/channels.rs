//! Fixed channel pool with first-free allocation.
//!
//! A sound is started on the lowest-indexed channel that is not busy at call
//! time. When every channel is busy the request is dropped; nothing is queued.
use anyhow::{Context, Result};
use bevy::log::debug;
use std::collections::{BTreeMap, HashMap};

/// Playback engine exposing a fixed number of channels.
pub trait ChannelBackend {
    type Sample;

    fn channel_count(&self) -> usize;
    /// Busy while a sound occupies the channel, paused or not.
    fn is_busy(&self, channel: usize) -> bool;
    fn start(&mut self, channel: usize, sample: &Self::Sample, looping: bool);
    /// Pausing never changes busy/free state. Out-of-range channels are ignored.
    fn pause(&mut self, channel: usize);
    fn resume(&mut self, channel: usize);

    fn pause_all(&mut self) {
        for i in 0..self.channel_count() {
            self.pause(i);
        }
    }

    fn resume_all(&mut self) {
        for i in 0..self.channel_count() {
            self.resume(i);
        }
    }
}

/// Named samples played over a [`ChannelBackend`].
pub struct SoundChannels<B: ChannelBackend> {
    backend: B,
    sounds: HashMap<String, B::Sample>,
    muted: bool,
}

impl<B: ChannelBackend> SoundChannels<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            sounds: HashMap::new(),
            muted: false,
        }
    }

    /// Loads every entry of a name -> path table. The first failure aborts the load.
    pub fn load_sounds<F>(&mut self, table: &BTreeMap<String, String>, mut load: F) -> Result<usize>
    where
        F: FnMut(&str) -> Result<B::Sample>,
    {
        for (name, path) in table {
            let sample = load(path).with_context(|| format!("load sound '{name}' from {path}"))?;
            self.sounds.insert(name.clone(), sample);
        }
        Ok(self.sounds.len())
    }

    pub fn insert_sound(&mut self, name: impl Into<String>, sample: B::Sample) {
        self.sounds.insert(name.into(), sample);
    }

    pub fn has_sound(&self, name: &str) -> bool {
        self.sounds.contains_key(name)
    }

    /// Starts `name` on the first free channel and returns its index.
    /// Unknown names and a fully busy pool are silent no-ops.
    pub fn play(&mut self, name: &str, looping: bool) -> Option<usize> {
        let sample = self.sounds.get(name)?;
        let Some(channel) = (0..self.backend.channel_count()).find(|&i| !self.backend.is_busy(i))
        else {
            debug!(target: "audio", "all channels busy; dropped '{name}'");
            return None;
        };
        self.backend.start(channel, sample, looping);
        Some(channel)
    }

    pub fn mute_channel(&mut self, channel: usize) {
        self.backend.pause(channel);
    }

    pub fn unmute_channel(&mut self, channel: usize) {
        self.backend.resume(channel);
    }

    pub fn mute_all(&mut self) {
        self.backend.pause_all();
        self.muted = true;
    }

    pub fn unmute_all(&mut self) {
        self.backend.resume_all();
        self.muted = false;
    }

    pub fn is_mute(&self) -> bool {
        self.muted
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}
