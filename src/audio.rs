//! Sound effect dispatch
//!
//! The sim never plays audio itself; the platform layer maps drained
//! `GameEvent`s to effects here. Playback is fire-and-forget through
//! whatever backend the host registered - with none registered, effects
//! are dropped silently.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Skater jumped
    Jump,
    /// Gem collected
    Gem,
}

impl SoundEffect {
    /// Effect name the host backend keys playback on
    pub fn effect_name(&self) -> &'static str {
        match self {
            SoundEffect::Jump => "jump",
            SoundEffect::Gem => "gem",
        }
    }
}

/// Playback callback supplied by the host: effect name and volume
pub type AudioSink = Box<dyn Fn(&'static str, f32)>;

/// Audio manager for the game
pub struct AudioManager {
    sink: Option<AudioSink>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    /// Create a manager with no backend; playback requests are dropped
    pub fn new() -> Self {
        Self {
            sink: None,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Create a manager dispatching to the given host backend
    pub fn with_sink(sink: AudioSink) -> Self {
        Self {
            sink: Some(sink),
            ..Self::new()
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        match &self.sink {
            Some(sink) => sink(effect.effect_name(), vol),
            None => log::debug!("no audio backend, dropping '{}'", effect.effect_name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_play_reaches_sink_with_volume() {
        let played: Rc<RefCell<Vec<(&'static str, f32)>>> = Rc::default();
        let seen = played.clone();
        let mut audio =
            AudioManager::with_sink(Box::new(move |name, vol| seen.borrow_mut().push((name, vol))));
        audio.set_master_volume(0.5);
        audio.set_sfx_volume(0.5);

        audio.play(SoundEffect::Jump);
        audio.play(SoundEffect::Gem);
        assert_eq!(&*played.borrow(), &[("jump", 0.25), ("gem", 0.25)]);
    }

    #[test]
    fn test_muted_drops_playback() {
        let played: Rc<RefCell<Vec<(&'static str, f32)>>> = Rc::default();
        let seen = played.clone();
        let mut audio =
            AudioManager::with_sink(Box::new(move |name, vol| seen.borrow_mut().push((name, vol))));
        audio.set_muted(true);

        audio.play(SoundEffect::Jump);
        assert!(played.borrow().is_empty());
    }
}
