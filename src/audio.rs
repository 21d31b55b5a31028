//! Audio cues
//!
//! The simulation only emits discrete cues. Playing them is best-effort: a
//! missing or failing backend must never change the outcome of a run.

use serde::{Deserialize, Serialize};

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioCue {
    /// Player left the ground
    Jump,
    /// Player hit an obstacle
    Crash,
    /// Handshake at the end of the cutscene
    Victory,
}

impl AudioCue {
    /// Relative loudness before master/sfx volume
    pub fn gain(self) -> f32 {
        match self {
            AudioCue::Jump => 0.4,
            AudioCue::Crash => 0.8,
            AudioCue::Victory => 1.0,
        }
    }
}

/// Anything that consumes cues. Fire-and-forget.
pub trait AudioSink {
    fn play(&mut self, cue: AudioCue);
}

/// Device-level output (Web Audio, cpal, ...). Receives the final volume.
pub trait AudioBackend {
    fn play(&mut self, cue: AudioCue, volume: f32);
}

/// Backend that only writes cues to the log
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play(&mut self, cue: AudioCue, volume: f32) {
        log::info!("♪ {:?} (vol {:.2})", cue, volume);
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Option<Box<dyn AudioBackend>>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(None)
    }
}

impl std::fmt::Debug for AudioManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioManager")
            .field("backend", &self.backend.is_some())
            .field("master_volume", &self.master_volume)
            .field("sfx_volume", &self.sfx_volume)
            .field("muted", &self.muted)
            .finish()
    }
}

impl AudioManager {
    /// Create a manager. `None` means audio is unavailable.
    pub fn new(backend: Option<Box<dyn AudioBackend>>) -> Self {
        if backend.is_none() {
            log::warn!("No audio backend - audio disabled");
        }
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
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

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }
}

impl AudioSink for AudioManager {
    fn play(&mut self, cue: AudioCue) {
        let vol = self.effective_volume() * cue.gain();
        if vol <= 0.0 {
            return;
        }
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        backend.play(cue, vol);
    }
}
