//! Audio surface
//!
//! Sounds are fire-and-forget. The game asks for an effect by name and a
//! volume; whatever plays it may fail, and that failure never reaches the
//! simulation.

use thiserror::Error;

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Auto-fire volley
    Shoot,
    /// Bullet hits an enemy that survives
    EnemyHit,
    /// Enemy destroyed
    Explosion,
    /// Enemy reached the end of the highway
    PlayerHurt,
    /// Power-up collected
    PowerUp,
    /// New wave announced
    WaveStart,
    /// Game over
    GameOver,
}

impl SoundEffect {
    /// Asset name handed to the backend
    pub fn name(self) -> &'static str {
        match self {
            SoundEffect::Shoot => "shoot",
            SoundEffect::EnemyHit => "hit",
            SoundEffect::Explosion => "explosion",
            SoundEffect::PlayerHurt => "hurt",
            SoundEffect::PowerUp => "powerup",
            SoundEffect::WaveStart => "wave",
            SoundEffect::GameOver => "gameover",
        }
    }

    /// Relative loudness before master/sfx volume
    fn gain(self) -> f32 {
        match self {
            SoundEffect::Shoot => 0.3,
            SoundEffect::EnemyHit => 0.4,
            SoundEffect::Explosion => 0.6,
            SoundEffect::PlayerHurt => 0.7,
            SoundEffect::PowerUp => 0.5,
            SoundEffect::WaveStart => 0.6,
            SoundEffect::GameOver => 0.8,
        }
    }

    /// The sound a game event makes, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::ShotFired { .. } => Some(SoundEffect::Shoot),
            GameEvent::EnemyHit { .. } => Some(SoundEffect::EnemyHit),
            GameEvent::EnemyKilled { .. } => Some(SoundEffect::Explosion),
            GameEvent::EnemyLeaked { .. } => Some(SoundEffect::PlayerHurt),
            GameEvent::PowerUpCollected { .. } => Some(SoundEffect::PowerUp),
            GameEvent::WaveStarted { .. } => Some(SoundEffect::WaveStart),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            _ => None,
        }
    }
}

/// Why a backend could not play a sound
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio output unavailable")]
    Unavailable,
    #[error("playback rejected: {0}")]
    Rejected(String),
}

/// Something that can actually make noise
pub trait AudioBackend {
    fn play_sound(&mut self, name: &str, volume: f32) -> Result<(), AudioError>;
}

/// Backend for hosts without audio output
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioBackend for NullAudio {
    fn play_sound(&mut self, _name: &str, _volume: f32) -> Result<(), AudioError> {
        Err(AudioError::Unavailable)
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Box<dyn AudioBackend>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(NullAudio))
    }
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
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

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect. Backend failures are logged and dropped.
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume() * effect.gain();
        if vol <= 0.0 {
            return;
        }
        if let Err(e) = self.backend.play_sound(effect.name(), vol) {
            log::debug!("Sound '{}' not played: {}", effect.name(), e);
        }
    }
}
