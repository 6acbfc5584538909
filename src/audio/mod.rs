//! Sound cues and background music
//!
//! The loop driver talks to an [`AudioBackend`]; [`open_backend`] picks the
//! real device or a silent stand-in.

pub mod bank;
pub mod clip;
pub mod rodio_backend;

use anyhow::Result;
use log::{debug, info, warn};
use std::path::Path;

use crate::game::{CollisionType, GameEvent};

pub use bank::SoundBank;
pub use clip::Clip;
pub use rodio_backend::RodioAudio;

/// Short sound played in response to a game event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Eat,
    Wall,
    GameOver,
    LevelUp,
}

impl SoundCue {
    pub const ALL: [SoundCue; 4] = [
        SoundCue::Eat,
        SoundCue::Wall,
        SoundCue::GameOver,
        SoundCue::LevelUp,
    ];

    /// File holding this cue inside a sounds directory
    pub fn file_name(self) -> &'static str {
        match self {
            SoundCue::Eat => "eat.wav",
            SoundCue::Wall => "wall.mp3",
            SoundCue::GameOver => "endgame.mp3",
            SoundCue::LevelUp => "levelup.wav",
        }
    }

    /// Cue announcing `event`, if it has one
    pub fn for_event(event: &GameEvent) -> Option<SoundCue> {
        match event {
            GameEvent::AteFood => Some(SoundCue::Eat),
            GameEvent::LeveledUp { .. } => Some(SoundCue::LevelUp),
            GameEvent::Collision(CollisionType::Wall) => Some(SoundCue::Wall),
            GameEvent::Collision(CollisionType::SelfCollision) => None,
            GameEvent::GameOver { .. } => Some(SoundCue::GameOver),
        }
    }
}

pub trait AudioBackend {
    /// Fire and forget a cue
    fn play(&mut self, cue: SoundCue);

    /// Start or stop the looping background track; repeated calls with the
    /// same value are no-ops
    fn set_music_playing(&mut self, playing: bool);
}

impl<A: AudioBackend + ?Sized> AudioBackend for Box<A> {
    fn play(&mut self, cue: SoundCue) {
        (**self).play(cue);
    }

    fn set_music_playing(&mut self, playing: bool) {
        (**self).set_music_playing(playing);
    }
}

/// Backend that plays nothing
#[derive(Debug, Default)]
pub struct SilentAudio;

impl AudioBackend for SilentAudio {
    fn play(&mut self, cue: SoundCue) {
        debug!("Muted cue {:?}", cue);
    }

    fn set_music_playing(&mut self, _playing: bool) {}
}

/// Choose the audio backend for this run
///
/// Sound files are decoded before the device is opened, so a missing file is
/// an error even on a machine without audio output. A missing device only
/// mutes the game.
pub fn open_backend(sounds: Option<&Path>, mute: bool) -> Result<Box<dyn AudioBackend>> {
    if mute {
        info!("Audio muted");
        return Ok(Box::new(SilentAudio));
    }

    let bank = match sounds {
        Some(dir) => {
            info!("Loading sounds from {:?}", dir);
            SoundBank::load(dir)?
        }
        None => SoundBank::synthesized(),
    };

    match RodioAudio::open(bank) {
        Ok(audio) => Ok(Box::new(audio)),
        Err(err) => {
            warn!("Audio unavailable, continuing muted: {:#}", err);
            Ok(Box::new(SilentAudio))
        }
    }
}
