use anyhow::Result;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use super::clip::Clip;
use super::SoundCue;

/// File holding the background track inside a sounds directory
pub const MUSIC_FILE: &str = "music.mp3";

/// Every clip the game can play, loaded once at startup
#[derive(Debug, Clone)]
pub struct SoundBank {
    cues: HashMap<SoundCue, Clip>,
    music: Clip,
}

impl SoundBank {
    /// Decode all cue files and the background track from `dir`
    ///
    /// Any missing or undecodable file fails the whole load.
    pub fn load(dir: &Path) -> Result<Self> {
        let mut cues = HashMap::new();
        for cue in SoundCue::ALL {
            cues.insert(cue, Clip::load(&dir.join(cue.file_name()))?);
        }
        let music = Clip::load(&dir.join(MUSIC_FILE))?;

        Ok(Self { cues, music })
    }

    /// Tones generated in memory, for running without sound files
    pub fn synthesized() -> Self {
        let cues = HashMap::from([
            (SoundCue::Eat, Clip::sequence(&[(880.0, 50), (1320.0, 70)], 0.25)),
            (SoundCue::Wall, Clip::tone(110.0, Duration::from_millis(180), 0.4)),
            (
                SoundCue::GameOver,
                Clip::sequence(&[(440.0, 160), (330.0, 160), (220.0, 320)], 0.3),
            ),
            (
                SoundCue::LevelUp,
                Clip::sequence(&[(523.0, 90), (659.0, 90), (784.0, 90), (1047.0, 220)], 0.25),
            ),
        ]);

        let music = Clip::sequence(
            &[
                (262.0, 220),
                (330.0, 220),
                (392.0, 220),
                (330.0, 220),
                (294.0, 220),
                (349.0, 220),
                (440.0, 220),
                (0.0, 220),
            ],
            0.08,
        );

        Self { cues, music }
    }

    pub fn cue(&self, cue: SoundCue) -> Option<&Clip> {
        self.cues.get(&cue)
    }

    pub fn music(&self) -> &Clip {
        &self.music
    }
}
