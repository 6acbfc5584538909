use anyhow::{Context, Result};
use log::warn;
use rodio::{OutputStream, OutputStreamHandle, Sink, Source};

use super::bank::SoundBank;
use super::{AudioBackend, SoundCue};

/// Plays through the default output device
///
/// Each cue gets its own detached sink so overlapping cues mix. The
/// background track lives in a dedicated sink that is cleared on stop, so it
/// restarts from the beginning next time.
pub struct RodioAudio {
    // Dropping the stream silences every sink
    _stream: OutputStream,
    handle: OutputStreamHandle,
    bank: SoundBank,
    music: Sink,
    music_playing: bool,
}

impl RodioAudio {
    pub fn open(bank: SoundBank) -> Result<Self> {
        let (stream, handle) =
            OutputStream::try_default().context("Failed to open audio output device")?;
        let music = Sink::try_new(&handle).context("Failed to create music sink")?;
        music.pause();

        Ok(Self {
            _stream: stream,
            handle,
            bank,
            music,
            music_playing: false,
        })
    }
}

impl AudioBackend for RodioAudio {
    fn play(&mut self, cue: SoundCue) {
        let Some(clip) = self.bank.cue(cue) else {
            return;
        };

        match Sink::try_new(&self.handle) {
            Ok(sink) => {
                sink.append(clip.source());
                sink.detach();
            }
            Err(err) => warn!("Failed to play {:?} cue: {}", cue, err),
        }
    }

    fn set_music_playing(&mut self, playing: bool) {
        if playing == self.music_playing {
            return;
        }

        if playing {
            let track = self.bank.music();
            if !track.is_empty() {
                self.music.append(track.source().repeat_infinite());
            }
            self.music.play();
        } else {
            self.music.clear();
        }
        self.music_playing = playing;
    }
}
