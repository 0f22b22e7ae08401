//! Procedural sound effects
//!
//! No asset files; every effect is synthesized from oscillator sources and
//! played on its own detached sink. The output device is optional: when it
//! cannot be opened the manager logs once and every `play` is a no-op.

use rodio::source::{SineWave, Source, chirp};
use rodio::{OutputStream, OutputStreamBuilder, Sink};
use std::time::Duration;

const SAMPLE_RATE: u32 = 44_100;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Jump input accepted
    Flap,
    /// Obstacle passed
    Score,
    /// Collision, run over
    Hit,
    /// Run beat the stored best score
    NewBest,
}

/// Audio manager for the game
pub struct AudioManager {
    stream: Option<OutputStream>,
    volume: f32,
    muted: bool,
}

impl AudioManager {
    pub fn new() -> Self {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(stream) => Some(stream),
            Err(e) => {
                log::warn!("no audio output device, sound disabled: {e}");
                None
            }
        };
        Self {
            stream,
            volume: 0.3,
            muted: false,
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn toggle_muted(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }

    /// Play a sound effect in the background.
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(stream) = &self.stream else { return };

        let sink = Sink::connect_new(stream.mixer());
        match effect {
            SoundEffect::Flap => {
                // Quick upward sweep, like a wing snap.
                let sweep = chirp(
                    SAMPLE_RATE,
                    350.0,
                    620.0,
                    Duration::from_millis(70),
                )
                .amplify(vol * 0.6);
                sink.append(sweep);
            }
            SoundEffect::Score => {
                // Two-tone ding.
                sink.append(tone(880.0, 70, vol * 0.8));
                sink.append(tone(1318.0, 90, vol * 0.8));
            }
            SoundEffect::Hit => {
                // Falling sweep, 400 Hz down to 80 Hz.
                let sweep = chirp(
                    SAMPLE_RATE,
                    400.0,
                    80.0,
                    Duration::from_millis(400),
                )
                .amplify(vol);
                sink.append(sweep);
            }
            SoundEffect::NewBest => {
                // Short rising arpeggio.
                sink.append(tone(660.0, 90, vol * 0.8));
                sink.append(tone(880.0, 90, vol * 0.8));
                sink.append(tone(1100.0, 140, vol * 0.8));
            }
        }
        sink.detach();
    }
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

fn tone(freq: f32, millis: u64, amplitude: f32) -> impl Source<Item = f32> {
    SineWave::new(freq)
        .take_duration(Duration::from_millis(millis))
        .amplify(amplitude)
}
