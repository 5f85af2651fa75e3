//! Celebration cue played by the presentation layer after a boundary.
//!
//! The engine never plays anything itself. Callers check
//! [`Delivery::is_boundary`](crate::Delivery::is_boundary) and hand the tone
//! table to whatever [`ToneSink`] they have.

use thiserror::Error;
use tracing::debug;

/// One tone burst, offset from the start of the cue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency_hz: f32,
    pub start_secs: f32,
    pub duration_secs: f32,
}

const fn tone(frequency_hz: f32, start_secs: f32, duration_secs: f32) -> Tone {
    Tone {
        frequency_hz,
        start_secs,
        duration_secs,
    }
}

/// Rising arpeggio finishing on a held high C.
pub const CELEBRATION: [Tone; 6] = [
    tone(523.25, 0.0, 0.12),
    tone(659.25, 0.1, 0.12),
    tone(783.99, 0.2, 0.12),
    tone(1046.5, 0.3, 0.25),
    tone(783.99, 0.5, 0.1),
    tone(1046.5, 0.58, 0.35),
];

/// Seconds from the first tone starting to the last one ending.
pub fn cue_length(tones: &[Tone]) -> f32 {
    tones
        .iter()
        .map(|t| t.start_secs + t.duration_secs)
        .fold(0.0, f32::max)
}

#[derive(Debug, Error)]
pub enum CueError {
    #[error("no audio output available")]
    Unavailable,

    #[error("audio output failed: {0}")]
    Output(#[from] std::io::Error),
}

/// Somewhere tones can be sent.
pub trait ToneSink {
    fn play(&mut self, tones: &[Tone]) -> Result<(), CueError>;
}

/// Swallows every cue.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSink;

impl ToneSink for SilentSink {
    fn play(&mut self, _tones: &[Tone]) -> Result<(), CueError> {
        Ok(())
    }
}

/// Play the celebration on `sink`. Failures are logged and dropped.
pub fn celebrate(sink: &mut dyn ToneSink) {
    if let Err(err) = sink.play(&CELEBRATION) {
        debug!(error = %err, "celebration cue skipped");
    }
}
