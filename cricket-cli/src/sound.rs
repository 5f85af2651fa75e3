use std::io::Write;

use cricket_core::cue::{CueError, Tone, ToneSink};

/// Rings the terminal bell once per cue. Terminals cannot play pitches, so
/// the tone table only decides whether there is anything to ring.
pub struct BellSink<W: Write> {
    out: W,
}

impl BellSink<std::io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write> BellSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> ToneSink for BellSink<W> {
    fn play(&mut self, tones: &[Tone]) -> Result<(), CueError> {
        if tones.is_empty() {
            return Ok(());
        }
        self.out.write_all(b"\x07")?;
        self.out.flush()?;
        Ok(())
    }
}
