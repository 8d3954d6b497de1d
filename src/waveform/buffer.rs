//! Mode-tagged container for the current bar sequence.
//!
//! A [`WaveformBuffer`] holds one growing live sequence (fed by metering
//! callbacks while recording or monitoring playback) and one fixed sequence
//! (the final display bars). A mode tag enforces the lifecycle: appending is
//! a write-mode operation, and installing fixed bars moves the buffer to
//! read mode. Mode violations are programming errors surfaced as typed
//! errors so callers can assert on them instead of crashing.

use thiserror::Error;

use super::scale;

/// Buffer lifecycle violation.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum BufferError {
    /// Appended a live level while the buffer holds a fixed sequence.
    #[error("cannot append live levels while in read mode")]
    AppendInReadMode,
}

/// Lifecycle mode of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Neither sequence populated yet (initial state, or after reset).
    #[default]
    Unset,
    /// Live levels are being appended in arrival order.
    Live,
    /// A finite, final bar sequence is installed.
    Fixed,
}

/// Owns the live and fixed level sequences plus their mode tag.
#[derive(Debug, Default)]
pub struct WaveformBuffer {
    live: Vec<f32>,
    fixed: Vec<f32>,
    mode: Mode,
}

impl WaveformBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one live metering level, promoting an unset buffer to live
    /// mode. Non-finite levels clamp to 0.0 and all levels clamp to [0, 1]
    /// before acceptance; arrival order is preserved.
    ///
    /// # Errors
    /// - [`BufferError::AppendInReadMode`] if a fixed sequence is installed
    pub fn push_live(&mut self, level: f32) -> Result<(), BufferError> {
        if self.mode == Mode::Fixed {
            return Err(BufferError::AppendInReadMode);
        }
        self.mode = Mode::Live;
        self.live.push(clamp_level(level));
        Ok(())
    }

    /// Replaces the fixed sequence, moving the buffer to read mode from any
    /// prior state. Used when loading precomputed bars from file analysis or
    /// when a recording is finalized.
    pub fn replace_fixed(&mut self, levels: Vec<f32>) {
        self.fixed = levels;
        self.mode = Mode::Fixed;
    }

    /// Rescales the live sequence to `target_bars` and installs the result
    /// as the fixed sequence. An empty live sequence returns an empty vec
    /// and leaves the fixed sequence (and mode) untouched.
    pub fn scale_live_to(&mut self, target_bars: usize) -> Vec<f32> {
        if self.live.is_empty() {
            return Vec::new();
        }
        let bars = scale::scale_to_fit(&self.live, target_bars);
        self.replace_fixed(bars.clone());
        bars
    }

    /// Clears both sequences and returns the mode to its initial state.
    pub fn reset(&mut self) {
        self.live.clear();
        self.fixed.clear();
        self.mode = Mode::Unset;
    }

    /// Returns the bars a renderer should draw right now: the fixed
    /// sequence when present, otherwise the live sequence. The fallback
    /// lets a consumer show live progress before the final bars exist.
    pub fn current_bars(&self) -> &[f32] {
        if !self.fixed.is_empty() {
            &self.fixed
        } else {
            &self.live
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Number of live levels accumulated so far.
    pub fn live_len(&self) -> usize {
        self.live.len()
    }
}

/// Clamps a level into [0, 1]; NaN and infinities become 0.0.
fn clamp_level(level: f32) -> f32 {
    if level.is_finite() {
        level.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_promotes_to_live_mode() {
        let mut buffer = WaveformBuffer::new();
        assert_eq!(buffer.mode(), Mode::Unset);
        buffer.push_live(0.3).unwrap();
        assert_eq!(buffer.mode(), Mode::Live);
        assert_eq!(buffer.current_bars(), &[0.3]);
    }

    #[test]
    fn test_append_rejected_in_read_mode() {
        let mut buffer = WaveformBuffer::new();
        buffer.replace_fixed(vec![0.1, 0.2]);
        assert_eq!(buffer.push_live(0.5), Err(BufferError::AppendInReadMode));
        assert_eq!(buffer.current_bars(), &[0.1, 0.2]);
    }

    #[test]
    fn test_fixed_takes_precedence_over_live() {
        let mut buffer = WaveformBuffer::new();
        buffer.push_live(0.4).unwrap();
        buffer.replace_fixed(vec![0.9]);
        assert_eq!(buffer.current_bars(), &[0.9]);
    }

    #[test]
    fn test_scale_live_installs_fixed() {
        let mut buffer = WaveformBuffer::new();
        for level in [0.1, 0.2, 0.3, 0.4] {
            buffer.push_live(level).unwrap();
        }
        let bars = buffer.scale_live_to(2);
        assert_eq!(bars.len(), 2);
        assert_eq!(buffer.mode(), Mode::Fixed);
        assert_eq!(buffer.current_bars(), bars.as_slice());
    }

    #[test]
    fn test_scale_empty_live_leaves_fixed_untouched() {
        let mut buffer = WaveformBuffer::new();
        buffer.replace_fixed(vec![0.7]);
        buffer.reset();
        assert!(buffer.scale_live_to(10).is_empty());
        assert_eq!(buffer.mode(), Mode::Unset);
        assert!(buffer.current_bars().is_empty());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut buffer = WaveformBuffer::new();
        buffer.push_live(0.5).unwrap();
        buffer.replace_fixed(vec![0.6]);
        buffer.reset();
        assert_eq!(buffer.mode(), Mode::Unset);
        assert!(buffer.current_bars().is_empty());
        assert_eq!(buffer.live_len(), 0);
    }

    #[test]
    fn test_levels_are_clamped() {
        let mut buffer = WaveformBuffer::new();
        buffer.push_live(f32::NAN).unwrap();
        buffer.push_live(3.0).unwrap();
        buffer.push_live(-1.0).unwrap();
        assert_eq!(buffer.current_bars(), &[0.0, 1.0, 0.0]);
    }
}
