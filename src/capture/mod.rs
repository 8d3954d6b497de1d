//! Audio capture feature for wavebar.
//!
//! Provides microphone capture and instantaneous metering levels that feed
//! the waveform widget's live sequence.

pub mod audio;
pub mod meter;

pub use audio::{suppress_alsa_warnings, AudioRecorder};
pub use meter::metering_level;
