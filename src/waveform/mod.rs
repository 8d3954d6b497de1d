//! Waveform extraction and leveling pipeline.
//!
//! Turns either a live stream of metering levels or an entire decoded audio
//! file into a fixed-length sequence of normalized bar heights in [0, 1]:
//!
//! - [`sampler`]: amplitude → decibel conversion with noise-floor clipping
//! - [`downsample`]: block-average decimation for whole-file analysis
//! - [`normalize`]: min-max normalization to bar-height percentages
//! - [`scale`]: live-sequence rescaling to a fixed display bar count
//! - [`buffer`]: the mode-tagged live/fixed bar container
//! - [`analysis`]: the WAV file → bars pipeline

pub mod analysis;
pub mod buffer;
pub mod downsample;
pub mod normalize;
pub mod sampler;
pub mod scale;

pub use analysis::{analyze_wav, analyze_wav_async, Analysis};
pub use buffer::{BufferError, Mode, WaveformBuffer};
pub use downsample::DEFAULT_TARGET_BARS;
