//! wavebar: waveform extraction and playback progress tracking.
//!
//! The core is the leveling pipeline ([`waveform`]) that turns live
//! metering levels or whole decoded audio files into normalized bar
//! heights, plus the tick-driven progress state machine ([`playback`]) that
//! maps elapsed playback time to a fill fraction over those bars. The
//! [`widget`] module ties one buffer and one tracker together per
//! visualization instance; [`capture`] is the cpal-backed producer feeding
//! live metering.

pub mod app;
pub mod capture;
pub mod commands;
pub mod config;
pub mod logging;
pub mod playback;
pub mod waveform;
pub mod widget;
