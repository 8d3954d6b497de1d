//! Playback progress tracking.
//!
//! Maps elapsed playback time to a gradient-fill fraction over the current
//! bar sequence via a periodic, cancellable tick task.

pub mod tracker;

pub use tracker::{
    ProgressEvent, ProgressTracker, TrackerError, TrackerState, DEFAULT_TICK_INTERVAL,
};
