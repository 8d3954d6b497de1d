//! Waveform widget façade.
//!
//! A [`WaveformWidget`] is the single owner of one [`WaveformBuffer`] and
//! one [`ProgressTracker`], tying the leveling pipeline to the progress
//! state machine. Producers (metering callbacks, file analysis) feed it on
//! the owning context; consumers observe progress through the widget's
//! event channel instead of any global notification bus, so multiple
//! widgets coexist independently.

use std::time::Duration;
use tokio::sync::mpsc;

use crate::playback::{ProgressEvent, ProgressTracker, TrackerError, TrackerState};
use crate::waveform::{BufferError, Mode, WaveformBuffer};

/// One waveform visualization instance: bar data plus playback progress.
pub struct WaveformWidget {
    buffer: WaveformBuffer,
    tracker: ProgressTracker,
    target_bars: usize,
}

impl WaveformWidget {
    /// Creates a widget and the receiver for its progress events.
    ///
    /// `target_bars` is the fixed display bar count live recordings are
    /// rescaled to; `tick_interval` drives the progress tracker.
    pub fn new(
        target_bars: usize,
        tick_interval: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<ProgressEvent>) {
        let (tracker, events) = ProgressTracker::new(tick_interval);
        let widget = Self {
            buffer: WaveformBuffer::new(),
            tracker,
            target_bars,
        };
        (widget, events)
    }

    // Bar data

    /// Appends one live metering level (write mode).
    ///
    /// # Errors
    /// - [`BufferError::AppendInReadMode`] if fixed bars are installed
    pub fn add_level(&mut self, level: f32) -> Result<(), BufferError> {
        self.buffer.push_live(level)
    }

    /// Installs precomputed bars (read mode), e.g. from file analysis.
    pub fn set_levels(&mut self, levels: Vec<f32>) {
        self.buffer.replace_fixed(levels);
    }

    /// Rescales the accumulated live levels to the display bar count and
    /// installs them as the fixed sequence. Returns the new bars; empty if
    /// nothing was recorded.
    pub fn finalize_recording(&mut self) -> Vec<f32> {
        self.buffer.scale_live_to(self.target_bars)
    }

    /// Bars to render right now (fixed if present, else live).
    pub fn current_bars(&self) -> &[f32] {
        self.buffer.current_bars()
    }

    pub fn mode(&self) -> Mode {
        self.buffer.mode()
    }

    /// Clears bar data and any progress session.
    pub fn reset(&mut self) {
        if self.tracker.state() != TrackerState::Idle {
            // Stop cannot fail outside idle.
            let _ = self.tracker.stop();
        }
        self.buffer.reset();
    }

    // Playback progress

    /// Starts (or resumes) progress tracking over `duration`.
    pub fn start_progress(&mut self, duration: Duration) {
        self.tracker.start(duration);
    }

    /// Pauses progress tracking, preserving elapsed time.
    ///
    /// # Errors
    /// - [`TrackerError::NotRunning`] if nothing is running
    pub fn pause_progress(&mut self) -> Result<(), TrackerError> {
        self.tracker.pause()
    }

    /// Resumes paused progress tracking.
    ///
    /// # Errors
    /// - [`TrackerError::NotStarted`] if no session exists
    pub fn resume_progress(&mut self) -> Result<(), TrackerError> {
        self.tracker.resume()
    }

    /// Stops progress tracking and fires the completion event.
    ///
    /// # Errors
    /// - [`TrackerError::NotStarted`] if the tracker is idle
    pub fn stop_progress(&mut self) -> Result<(), TrackerError> {
        self.tracker.stop()
    }

    pub fn progress_state(&self) -> TrackerState {
        self.tracker.state()
    }

    /// Elapsed seconds of the current progress session.
    pub fn elapsed(&self) -> f64 {
        self.tracker.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    #[test]
    fn test_live_then_finalize() {
        let (mut widget, _events) = WaveformWidget::new(4, Duration::from_millis(50));
        for level in [0.1, 0.3, 0.5, 0.7, 0.9, 0.2, 0.4, 0.6] {
            widget.add_level(level).unwrap();
        }
        assert_eq!(widget.mode(), Mode::Live);
        assert_eq!(widget.current_bars().len(), 8);

        let bars = widget.finalize_recording();
        assert_eq!(bars.len(), 4);
        assert_eq!(widget.mode(), Mode::Fixed);
        assert_eq!(widget.current_bars(), bars.as_slice());

        // Appending after finalize is a mode violation, not a crash.
        assert!(widget.add_level(0.5).is_err());
    }

    #[test]
    fn test_reset_returns_to_initial_state() {
        let (mut widget, _events) = WaveformWidget::new(10, Duration::from_millis(50));
        widget.set_levels(vec![0.5; 10]);
        widget.reset();
        assert_eq!(widget.mode(), Mode::Unset);
        assert!(widget.current_bars().is_empty());
        widget.add_level(0.2).unwrap();
    }

    #[tokio::test]
    async fn test_progress_events_flow_through_widget() {
        let (mut widget, mut events) = WaveformWidget::new(10, Duration::from_millis(10));
        widget.set_levels(vec![0.5; 10]);
        widget.start_progress(Duration::from_millis(30));

        let mut saw_progress = false;
        loop {
            match timeout(Duration::from_secs(2), events.recv()).await {
                Ok(Some(ProgressEvent::Progress(fraction))) => {
                    assert!(fraction < 1.0);
                    saw_progress = true;
                }
                Ok(Some(ProgressEvent::Finished)) => break,
                other => panic!("unexpected event: {other:?}"),
            }
        }
        assert!(saw_progress);
        assert_eq!(widget.progress_state(), TrackerState::Idle);
    }

    #[tokio::test]
    async fn test_independent_widgets() {
        // No shared singleton: two widgets track independently.
        let (mut a, _ea) = WaveformWidget::new(10, Duration::from_millis(10));
        let (mut b, _eb) = WaveformWidget::new(10, Duration::from_millis(10));
        a.start_progress(Duration::from_secs(60));
        assert_eq!(a.progress_state(), TrackerState::Running);
        assert_eq!(b.progress_state(), TrackerState::Idle);
        assert!(b.pause_progress().is_err());
        a.stop_progress().unwrap();
    }
}
