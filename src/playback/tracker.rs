//! Time-driven playback progress tracking.
//!
//! A [`ProgressTracker`] owns an ephemeral playback session: a periodic
//! tokio tick task accumulates elapsed time against a target duration and
//! publishes progress fractions to a consumer channel. When the target is
//! reached the session completes exactly once, tears down its tick task and
//! returns to idle. Pausing preserves elapsed time; resuming continues from
//! it. A generation counter invalidates ticks that were already scheduled
//! when the session was paused or stopped, so no stale tick can mutate
//! state after teardown.

use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Default interval between progress ticks.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Progress tracking misuse by the caller.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TrackerError {
    /// Pause was requested while no session is running.
    #[error("cannot pause progress tracking that is not running")]
    NotRunning,

    /// Resume or stop was requested with no session started.
    #[error("no playback session to resume or stop")]
    NotStarted,
}

/// Lifecycle state of the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackerState {
    #[default]
    Idle,
    Running,
    Paused,
}

/// Event published to the consumer on every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProgressEvent {
    /// Elapsed fraction of the target duration, in [0, 1).
    Progress(f32),
    /// The session reached its target duration or was stopped.
    Finished,
}

/// What a single tick did to the session.
#[derive(Debug, PartialEq)]
enum TickOutcome {
    Progress(f32),
    Complete,
}

/// Mutable session state shared with the tick task.
#[derive(Debug, Default)]
struct Session {
    state: TrackerState,
    elapsed: f64,
    target: f64,
    generation: u64,
}

impl Session {
    /// Advances elapsed time by one tick interval. Reaching the target
    /// completes the session: elapsed resets and the state returns to idle.
    fn advance(&mut self, interval: f64) -> TickOutcome {
        self.elapsed += interval;
        if self.elapsed >= self.target {
            self.elapsed = 0.0;
            self.state = TrackerState::Idle;
            self.generation += 1;
            TickOutcome::Complete
        } else {
            TickOutcome::Progress((self.elapsed / self.target) as f32)
        }
    }
}

/// Periodic tick source driving a playback progress session.
pub struct ProgressTracker {
    interval: Duration,
    session: Arc<Mutex<Session>>,
    events: mpsc::UnboundedSender<ProgressEvent>,
    task: Option<JoinHandle<()>>,
}

impl ProgressTracker {
    /// Creates a tracker and the receiving end of its event channel.
    pub fn new(interval: Duration) -> (Self, mpsc::UnboundedReceiver<ProgressEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let tracker = Self {
            interval,
            session: Arc::new(Mutex::new(Session::default())),
            events,
            task: None,
        };
        (tracker, receiver)
    }

    /// Starts a session against `target_duration`, or resumes a paused one.
    ///
    /// From idle, elapsed starts at zero. Re-entering `start` while paused
    /// resumes tick delivery without resetting elapsed (the target is left
    /// unchanged); while running it is a no-op.
    pub fn start(&mut self, target_duration: Duration) {
        {
            let mut session = self.session.lock().unwrap();
            match session.state {
                TrackerState::Running => return,
                TrackerState::Paused => {
                    session.state = TrackerState::Running;
                    session.generation += 1;
                }
                TrackerState::Idle => {
                    session.state = TrackerState::Running;
                    session.elapsed = 0.0;
                    session.target = target_duration.as_secs_f64();
                    session.generation += 1;
                }
            }
        }
        tracing::debug!(
            "Progress tracking started: target {:.2}s, tick {}ms",
            target_duration.as_secs_f64(),
            self.interval.as_millis()
        );
        self.spawn_ticker();
    }

    /// Resumes a paused session from its preserved elapsed time.
    ///
    /// # Errors
    /// - [`TrackerError::NotStarted`] if no session exists (idle)
    pub fn resume(&mut self) -> Result<(), TrackerError> {
        {
            let mut session = self.session.lock().unwrap();
            match session.state {
                TrackerState::Running => return Ok(()),
                TrackerState::Idle => return Err(TrackerError::NotStarted),
                TrackerState::Paused => {
                    session.state = TrackerState::Running;
                    session.generation += 1;
                }
            }
        }
        tracing::debug!("Progress tracking resumed");
        self.spawn_ticker();
        Ok(())
    }

    /// Pauses the running session, preserving elapsed time.
    ///
    /// # Errors
    /// - [`TrackerError::NotRunning`] if no session is running
    pub fn pause(&mut self) -> Result<(), TrackerError> {
        {
            let mut session = self.session.lock().unwrap();
            if session.state != TrackerState::Running {
                return Err(TrackerError::NotRunning);
            }
            session.state = TrackerState::Paused;
            // Invalidate any tick already scheduled before teardown.
            session.generation += 1;
        }
        self.teardown_ticker();
        tracing::debug!("Progress tracking paused");
        Ok(())
    }

    /// Stops the session: tears down the tick task, resets elapsed and
    /// fires the completion event.
    ///
    /// # Errors
    /// - [`TrackerError::NotStarted`] if the tracker is idle
    pub fn stop(&mut self) -> Result<(), TrackerError> {
        {
            let mut session = self.session.lock().unwrap();
            if session.state == TrackerState::Idle {
                return Err(TrackerError::NotStarted);
            }
            session.state = TrackerState::Idle;
            session.elapsed = 0.0;
            session.generation += 1;
        }
        self.teardown_ticker();
        let _ = self.events.send(ProgressEvent::Finished);
        tracing::debug!("Progress tracking stopped");
        Ok(())
    }

    pub fn state(&self) -> TrackerState {
        self.session.lock().unwrap().state
    }

    /// Elapsed session time in seconds (preserved across pauses).
    pub fn elapsed(&self) -> f64 {
        self.session.lock().unwrap().elapsed
    }

    fn spawn_ticker(&mut self) {
        self.teardown_ticker();

        let session = Arc::clone(&self.session);
        let events = self.events.clone();
        let interval = self.interval;
        let interval_secs = interval.as_secs_f64();
        let generation = session.lock().unwrap().generation;

        self.task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick of a tokio interval resolves immediately;
            // elapsed time only starts accumulating one interval later.
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let outcome = {
                    let mut session = session.lock().unwrap();
                    if session.generation != generation {
                        // The session was paused, stopped or restarted
                        // while this tick was in flight.
                        break;
                    }
                    session.advance(interval_secs)
                };
                match outcome {
                    TickOutcome::Progress(fraction) => {
                        if events.send(ProgressEvent::Progress(fraction)).is_err() {
                            break;
                        }
                    }
                    TickOutcome::Complete => {
                        let _ = events.send(ProgressEvent::Finished);
                        break;
                    }
                }
            }
        }));
    }

    fn teardown_ticker(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.teardown_ticker();
    }
}
