//! Audio recording with live waveform metering.
//!
//! Captures audio from the configured input device and appends one metering
//! level to the waveform widget per tick. Ctrl-C stops the recording, the
//! accumulated live sequence is rescaled to the display bar count, and the
//! final bars are printed. Recordings are not persisted.

use anyhow::anyhow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::time::MissedTickBehavior;

use crate::capture::{metering_level, AudioRecorder};
use crate::config::WavebarConfig;
use crate::widget::WaveformWidget;

/// Records from the microphone until Ctrl-C, then prints the rescaled bars.
///
/// # Errors
/// - If configuration cannot be loaded
/// - If the audio device cannot be opened
/// - If the signal handler cannot be registered
pub async fn handle_record() -> Result<(), anyhow::Error> {
    tracing::info!("=== wavebar recorder started ===");

    let config = WavebarConfig::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {e}");
        anyhow!("Configuration error: {e}")
    })?;

    tracing::info!(
        "Configuration loaded: device={}, sample_rate={}Hz, target_bars={}, tick={}ms",
        config.audio.device,
        config.audio.sample_rate,
        config.waveform.target_bars,
        config.waveform.tick_interval_ms
    );

    let mut recorder = AudioRecorder::new(config.audio.sample_rate, config.audio.device.clone());
    recorder.start().map_err(|e| {
        tracing::error!("Failed to start recording: {e}");
        anyhow!("Recording error: {e}. Check your audio configuration and try again.")
    })?;
    let sample_rate = recorder.sample_rate();

    let stop = Arc::new(AtomicBool::new(false));
    let stop_flag = Arc::clone(&stop);
    ctrlc::set_handler(move || {
        stop_flag.store(true, Ordering::SeqCst);
    })
    .map_err(|e| anyhow!("Failed to register signal handler: {e}"))?;

    let (mut widget, _events) =
        WaveformWidget::new(config.waveform.target_bars, config.tick_interval());

    println!("Recording... press Ctrl-C to stop.");

    let mut ticker = tokio::time::interval(config.tick_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // Skip the immediately-resolving first tick.
    ticker.tick().await;

    let mut tick_count = 0u64;
    while !stop.load(Ordering::SeqCst) {
        ticker.tick().await;

        // Metering runs on the widget's owning context: the snapshot is
        // taken here, never inside the audio callback.
        let samples = recorder.samples();
        let level = metering_level(&samples, sample_rate);
        widget
            .add_level(level)
            .map_err(|e| anyhow!("Metering append failed: {e}"))?;

        tick_count += 1;
        if tick_count % 100 == 0 {
            let duration_secs = samples.len() as f32 / sample_rate as f32;
            tracing::debug!(
                "Recording: {:.1}s, {} metering levels",
                duration_secs,
                widget.current_bars().len()
            );
        }
    }

    let samples = recorder.stop();
    let duration_secs = samples.len() as f32 / sample_rate as f32;

    let bars = widget.finalize_recording();
    if bars.is_empty() {
        println!("Nothing recorded.");
        return Ok(());
    }

    tracing::info!(
        "Recording finalized: {:.2}s rescaled to {} bars",
        duration_secs,
        bars.len()
    );

    println!();
    println!(
        "Recorded {:.2}s at {}Hz, {} bars:",
        duration_secs,
        sample_rate,
        bars.len()
    );
    println!("{}", format_bars(&bars));

    Ok(())
}

/// Formats bar heights as a space-separated line of two-decimal values.
pub fn format_bars(bars: &[f32]) -> String {
    bars.iter()
        .map(|v| format!("{v:.2}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bars() {
        assert_eq!(format_bars(&[0.0, 0.5, 1.0]), "0.00 0.50 1.00");
        assert_eq!(format_bars(&[]), "");
    }
}
