//! Playback progress visualization command.
//!
//! Analyzes a WAV file into fixed bars, installs them in a widget, and
//! drives the progress tracker over the file's duration, reporting the
//! gradient-fill percentage as it advances.

use anyhow::anyhow;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::WavebarConfig;
use crate::playback::ProgressEvent;
use crate::waveform;
use crate::widget::WaveformWidget;

/// Runs the playback progress visualization for a file.
///
/// `duration_override` replaces the file's own duration, which is useful
/// for quickly exercising the tracker against long recordings.
///
/// # Errors
/// - If configuration cannot be loaded
/// - If the file cannot be analyzed
pub async fn handle_play(
    file: PathBuf,
    duration_override: Option<f64>,
) -> Result<(), anyhow::Error> {
    let config = WavebarConfig::load()?;

    let analysis =
        waveform::analyze_wav_async(file.clone(), config.waveform.target_bars).await?;
    let duration_secs = duration_override.unwrap_or(analysis.duration_secs);
    if duration_secs <= 0.0 {
        return Err(anyhow!("Playback duration must be positive"));
    }

    tracing::info!(
        "Playing {}: {} bars over {:.2}s",
        file.display(),
        analysis.bars.len(),
        duration_secs
    );

    let (mut widget, mut events) =
        WaveformWidget::new(config.waveform.target_bars, config.tick_interval());
    widget.set_levels(analysis.bars);

    println!(
        "{}: {} bars, {:.2}s",
        file.display(),
        widget.current_bars().len(),
        duration_secs
    );

    widget.start_progress(Duration::from_secs_f64(duration_secs));

    while let Some(event) = events.recv().await {
        match event {
            ProgressEvent::Progress(fraction) => {
                print!("\rprogress: {:5.1}%", fraction * 100.0);
                use std::io::Write;
                std::io::stdout().flush().ok();
            }
            ProgressEvent::Finished => {
                println!("\rprogress: 100.0%");
                break;
            }
        }
    }

    println!("Playback visualization finished.");
    tracing::info!("Playback visualization finished after {:.2}s", duration_secs);

    Ok(())
}
