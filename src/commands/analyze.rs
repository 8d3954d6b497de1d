//! Whole-file waveform analysis command.

use std::path::PathBuf;

use crate::commands::record::format_bars;
use crate::config::WavebarConfig;
use crate::waveform;

/// Analyzes a WAV file into normalized display bars and prints them.
///
/// # Errors
/// - If configuration cannot be loaded
/// - If the file cannot be read or analyzed
pub async fn handle_analyze(file: PathBuf, bars: Option<usize>) -> Result<(), anyhow::Error> {
    let config = WavebarConfig::load()?;
    let target_bars = bars.unwrap_or(config.waveform.target_bars);

    tracing::info!(
        "Analyzing {} into {} bars",
        file.display(),
        target_bars
    );

    let analysis = waveform::analyze_wav_async(file.clone(), target_bars).await?;

    println!(
        "{}: {:.2}s, {}Hz, {} channel(s), {} bars",
        file.display(),
        analysis.duration_secs,
        analysis.sample_rate,
        analysis.channels,
        analysis.bars.len()
    );
    println!("{}", format_bars(&analysis.bars));

    Ok(())
}
