//! Whole-file waveform analysis.
//!
//! Reads decoded PCM frames from a WAV file and runs them through the
//! leveling pipeline: amplitude → decibel conversion, block-average
//! decimation to the target bar count, then min-max normalization to bar
//! heights. Decoding and analysis are blocking work and run off the async
//! runtime's worker threads via `spawn_blocking`; the tick-delivery path
//! never waits on them.

use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

use super::{downsample, normalize, sampler};

/// Result of analyzing an audio file.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Normalized bar heights, roughly `target_bars` long (the decimation
    /// remainder may add one).
    pub bars: Vec<f32>,
    /// Total playback duration in seconds.
    pub duration_secs: f64,
    pub sample_rate: u32,
    pub channels: usize,
}

/// Computes normalized bar heights from raw interleaved PCM samples.
///
/// This is the file-mode pipeline in one place, usable directly when a
/// collaborator already delivers decoded frames.
pub fn analyze_samples(samples: &[i16], channels: usize, target_bars: usize) -> Vec<f32> {
    let db_levels = sampler::samples_to_db(samples);
    let bars = downsample::downsample(&db_levels, target_bars, channels);
    normalize::percentages(&bars)
}

/// Reads a 16-bit PCM WAV file and analyzes it into display bars.
///
/// # Errors
/// - If the file cannot be opened or is not a WAV
/// - If the sample format is not 16-bit integer PCM
/// - If no samples can be read
pub fn analyze_wav(path: &Path, target_bars: usize) -> Result<Analysis> {
    let reader = hound::WavReader::open(path)
        .with_context(|| format!("Failed to open audio file: {}", path.display()))?;

    let spec = reader.spec();
    if spec.sample_format != hound::SampleFormat::Int || spec.bits_per_sample != 16 {
        return Err(anyhow!(
            "Unsupported sample format: {:?} {} bit (expected 16-bit integer PCM)",
            spec.sample_format,
            spec.bits_per_sample
        ));
    }

    let channels = spec.channels as usize;
    let sample_rate = spec.sample_rate;

    let samples: Vec<i16> = reader
        .into_samples::<i16>()
        .collect::<Result<_, _>>()
        .with_context(|| format!("Failed to read samples from {}", path.display()))?;

    if samples.is_empty() {
        return Err(anyhow!("Audio file contains no samples: {}", path.display()));
    }

    let total_frames = samples.len() / channels;
    let duration_secs = total_frames as f64 / sample_rate as f64;

    tracing::debug!(
        "Analyzing {}: {} samples, {} channels, {}Hz, {:.2}s",
        path.display(),
        samples.len(),
        channels,
        sample_rate,
        duration_secs
    );

    let bars = analyze_samples(&samples, channels, target_bars);

    tracing::info!(
        "Analysis complete: {} bars from {:.2}s of audio",
        bars.len(),
        duration_secs
    );

    Ok(Analysis {
        bars,
        duration_secs,
        sample_rate,
        channels,
    })
}

/// Runs [`analyze_wav`] on a blocking worker thread.
///
/// # Errors
/// - Same as [`analyze_wav`], plus task join failure
pub async fn analyze_wav_async(path: PathBuf, target_bars: usize) -> Result<Analysis> {
    tokio::task::spawn_blocking(move || analyze_wav(&path, target_bars))
        .await
        .map_err(|e| anyhow!("Analysis task failed: {e}"))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_samples_pipeline() {
        // A short ramp: quiet start, loud end. Bars must be finite and the
        // quietest block must clamp to the normalizer sentinel.
        let samples: Vec<i16> = (0..400).map(|i| (i * 80) as i16).collect();
        let bars = analyze_samples(&samples, 1, 10);
        assert!(!bars.is_empty());
        assert!(bars.iter().all(|v| v.is_finite()));
        assert!(bars.contains(&1.0));
    }

    #[test]
    fn test_analyze_samples_empty() {
        assert!(analyze_samples(&[], 1, 10).is_empty());
    }

    #[test]
    fn test_analyze_wav_roundtrip() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("wavebar_test_{}.wav", std::process::id()));

        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for i in 0..8000u32 {
            let t = i as f32 / 8000.0;
            let amplitude = (t * 440.0 * std::f32::consts::TAU).sin() * 12000.0;
            writer.write_sample(amplitude as i16).unwrap();
        }
        writer.finalize().unwrap();

        let analysis = analyze_wav(&path, 50).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(analysis.sample_rate, 8000);
        assert_eq!(analysis.channels, 1);
        assert!((analysis.duration_secs - 1.0).abs() < 1e-6);
        assert!(analysis.bars.len() >= 50);
        assert!(analysis.bars.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_analyze_wav_missing_file() {
        let err = analyze_wav(Path::new("/nonexistent/file.wav"), 100);
        assert!(err.is_err());
    }
}
