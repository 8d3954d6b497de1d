//! Instantaneous metering levels from captured samples.
//!
//! Converts the most recent window of PCM samples to a linear power
//! fraction in [0, 1]: RMS relative to 16-bit full scale, which is the
//! linear equivalent of `10^(0.05 * averagePowerDb)`. One level is computed
//! per metering tick and appended to the widget's live sequence.

/// Window used for the RMS computation, as a fraction of a second.
/// Matches the 50ms metering tick.
const WINDOW_DIVISOR: u32 = 20;

/// Computes the metering level for the most recent sample window.
///
/// Returns the RMS amplitude of the last `sample_rate / 20` samples (50ms)
/// normalized to [0, 1]. Silence and an empty buffer both yield 0.0.
pub fn metering_level(samples: &[i16], sample_rate: u32) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }

    let window = std::cmp::min(sample_rate / WINDOW_DIVISOR, samples.len() as u32) as usize;
    let recent = &samples[samples.len() - window..];

    let sum_of_squares: i64 = recent.iter().map(|&x| (x as i64).pow(2)).sum();
    let mean_square = sum_of_squares / recent.len() as i64;
    let rms = (mean_square as f32).sqrt();

    (rms / 32768.0).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_buffer_is_silent() {
        assert_eq!(metering_level(&[], 16000), 0.0);
    }

    #[test]
    fn test_silence_is_zero() {
        assert_eq!(metering_level(&[0; 1600], 16000), 0.0);
    }

    #[test]
    fn test_constant_amplitude() {
        // RMS of a constant signal equals its amplitude.
        let samples = vec![16384i16; 1600];
        assert_relative_eq!(metering_level(&samples, 16000), 0.5, epsilon = 1e-3);
    }

    #[test]
    fn test_only_recent_window_counts() {
        // Loud history, silent tail: the level reflects the tail only.
        let mut samples = vec![i16::MAX; 16000];
        samples.extend(std::iter::repeat(0i16).take(800));
        assert_eq!(metering_level(&samples, 16000), 0.0);
    }

    #[test]
    fn test_short_buffer_uses_what_exists() {
        let samples = vec![16384i16; 10];
        assert_relative_eq!(metering_level(&samples, 16000), 0.5, epsilon = 1e-3);
    }
}
