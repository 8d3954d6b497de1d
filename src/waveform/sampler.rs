//! Amplitude to decibel conversion with noise-floor clipping.
//!
//! Raw PCM samples are rectified and mapped onto a log scale relative to
//! 16-bit full scale, then clipped to a fixed dynamic range so that silence
//! never produces -Inf and loud recordings never exceed 0 dBFS.

/// Lower bound of the usable dynamic range in dBFS. Anything quieter,
/// including digital silence, is clamped up to this value.
pub const NOISE_FLOOR_DB: f32 = -80.0;

/// Full-scale reference amplitude for 16-bit PCM.
pub const FULL_SCALE: f32 = 32768.0;

/// Converts a single amplitude to a clipped decibel level.
///
/// The amplitude is rectified before conversion, so negative samples map to
/// the same level as their positive counterparts. An amplitude of exactly
/// zero clamps to [`NOISE_FLOOR_DB`] instead of diverging to -Inf.
pub fn sample_to_db(amplitude: f32) -> f32 {
    let amplitude = amplitude.abs();
    if amplitude <= 0.0 || !amplitude.is_finite() {
        return NOISE_FLOOR_DB;
    }
    let db = 20.0 * (amplitude / FULL_SCALE).log10();
    db.clamp(NOISE_FLOOR_DB, 0.0)
}

/// Converts a block of 16-bit PCM samples to clipped decibel levels.
///
/// Output length always equals input length; the block is one channel's
/// worth of samples (or interleaved samples treated uniformly, matching the
/// downsampler's `channel_count` accounting).
pub fn samples_to_db(samples: &[i16]) -> Vec<f32> {
    samples
        .iter()
        .map(|&s| sample_to_db(s as f32))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_amplitude_clamps_to_noise_floor() {
        assert_eq!(sample_to_db(0.0), NOISE_FLOOR_DB);
        assert!(sample_to_db(0.0).is_finite());
    }

    #[test]
    fn test_reference_amplitudes() {
        // Half scale is -6.02 dBFS, full scale is 0 dBFS.
        let levels = samples_to_db(&[0, 16384, i16::MIN]);
        assert_eq!(levels.len(), 3);
        assert_eq!(levels[0], NOISE_FLOOR_DB);
        assert_relative_eq!(levels[1], 20.0 * 0.5f32.log10(), epsilon = 1e-4);
        assert_relative_eq!(levels[2], 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_negative_samples_rectified() {
        assert_eq!(sample_to_db(-16384.0), sample_to_db(16384.0));
    }

    #[test]
    fn test_quiet_samples_clip_to_floor() {
        // One count above silence is about -90 dBFS, below the floor.
        assert_eq!(sample_to_db(1.0), NOISE_FLOOR_DB);
    }

    #[test]
    fn test_non_finite_amplitude_clamps() {
        assert_eq!(sample_to_db(f32::NAN), NOISE_FLOOR_DB);
        assert_eq!(sample_to_db(f32::INFINITY), NOISE_FLOOR_DB);
    }
}
