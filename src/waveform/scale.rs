//! Rescaling of a live metering sequence to a fixed bar count.
//!
//! While recording, levels accumulate at the metering rate and the sequence
//! grows without bound. When recording stops (or whenever a snapshot at a
//! fixed width is needed) the whole sequence is resampled to exactly the
//! requested number of bars: linear interpolation when stretching a short
//! sequence across more bars, block averaging when squeezing a long one.

/// Resamples `levels` to exactly `target_bars` display bars.
///
/// For each output index `i` the fractional source position is
/// `i / target_bars * levels.len()`. Upsampling interpolates between the two
/// bounding samples (falling back to the floor sample at the right edge);
/// downsampling averages every source sample from the previous output's
/// position through the current one, so consecutive bars cover contiguous,
/// non-overlapping-to-slightly-overlapping spans the way the reference
/// implementation does.
///
/// Pure function of its inputs: calling it twice with the same sequence
/// yields identical output. An empty sequence or a zero bar count yields an
/// empty result.
pub fn scale_to_fit(levels: &[f32], target_bars: usize) -> Vec<f32> {
    if levels.is_empty() || target_bars == 0 {
        return Vec::new();
    }

    let mut bars = Vec::with_capacity(target_bars);
    let mut last_position = 0usize;

    for index in 0..target_bars {
        let position = index as f32 / target_bars as f32 * levels.len() as f32;

        let height = if target_bars > levels.len() && position.floor() != position {
            let low = position.floor() as usize;
            let high = position.ceil() as usize;
            if high < levels.len() {
                levels[low] + (position - low as f32) * (levels[high] - levels[low])
            } else {
                levels[low]
            }
        } else {
            let span_end = position as usize;
            let sum: f32 = levels[last_position..=span_end].iter().sum();
            let steps = 1 + span_end - last_position;
            sum / steps as f32
        };

        last_position = position as usize;
        bars.push(height);
    }

    bars
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_downsampling_block_averages() {
        let levels = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8];
        let bars = scale_to_fit(&levels, 4);
        assert_eq!(bars.len(), 4);
        // First bar covers only source index 0.
        assert_relative_eq!(bars[0], 0.1);
        // Later bars average from the previous position through floor(pos).
        assert_relative_eq!(bars[1], (0.1 + 0.2 + 0.3) / 3.0);
    }

    #[test]
    fn test_upsampling_interpolates() {
        let bars = scale_to_fit(&[0.0, 1.0], 4);
        assert_eq!(bars.len(), 4);
        // position 0.5 lies midway between the two source samples.
        assert_relative_eq!(bars[1], 0.5);
        // position 1.5 has no ceiling neighbor, falls back to the floor value.
        assert_relative_eq!(bars[3], 1.0);
    }

    #[test]
    fn test_idempotent_for_unchanged_input() {
        let levels: Vec<f32> = (0..37).map(|i| (i as f32 * 0.1).sin().abs()).collect();
        assert_eq!(scale_to_fit(&levels, 10), scale_to_fit(&levels, 10));
    }

    #[test]
    fn test_exact_output_length() {
        for len in [1usize, 3, 10, 250] {
            let levels: Vec<f32> = (0..len).map(|i| i as f32).collect();
            assert_eq!(scale_to_fit(&levels, 60).len(), 60);
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(scale_to_fit(&[], 100).is_empty());
        assert!(scale_to_fit(&[0.5], 0).is_empty());
    }
}
