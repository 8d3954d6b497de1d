//! Min-max normalization of level sequences.
//!
//! Maps a finite sequence of decibel levels onto bar-height percentages
//! using the range of the absolute values. The formula is
//! `|1 - delta / (v - min)|` with `delta = max - min`, which inverts and
//! offsets the usual range scaling: values at the minimum clamp to 1.0 and
//! values at the maximum map to 0.0. Since dB levels here are negative with
//! the quietest at the minimum, quiet slices end up tall-clamped and loud
//! slices near zero of the inverted scale, matching the reference widget's
//! rendered output exactly.

/// Sentinel emitted where the formula would divide by zero (`v == min`).
const ZERO_RANGE_SENTINEL: f32 = 1.0;

/// Normalizes a level sequence to bar-height percentages.
///
/// The empty sequence maps to the empty sequence. Every output element is
/// finite: elements equal to the minimum clamp to [`ZERO_RANGE_SENTINEL`]
/// instead of dividing by zero. Output length always equals input length.
pub fn percentages(levels: &[f32]) -> Vec<f32> {
    if levels.is_empty() {
        return Vec::new();
    }

    let abs: Vec<f32> = levels.iter().map(|v| v.abs()).collect();
    let min = abs.iter().copied().fold(f32::INFINITY, f32::min);
    let max = abs.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let delta = max - min;

    abs.iter()
        .map(|&v| {
            if v == min {
                ZERO_RANGE_SENTINEL
            } else {
                (1.0 - delta / (v - min)).abs()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_example() {
        // min 0.2, max 0.8, delta 0.6:
        //   0.2 -> sentinel 1.0 (v == min)
        //   0.5 -> |1 - 0.6/0.3| = 1.0
        //   0.8 -> |1 - 0.6/0.6| = 0.0
        let bars = percentages(&[0.2, 0.5, 0.8]);
        assert_relative_eq!(bars[0], 1.0);
        assert_relative_eq!(bars[1], 1.0, epsilon = 1e-5);
        assert_relative_eq!(bars[2], 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_length_and_finiteness() {
        let input = [-80.0, -42.5, -13.0, -0.5, 0.0, -80.0];
        let bars = percentages(&input);
        assert_eq!(bars.len(), input.len());
        assert!(bars.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_negative_levels_use_absolute_values() {
        // dB levels are negative; abs flips them before min/max.
        assert_eq!(percentages(&[-0.2, -0.5, -0.8]), percentages(&[0.2, 0.5, 0.8]));
    }

    #[test]
    fn test_empty_input() {
        assert!(percentages(&[]).is_empty());
    }

    #[test]
    fn test_constant_input_clamps_to_sentinel() {
        // Zero range: every element equals the minimum.
        let bars = percentages(&[-40.0, -40.0, -40.0]);
        assert_eq!(bars, vec![ZERO_RANGE_SENTINEL; 3]);
    }
}
