//! Block-average decimation of level sequences.
//!
//! Reduces an arbitrarily long decibel-level sequence to roughly a target
//! bar count by averaging non-overlapping blocks. The final partial block is
//! averaged over its own length so the last bar is not underweighted.

/// Default number of bars produced for whole-file analysis.
pub const DEFAULT_TARGET_BARS: usize = 100;

/// Downsamples `levels` to approximately `target_bars` block averages.
///
/// The block width is `max(1, channel_count * levels.len() / target_bars)`;
/// full blocks are averaged over that width and a trailing remainder block
/// is averaged over the remainder length. Every input element contributes to
/// exactly one output element, so the output may carry one extra bar
/// compared to naive division. Callers needing an exact count rescale
/// downstream with [`super::scale::scale_to_fit`].
pub fn downsample(levels: &[f32], target_bars: usize, channel_count: usize) -> Vec<f32> {
    if levels.is_empty() || target_bars == 0 {
        return Vec::new();
    }

    let samples_per_pixel = (channel_count * levels.len() / target_bars).max(1);

    let mut bars = Vec::with_capacity(levels.len() / samples_per_pixel + 1);
    let mut chunks = levels.chunks_exact(samples_per_pixel);
    for block in &mut chunks {
        bars.push(block.iter().sum::<f32>() / samples_per_pixel as f32);
    }

    let remainder = chunks.remainder();
    if !remainder.is_empty() {
        bars.push(remainder.iter().sum::<f32>() / remainder.len() as f32);
    }

    bars
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_block_averages_with_remainder() {
        // Five samples at two bars: width 2, so two full blocks plus a
        // remainder block averaged over its single element.
        let bars = downsample(&[1.0, 2.0, 3.0, 4.0, 5.0], 2, 1);
        assert_eq!(bars, vec![1.5, 3.5, 5.0]);
    }

    #[test]
    fn test_all_samples_consumed() {
        let levels: Vec<f32> = (0..1003).map(|i| i as f32).collect();
        let target = 100;
        let width = levels.len() / target;
        let bars = downsample(&levels, target, 1);

        let full_blocks = levels.len() / width;
        let remainder = levels.len() % width;
        let expected_bars = full_blocks + usize::from(remainder > 0);
        assert_eq!(bars.len(), expected_bars);

        // Sum of (block average * block width) reconstructs the input sum.
        let mut reconstructed = 0.0f64;
        for (i, bar) in bars.iter().enumerate() {
            let block_len = if i < full_blocks { width } else { remainder };
            reconstructed += *bar as f64 * block_len as f64;
        }
        let input_sum: f64 = levels.iter().map(|&v| v as f64).sum();
        assert_relative_eq!(reconstructed, input_sum, max_relative = 1e-4);
    }

    #[test]
    fn test_fewer_samples_than_bars() {
        // Width clamps to 1, each sample becomes its own bar.
        let bars = downsample(&[0.25, 0.5], 100, 1);
        assert_eq!(bars, vec![0.25, 0.5]);
    }

    #[test]
    fn test_channel_count_widens_blocks() {
        // Stereo doubles samples per pixel: width 2 instead of 1.
        let levels = [1.0, 3.0, 5.0, 7.0];
        assert_eq!(downsample(&levels, 4, 2), vec![2.0, 6.0]);
    }

    #[test]
    fn test_empty_input() {
        assert!(downsample(&[], 100, 1).is_empty());
    }
}
