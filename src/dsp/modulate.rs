//! Block-rate modulation helpers.
//!
//! Modulators are rendered for the whole block and then collapsed to a single
//! value, so a target parameter (filter cutoff, oscillator pitch) changes
//! once per block instead of once per sample.

/// Mean of a modulator block, 0.0 for an empty block.
#[inline]
pub fn block_average(buffer: &[f32]) -> f32 {
    if buffer.is_empty() {
        return 0.0;
    }
    buffer.iter().sum::<f32>() / buffer.len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn averages_block() {
        assert_eq!(block_average(&[0.0, 1.0, 0.5, 0.5]), 0.5);
        assert_eq!(block_average(&[]), 0.0);
    }
}
