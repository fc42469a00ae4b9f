//! Parameter modulation primitives.

/*
Parameter Modulation
====================

One signal continuously varying a parameter of another.

    modulated_value = base_value + (modulator × depth)

The kick is the one voice here that uses a modulator node: its pitch
envelope (unipolar, 1.0 at the hit, falling to 0.0) is added onto a 50 Hz
base with a depth of several hundred Hz, so every hit starts as a high
click and drops into the sub-bass body.

    env = 1.0  →  50 + 1.0 × 450 = 500 Hz
    env = 0.1  →  50 + 0.1 × 450 =  95 Hz
    env = 0.0  →  50 Hz


Block-Rate Modulation
---------------------

Modulation is applied once per render block, not per sample. The modulator
renders a full block, the block is averaged, and the target parameter takes
that single value for the block.

For the kick's 50 ms pitch drop with 128-sample blocks at 48 kHz the block is
2.7 ms, roughly 19 updates across the drop. That is smooth enough for a
membrane sweep; larger callback blocks get split before they reach the
voices, which bounds the stepping.

The target node is responsible for clamping the result into its own valid
range.
*/

/// Calculate the average of a modulator signal over a block.
#[inline]
pub fn block_average(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f32>() / samples.len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_average() {
        assert_eq!(block_average(&[1.0, 2.0, 3.0, 4.0]), 2.5);
        assert_eq!(block_average(&[0.5]), 0.5);
    }

    #[test]
    fn test_block_average_empty() {
        let samples: [f32; 0] = [];
        assert_eq!(block_average(&samples), 0.0);
    }
}
