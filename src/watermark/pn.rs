// Copyright 2026 The lumamark Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Keyed pseudo-noise chip generator.
//!
//! Maps `(key, bit_index, block_index, chip_index)` to a bipolar chip. The
//! generator is a pure function: no state survives between calls, and the
//! detector regenerates the exact chip sequence from the shared key. The
//! seed mixer (XOR of index products) and its constants are a locked wire
//! contract; changing any of them produces an incompatible watermark.

use crate::rng::splitmix64;

const BIT_MIX: u64 = 0x0000_0100_0000_01B3;
const BLOCK_MIX: u64 = 0xC6A4_A793_5BD1_E995;
const CHIP_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// Returns the `+1`/`-1` chip for one coefficient of one block.
///
/// `block_index` is the global block index (the permutation value), not a
/// per-subband local index; embedder and detector must agree on it.
#[inline]
#[must_use]
pub fn pn_chip(key: u64, bit_index: usize, block_index: usize, chip_index: usize) -> i8 {
    let mut seed = key
        ^ (bit_index as u64).wrapping_mul(BIT_MIX)
        ^ (block_index as u64).wrapping_mul(BLOCK_MIX)
        ^ (chip_index as u64).wrapping_mul(CHIP_MIX);

    if splitmix64(&mut seed) & 1 == 1 {
        1
    } else {
        -1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chips_are_bipolar() {
        for i in 0..1000 {
            let chip = pn_chip(0x1234, i % 64, i / 64, i % 7);
            assert!(chip == 1 || chip == -1);
        }
    }

    #[test]
    fn test_deterministic() {
        for bit in 0..8 {
            for block in 0..8 {
                for chip in 0..7 {
                    let a = pn_chip(0xFACE_FEED, bit, block, chip);
                    let b = pn_chip(0xFACE_FEED, bit, block, chip);
                    assert_eq!(a, b);
                }
            }
        }
    }

    #[test]
    fn test_sensitive_to_every_index() {
        // Flipping any single input must change at least some chips over a
        // sample of positions.
        let base: Vec<i8> = (0..256).map(|i| pn_chip(1, 0, i, 0)).collect();

        let other_key: Vec<i8> = (0..256).map(|i| pn_chip(2, 0, i, 0)).collect();
        let other_bit: Vec<i8> = (0..256).map(|i| pn_chip(1, 1, i, 0)).collect();
        let other_chip: Vec<i8> = (0..256).map(|i| pn_chip(1, 0, i, 1)).collect();

        assert_ne!(base, other_key);
        assert_ne!(base, other_bit);
        assert_ne!(base, other_chip);
    }

    #[test]
    fn test_roughly_balanced() {
        let mut positive = 0_usize;
        let total = 10_000_usize;
        for i in 0..total {
            if pn_chip(0xABCD_EF12_3456_7890, i % 128, i / 128, i % 7) == 1 {
                positive += 1;
            }
        }
        // Expected 5000; a 40%-60% band is far outside any plausible
        // deviation for a working mixer.
        assert!(positive > total * 2 / 5 && positive < total * 3 / 5);
    }
}
