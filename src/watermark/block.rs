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

//! Per-block embedding and detection.
//!
//! One call handles one 8x8 block: the embedder adds `alpha * bit * chip` to
//! each masked DCT coefficient, the detector correlates those coefficients
//! against the same chip sequence and returns a hard decision. All scratch
//! is stack-local; the hot loop never touches the allocator.

use crate::transform::dct::{self, BLOCK_AREA, BLOCK_SIZE};
use crate::transform::mask::MID_FREQ_MASK;

use super::pn::pn_chip;

/// Copies an 8x8 window out of a strided plane into a flat block.
#[inline]
fn load_block(plane: &[f32], origin: usize, stride: usize, block: &mut [f32; BLOCK_AREA]) {
    for y in 0..BLOCK_SIZE {
        let row = origin + y * stride;
        block[y * BLOCK_SIZE..(y + 1) * BLOCK_SIZE]
            .copy_from_slice(&plane[row..row + BLOCK_SIZE]);
    }
}

/// Writes a flat block back into a strided plane.
#[inline]
fn store_block(plane: &mut [f32], origin: usize, stride: usize, block: &[f32; BLOCK_AREA]) {
    for y in 0..BLOCK_SIZE {
        let row = origin + y * stride;
        plane[row..row + BLOCK_SIZE].copy_from_slice(&block[y * BLOCK_SIZE..(y + 1) * BLOCK_SIZE]);
    }
}

/// Spread-spectrum modulates one payload bit into one block.
///
/// `origin`/`stride` address the block's top-left sample inside `plane`;
/// `block_index` must be the global block index so the detector derives the
/// same chips.
#[allow(clippy::too_many_arguments)] // Mirrors the per-block wire contract: position, bit, key, indices, strength
pub fn embed_bit(
    plane: &mut [f32],
    origin: usize,
    stride: usize,
    bit: i8,
    key: u64,
    bit_index: usize,
    block_index: usize,
    alpha: f32,
) {
    let mut block = [0.0_f32; BLOCK_AREA];
    load_block(plane, origin, stride, &mut block);

    let mut coeff = [0.0_f32; BLOCK_AREA];
    dct::forward(&block, &mut coeff);

    for (chip_index, entry) in MID_FREQ_MASK.iter().enumerate() {
        let chip = pn_chip(key, bit_index, block_index, chip_index);
        coeff[entry.flat()] += alpha * f32::from(bit) * f32::from(chip);
    }

    let mut recon = [0.0_f32; BLOCK_AREA];
    dct::inverse(&coeff, &mut recon);

    store_block(plane, origin, stride, &recon);
}

/// Correlation-detects one bit from one block, returning a hard `+1`/`-1`.
///
/// Ties (`sum == 0`) resolve to `+1`; the tie rule is wire contract.
#[must_use]
pub fn extract_bit(
    plane: &[f32],
    origin: usize,
    stride: usize,
    key: u64,
    bit_index: usize,
    block_index: usize,
) -> i8 {
    let mut block = [0.0_f32; BLOCK_AREA];
    load_block(plane, origin, stride, &mut block);

    let mut coeff = [0.0_f32; BLOCK_AREA];
    dct::forward(&block, &mut coeff);

    let mut sum = 0.0_f32;
    for (chip_index, entry) in MID_FREQ_MASK.iter().enumerate() {
        let chip = pn_chip(key, bit_index, block_index, chip_index);
        sum += coeff[entry.flat()] * f32::from(chip);
    }

    if sum >= 0.0 {
        1
    } else {
        -1
    }
}
