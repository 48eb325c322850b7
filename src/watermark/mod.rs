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

//! The spread-spectrum watermarking engine.
//!
//! Payload bits are spread across 8x8 blocks of the HL2 and LH2 wavelet
//! subbands. A keyed permutation assigns blocks to bits; inside each block a
//! keyed PN sequence modulates seven mid-frequency DCT coefficients. The
//! detector re-derives the same permutation and PN chips from the key alone,
//! so extraction needs neither the original image nor side information.

use crate::error::{Result, WatermarkError};
use crate::BLOCK_ALIGN;

pub mod block;
pub mod embed;
pub mod extract;
pub mod permutation;
pub mod pn;

pub use embed::embed;
pub use extract::{extract, ExtractResult, Verdict};

/// Number of payload bits a `width x height` plane can carry.
///
/// Each 8x8 block of the HL2 and LH2 subbands carries chips for exactly one
/// bit, so the ceiling is the total block count `2 * (W/32) * (H/32)`.
/// Payloads shorter than the ceiling get multiple blocks per bit and
/// correspondingly better robustness.
#[must_use]
pub fn capacity(width: usize, height: usize) -> usize {
    2 * (width / BLOCK_ALIGN) * (height / BLOCK_ALIGN)
}

/// Carrier-block geometry shared by the embed and extract pipelines.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Layout {
    /// Blocks along a subband row.
    pub blocks_x: usize,
    /// Blocks in one subband.
    pub blocks_per_band: usize,
    /// Blocks across both subbands.
    pub total_blocks: usize,
    /// Blocks voting for each payload bit.
    pub blocks_per_bit: usize,
}

impl Layout {
    /// Validates plane geometry and payload length, failing fast before any
    /// buffer mutation.
    pub fn new(width: usize, height: usize, payload_len: usize) -> Result<Self> {
        if width % BLOCK_ALIGN != 0 || height % BLOCK_ALIGN != 0 {
            return Err(WatermarkError::InvalidGeometry { width, height });
        }

        let blocks_x = width / BLOCK_ALIGN;
        let blocks_per_band = blocks_x * (height / BLOCK_ALIGN);
        let total_blocks = 2 * blocks_per_band;

        if payload_len == 0 {
            return Err(WatermarkError::InvalidPayload(
                "payload is empty".to_string(),
            ));
        }
        if payload_len > total_blocks {
            return Err(WatermarkError::InsufficientCapacity {
                requested: payload_len,
                available: total_blocks,
            });
        }

        Ok(Self {
            blocks_x,
            blocks_per_band,
            total_blocks,
            blocks_per_bit: total_blocks / payload_len,
        })
    }
}
