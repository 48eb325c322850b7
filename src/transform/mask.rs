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

//! Mid-frequency DCT coefficient mask.
//!
//! The seven coefficients selected here carry the spread-spectrum chips for
//! one block. They sit in the mid-frequency band of the 8x8 spectrum: low
//! enough to survive mild compression, high enough to stay visually quiet.
//! The entry order defines the chip index and is a wire contract shared
//! between embedder and detector.

use super::dct::BLOCK_SIZE;

/// A (u, v) coefficient position inside an 8x8 DCT block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoeffIndex {
    /// Vertical frequency index.
    pub u: usize,
    /// Horizontal frequency index.
    pub v: usize,
}

impl CoeffIndex {
    /// Row-major position of this coefficient in a flat `[f32; 64]` block.
    #[inline]
    #[must_use]
    pub const fn flat(self) -> usize {
        self.u * BLOCK_SIZE + self.v
    }
}

/// Number of chips (modulated coefficients) per block.
pub const CHIPS_PER_BLOCK: usize = 7;

/// The mid-frequency mask, in chip-index order.
pub const MID_FREQ_MASK: [CoeffIndex; CHIPS_PER_BLOCK] = [
    CoeffIndex { u: 1, v: 2 },
    CoeffIndex { u: 2, v: 1 },
    CoeffIndex { u: 2, v: 2 },
    CoeffIndex { u: 1, v: 3 },
    CoeffIndex { u: 3, v: 1 },
    CoeffIndex { u: 2, v: 3 },
    CoeffIndex { u: 3, v: 2 },
];
