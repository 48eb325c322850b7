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

//! Keyed block permutation.
//!
//! Assigns carrier blocks to payload bits: consecutive runs of the shuffled
//! index array belong to consecutive bits. The permutation is regenerated
//! from `(key, total_blocks)` on every call; nothing is stored. The shuffle
//! direction (descending) and the `mod (i + 1)` draw are wire contract.

use crate::rng::splitmix64;

const PERM_SALT: u64 = 0xA5A5_A5A5_A5A5_A5A5;

/// Produces the keyed Fisher-Yates permutation of `[0, total_blocks)`.
///
/// Two calls with the same arguments yield identical arrays; different keys
/// yield unrelated orderings.
#[must_use]
pub fn block_permutation(key: u64, total_blocks: usize) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..total_blocks).collect();
    let mut state = key ^ PERM_SALT;

    for i in (1..total_blocks).rev() {
        let r = splitmix64(&mut state);
        let j = (r % (i as u64 + 1)) as usize;
        perm.swap(i, j);
    }

    perm
}
