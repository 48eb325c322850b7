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

//! Two-level 2-D Haar wavelet transform.
//!
//! The transform is orthonormal (1/sqrt(2) analysis and synthesis gain) and
//! runs in place over the full plane. At each level the 1-D kernel is applied
//! to every row of the active region and then to every column, after which
//! the active region halves in both dimensions. Level 1 detail subbands are
//! outside the level-2 active region, so the second pass leaves them intact.
//!
//! One scratch buffer and one column buffer are allocated per transform call
//! and reused across all rows and columns; the per-row/per-column kernel
//! itself allocates nothing.

use std::f32::consts::FRAC_1_SQRT_2;

/// Number of decomposition levels applied by [`forward`] and [`inverse`].
pub const LEVELS: usize = 2;

/// 1-D orthonormal Haar analysis step.
///
/// Writes approximation coefficients to the first half of `data` and detail
/// coefficients to the second half. `scratch` must be at least `data.len()`.
fn haar_1d(data: &mut [f32], scratch: &mut [f32]) {
    let n = data.len();
    debug_assert_eq!(n % 2, 0);

    let half = n / 2;
    for i in 0..half {
        let a = data[2 * i];
        let b = data[2 * i + 1];
        scratch[i] = (a + b) * FRAC_1_SQRT_2;
        scratch[i + half] = (a - b) * FRAC_1_SQRT_2;
    }

    data.copy_from_slice(&scratch[..n]);
}

/// 1-D orthonormal Haar synthesis step, the inverse of [`haar_1d`].
fn ihaar_1d(data: &mut [f32], scratch: &mut [f32]) {
    let n = data.len();
    debug_assert_eq!(n % 2, 0);

    let half = n / 2;
    for i in 0..half {
        let a = data[i];
        let d = data[i + half];
        scratch[2 * i] = (a + d) * FRAC_1_SQRT_2;
        scratch[2 * i + 1] = (a - d) * FRAC_1_SQRT_2;
    }

    data.copy_from_slice(&scratch[..n]);
}

/// Forward two-level 2-D Haar DWT, in place.
///
/// After the call the plane holds the four level-2 subbands in its top-left
/// quadrant and the level-1 detail subbands in the remaining three quadrants.
///
/// # Panics
///
/// Debug builds assert that `width` and `height` are multiples of 4 and that
/// `data` covers the full `width * height` plane.
pub fn forward(data: &mut [f32], width: usize, height: usize) {
    debug_assert!(width % 4 == 0 && height % 4 == 0);
    debug_assert_eq!(data.len(), width * height);

    let mut scratch = vec![0.0_f32; width.max(height)];
    let mut column = vec![0.0_f32; height];

    let mut w = width;
    let mut h = height;

    for _ in 0..LEVELS {
        // Rows of the active region
        for y in 0..h {
            let row = &mut data[y * width..y * width + w];
            haar_1d(row, &mut scratch);
        }

        // Columns of the active region
        for x in 0..w {
            for y in 0..h {
                column[y] = data[y * width + x];
            }
            haar_1d(&mut column[..h], &mut scratch);
            for y in 0..h {
                data[y * width + x] = column[y];
            }
        }

        w /= 2;
        h /= 2;
    }
}

/// Inverse two-level 2-D Haar DWT, in place.
///
/// Mirrors [`forward`]: columns are synthesized before rows, starting from
/// the level-2 subbands and doubling the active region at each level. A
/// forward/inverse round trip recovers the input to within floating-point
/// error.
pub fn inverse(data: &mut [f32], width: usize, height: usize) {
    debug_assert!(width % 4 == 0 && height % 4 == 0);
    debug_assert_eq!(data.len(), width * height);

    let mut scratch = vec![0.0_f32; width.max(height)];
    let mut column = vec![0.0_f32; height];

    let mut w = width / 4;
    let mut h = height / 4;

    for _ in 0..LEVELS {
        // Columns first on the way back up
        for x in 0..w * 2 {
            for y in 0..h * 2 {
                column[y] = data[y * width + x];
            }
            ihaar_1d(&mut column[..h * 2], &mut scratch);
            for y in 0..h * 2 {
                data[y * width + x] = column[y];
            }
        }

        // Then rows
        for y in 0..h * 2 {
            let row = &mut data[y * width..y * width + w * 2];
            ihaar_1d(row, &mut scratch);
        }

        w *= 2;
        h *= 2;
    }
}
