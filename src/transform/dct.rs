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

//! Orthonormal 8x8 DCT-II.
//!
//! Direct-sum implementation. The normalization is orthonormal:
//! `alpha(0) = 1/sqrt(8)`, `alpha(k>0) = sqrt(2/8)`, so forward followed by
//! inverse is the identity up to floating-point error and coefficient energy
//! equals spatial energy. Blocks are row-major `[f32; 64]` arrays on the
//! caller's stack.

use std::f32::consts::PI;

/// Samples along one side of a DCT block.
pub const BLOCK_SIZE: usize = 8;

/// Samples in a full DCT block.
pub const BLOCK_AREA: usize = BLOCK_SIZE * BLOCK_SIZE;

const ALPHA_DC: f32 = 0.353_553_390_593_273_76; // 1/sqrt(8)
const ALPHA_AC: f32 = 0.5; // sqrt(2/8)

#[inline]
fn alpha(k: usize) -> f32 {
    if k == 0 {
        ALPHA_DC
    } else {
        ALPHA_AC
    }
}

#[inline]
fn basis(spatial: usize, freq: usize) -> f32 {
    ((2.0 * spatial as f32 + 1.0) * freq as f32 * PI / 16.0).cos()
}

/// Forward 8x8 DCT-II.
///
/// `input` is a row-major spatial block; `output` receives coefficients with
/// the DC term at index 0.
pub fn forward(input: &[f32; BLOCK_AREA], output: &mut [f32; BLOCK_AREA]) {
    for u in 0..BLOCK_SIZE {
        for v in 0..BLOCK_SIZE {
            let mut sum = 0.0_f32;

            for x in 0..BLOCK_SIZE {
                for y in 0..BLOCK_SIZE {
                    sum += input[x * BLOCK_SIZE + y] * basis(x, u) * basis(y, v);
                }
            }

            output[u * BLOCK_SIZE + v] = alpha(u) * alpha(v) * sum;
        }
    }
}

/// Inverse 8x8 DCT-II (i.e. DCT-III with orthonormal scaling).
pub fn inverse(input: &[f32; BLOCK_AREA], output: &mut [f32; BLOCK_AREA]) {
    for x in 0..BLOCK_SIZE {
        for y in 0..BLOCK_SIZE {
            let mut sum = 0.0_f32;

            for u in 0..BLOCK_SIZE {
                for v in 0..BLOCK_SIZE {
                    sum += alpha(u) * alpha(v) * input[u * BLOCK_SIZE + v]
                        * basis(x, u)
                        * basis(y, v);
                }
            }

            output[x * BLOCK_SIZE + y] = sum;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let mut block = [0.0_f32; BLOCK_AREA];
        for (i, v) in block.iter_mut().enumerate() {
            *v = (i as f32) * 1.7 - 30.0;
        }

        let mut coeff = [0.0_f32; BLOCK_AREA];
        let mut recon = [0.0_f32; BLOCK_AREA];
        forward(&block, &mut coeff);
        inverse(&coeff, &mut recon);

        for (a, b) in recon.iter().zip(block.iter()) {
            assert!((a - b).abs() < 1e-3, "{a} vs {b}");
        }
    }

    #[test]
    fn test_constant_block_is_pure_dc() {
        let block = [50.0_f32; BLOCK_AREA];
        let mut coeff = [0.0_f32; BLOCK_AREA];
        forward(&block, &mut coeff);

        // DC = alpha(0)^2 * 64 * 50 = 400 for the orthonormal normalization.
        assert!((coeff[0] - 400.0).abs() < 1e-2);
        for &c in &coeff[1..] {
            assert!(c.abs() < 1e-3);
        }
    }

    #[test]
    fn test_energy_preserved() {
        let mut block = [0.0_f32; BLOCK_AREA];
        for (i, v) in block.iter_mut().enumerate() {
            *v = ((i * 37) % 23) as f32 - 11.0;
        }

        let mut coeff = [0.0_f32; BLOCK_AREA];
        forward(&block, &mut coeff);

        let spatial: f32 = block.iter().map(|v| v * v).sum();
        let frequency: f32 = coeff.iter().map(|v| v * v).sum();
        assert!((spatial - frequency).abs() / spatial < 1e-4);
    }
}
