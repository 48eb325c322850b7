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

//! Local luminance normalization.
//!
//! A standalone preprocessing primitive: each tile is recentered to zero
//! mean and unit-ish variance. The embed/extract pipeline does not call it;
//! it exists for layers that want illumination-invariant analysis before
//! deciding where or whether to watermark.

use crate::plane::LumaPlane;

/// Tile size used by the tools when none is specified.
pub const DEFAULT_TILE_SIZE: usize = 32;

const EPSILON: f32 = 1e-3;

/// Replaces each sample with `(v - mean) / (stddev + 1e-3)`, computed per
/// `tile_size x tile_size` tile. Edge tiles smaller than `tile_size` use
/// their actual sample count.
pub fn normalize_blocks(plane: &mut LumaPlane, tile_size: usize) {
    let width = plane.width();
    let height = plane.height();
    let data = plane.data_mut();

    let mut by = 0;
    while by < height {
        let mut bx = 0;
        let tile_h = tile_size.min(height - by);
        while bx < width {
            let tile_w = tile_size.min(width - bx);

            let mut sum = 0.0_f64;
            let mut sum_sq = 0.0_f64;
            for y in by..by + tile_h {
                for x in bx..bx + tile_w {
                    let v = f64::from(data[y * width + x]);
                    sum += v;
                    sum_sq += v * v;
                }
            }

            let count = (tile_w * tile_h) as f64;
            let mean = (sum / count) as f32;
            let variance = ((sum_sq / count - (sum / count) * (sum / count)).max(0.0)) as f32;
            let stddev = variance.sqrt();

            for y in by..by + tile_h {
                for x in bx..bx + tile_w {
                    let v = &mut data[y * width + x];
                    *v = (*v - mean) / (stddev + EPSILON);
                }
            }

            bx += tile_size;
        }
        by += tile_size;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_tile_goes_to_zero() {
        let mut plane = LumaPlane::from_fn(32, 32, |_, _| 123.0);
        normalize_blocks(&mut plane, DEFAULT_TILE_SIZE);
        for &v in plane.data() {
            assert!(v.abs() < 1e-6);
        }
    }

    #[test]
    fn test_tile_statistics_after_normalization() {
        let mut plane = LumaPlane::from_fn(32, 32, |x, y| ((x * 7 + y * 13) % 41) as f32);
        normalize_blocks(&mut plane, DEFAULT_TILE_SIZE);

        let n = plane.data().len() as f32;
        let mean: f32 = plane.data().iter().sum::<f32>() / n;
        let var: f32 = plane.data().iter().map(|v| (v - mean) * (v - mean)).sum::<f32>() / n;

        assert!(mean.abs() < 1e-3);
        assert!((var - 1.0).abs() < 0.05);
    }

    #[test]
    fn test_partial_edge_tiles() {
        // 40x40 with 32-tiles leaves 8-wide edge strips; they must be
        // normalized with their own statistics, not skipped.
        let mut plane = LumaPlane::from_fn(40, 40, |x, y| (x + 2 * y) as f32);
        normalize_blocks(&mut plane, DEFAULT_TILE_SIZE);

        let data = plane.data();
        let strip: Vec<f32> = (0..40)
            .flat_map(|y| (32..40).map(move |x| (x, y)))
            .map(|(x, y)| data[y * 40 + x])
            .collect();
        let mean: f32 = strip.iter().sum::<f32>() / strip.len() as f32;
        assert!(mean.abs() < 0.1);
    }

    #[test]
    fn test_tiles_are_independent() {
        // Two tiles with very different levels both end up centered.
        let mut plane = LumaPlane::from_fn(64, 32, |x, y| {
            let base = if x < 32 { 1000.0 } else { 10.0 };
            base + ((x + y) % 5) as f32
        });
        normalize_blocks(&mut plane, 32);

        let data = plane.data();
        let left: f32 = (0..32)
            .flat_map(|y| (0..32).map(move |x| (x, y)))
            .map(|(x, y)| data[y * 64 + x])
            .sum::<f32>()
            / 1024.0;
        let right: f32 = (0..32)
            .flat_map(|y| (32..64).map(move |x| (x, y)))
            .map(|(x, y)| data[y * 64 + x])
            .sum::<f32>()
            / 1024.0;

        assert!(left.abs() < 1e-2);
        assert!(right.abs() < 1e-2);
    }
}
