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

//! Attack simulators for robustness evaluation.
//!
//! Deterministic distortions applied to a luminance plane, used by the test
//! suite and available for callers that want to measure how a given strength
//! setting holds up before shipping an image.

use crate::plane::LumaPlane;

/// Quantizes every sample to `round(v * q) / q`.
///
/// Smaller `q` is a harsher step; `q = 4.0` approximates a light JPEG pass,
/// `q = 1.5` a heavy one.
pub fn quantize(plane: &mut LumaPlane, q: f32) {
    for v in plane.data_mut() {
        *v = (*v * q).round() / q;
    }
}

/// Zeroes a border of `ratio * dimension` pixels on all four sides.
pub fn crop_border(plane: &mut LumaPlane, ratio: f32) {
    let width = plane.width();
    let height = plane.height();
    let cx = (width as f32 * ratio) as usize;
    let cy = (height as f32 * ratio) as usize;

    let data = plane.data_mut();
    for y in 0..height {
        for x in 0..width {
            if x < cx || x >= width - cx || y < cy || y >= height - cy {
                data[y * width + x] = 0.0;
            }
        }
    }
}

/// Adds `amplitude * sin(i)` to sample `i` (flat index): structured,
/// zero-mean, high-frequency noise.
pub fn additive_sine(plane: &mut LumaPlane, amplitude: f32) {
    for (i, v) in plane.data_mut().iter_mut().enumerate() {
        *v += amplitude * (i as f32).sin();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_snaps_to_grid() {
        let mut plane = LumaPlane::from_vec(2, 1, vec![10.1, 10.2]).unwrap();
        quantize(&mut plane, 4.0);
        assert_eq!(plane.data(), &[10.0, 10.25]);
    }

    #[test]
    fn test_quantize_is_idempotent() {
        let mut plane = LumaPlane::from_fn(8, 8, |x, y| (x * y) as f32 * 0.37);
        quantize(&mut plane, 1.5);
        let once = plane.data().to_vec();
        quantize(&mut plane, 1.5);
        assert_eq!(plane.data(), &once[..]);
    }

    #[test]
    fn test_crop_border_zeroes_frame_only() {
        let mut plane = LumaPlane::from_fn(10, 10, |_, _| 7.0);
        crop_border(&mut plane, 0.2);

        for y in 0..10 {
            for x in 0..10 {
                let v = plane.data()[y * 10 + x];
                if (2..8).contains(&x) && (2..8).contains(&y) {
                    assert_eq!(v, 7.0);
                } else {
                    assert_eq!(v, 0.0);
                }
            }
        }
    }

    #[test]
    fn test_additive_sine_is_bounded() {
        let mut plane = LumaPlane::from_fn(16, 16, |_, _| 50.0);
        additive_sine(&mut plane, 2.0);
        for &v in plane.data() {
            assert!((v - 50.0).abs() <= 2.0 + 1e-4);
        }
    }
}
