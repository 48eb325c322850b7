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

//! Color-space conversion between RGB and YCbCr (ITU-R BT.601, full range).
//!
//! The watermark lives in the luminance channel only. A typical caller
//! converts RGB to YCbCr, runs embed/extract on Y, and recombines with the
//! untouched chroma planes, so color content passes through unmodified.

/// An 8-bit RGB image, 3 bytes per pixel, row-major top-down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImage {
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// Interleaved RGB samples, `3 * width * height` bytes.
    pub data: Vec<u8>,
}

/// Planar YCbCr image with floating-point samples in `[0, 255]`.
#[derive(Debug, Clone, PartialEq)]
pub struct YCbCrImage {
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// Luminance plane.
    pub y: Vec<f32>,
    /// Blue-difference chroma plane, centered on 128.
    pub cb: Vec<f32>,
    /// Red-difference chroma plane, centered on 128.
    pub cr: Vec<f32>,
}

#[inline]
fn clamp_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Converts an RGB image to planar YCbCr.
#[must_use]
pub fn rgb_to_ycbcr(rgb: &RgbImage) -> YCbCrImage {
    let pixels = rgb.width * rgb.height;
    let mut y = Vec::with_capacity(pixels);
    let mut cb = Vec::with_capacity(pixels);
    let mut cr = Vec::with_capacity(pixels);

    for chunk in rgb.data.chunks_exact(3) {
        let r = f32::from(chunk[0]);
        let g = f32::from(chunk[1]);
        let b = f32::from(chunk[2]);

        y.push(0.299 * r + 0.587 * g + 0.114 * b);
        cb.push(128.0 - 0.168_736 * r - 0.331_264 * g + 0.5 * b);
        cr.push(128.0 + 0.5 * r - 0.418_688 * g - 0.081_312 * b);
    }

    YCbCrImage {
        width: rgb.width,
        height: rgb.height,
        y,
        cb,
        cr,
    }
}

/// Converts planar YCbCr back to an RGB image, clamping to `[0, 255]`.
#[must_use]
pub fn ycbcr_to_rgb(ycbcr: &YCbCrImage) -> RgbImage {
    let pixels = ycbcr.width * ycbcr.height;
    let mut data = Vec::with_capacity(pixels * 3);

    for i in 0..pixels {
        let y = ycbcr.y[i];
        let cb = ycbcr.cb[i] - 128.0;
        let cr = ycbcr.cr[i] - 128.0;

        data.push(clamp_u8(y + 1.402 * cr));
        data.push(clamp_u8(y - 0.344_136 * cb - 0.714_136 * cr));
        data.push(clamp_u8(y + 1.772 * cb));
    }

    RgbImage {
        width: ycbcr.width,
        height: ycbcr.height,
        data,
    }
}

/// Renders a luminance plane as a grayscale RGB image.
#[must_use]
pub fn luminance_to_gray_rgb(y: &[f32], width: usize, height: usize) -> RgbImage {
    debug_assert_eq!(y.len(), width * height);
    let mut data = Vec::with_capacity(width * height * 3);

    for &lum in y {
        let v = clamp_u8(lum);
        data.push(v);
        data.push(v);
        data.push(v);
    }

    RgbImage {
        width,
        height,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_pixel(r: u8, g: u8, b: u8) -> RgbImage {
        RgbImage {
            width: 1,
            height: 1,
            data: vec![r, g, b],
        }
    }

    #[test]
    fn test_gray_maps_to_neutral_chroma() {
        let ycbcr = rgb_to_ycbcr(&single_pixel(100, 100, 100));
        assert!((ycbcr.y[0] - 100.0).abs() < 0.1);
        assert!((ycbcr.cb[0] - 128.0).abs() < 0.1);
        assert!((ycbcr.cr[0] - 128.0).abs() < 0.1);
    }

    #[test]
    fn test_luma_weights() {
        // BT.601: pure red carries 29.9% of full-scale luminance.
        let ycbcr = rgb_to_ycbcr(&single_pixel(255, 0, 0));
        assert!((ycbcr.y[0] - 76.245).abs() < 0.1);
    }

    #[test]
    fn test_roundtrip_is_close() {
        let mut data = Vec::new();
        for i in 0..64_usize {
            data.push((i * 4) as u8);
            data.push((255 - i * 3) as u8);
            data.push((i * 7 % 256) as u8);
        }
        let rgb = RgbImage {
            width: 8,
            height: 8,
            data,
        };

        let back = ycbcr_to_rgb(&rgb_to_ycbcr(&rgb));

        for (a, b) in back.data.iter().zip(rgb.data.iter()) {
            assert!((i16::from(*a) - i16::from(*b)).abs() <= 1);
        }
    }

    #[test]
    fn test_gray_render() {
        let rgb = luminance_to_gray_rgb(&[0.0, 127.6, 300.0, -4.0], 2, 2);
        assert_eq!(rgb.data, vec![0, 0, 0, 128, 128, 128, 255, 255, 255, 0, 0, 0]);
    }
}
