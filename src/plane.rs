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

//! Owned luminance plane.
//!
//! A contiguous row-major `f32` buffer with its dimensions. The watermarking
//! entry points mutate the plane in place; padding and cropping produce new
//! planes so the caller can round-trip arbitrary image sizes through the
//! 32-aligned core.

use crate::error::{Result, WatermarkError};

/// A single-channel floating-point image plane, row-major, stride == width.
#[derive(Debug, Clone, PartialEq)]
pub struct LumaPlane {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl LumaPlane {
    /// Creates a zero-filled plane.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width * height],
        }
    }

    /// Wraps an existing sample buffer.
    ///
    /// # Errors
    ///
    /// Fails when `data.len() != width * height`.
    pub fn from_vec(width: usize, height: usize, data: Vec<f32>) -> Result<Self> {
        if data.len() != width * height {
            return Err(WatermarkError::InvalidOperation(format!(
                "buffer holds {} samples, {}x{} plane needs {}",
                data.len(),
                width,
                height,
                width * height
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Builds a plane by evaluating `f(x, y)` at every sample.
    #[must_use]
    pub fn from_fn<F: FnMut(usize, usize) -> f32>(width: usize, height: usize, mut f: F) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Plane width in samples.
    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Plane height in samples.
    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Read access to the sample buffer.
    #[inline]
    #[must_use]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Write access to the sample buffer.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Consumes the plane, returning its sample buffer.
    #[must_use]
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Returns a copy zero-padded on the right and bottom so both dimensions
    /// are multiples of `align`. Returns an unpadded copy when the plane is
    /// already aligned.
    #[must_use]
    pub fn padded_to_multiple(&self, align: usize) -> LumaPlane {
        let new_width = (self.width + align - 1) / align * align;
        let new_height = (self.height + align - 1) / align * align;

        if new_width == self.width && new_height == self.height {
            return self.clone();
        }

        let mut padded = LumaPlane::new(new_width, new_height);
        for y in 0..self.height {
            let src = y * self.width;
            let dst = y * new_width;
            padded.data[dst..dst + self.width]
                .copy_from_slice(&self.data[src..src + self.width]);
        }
        padded
    }

    /// Returns the top-left `width x height` window as a new plane.
    ///
    /// # Errors
    ///
    /// Fails when the requested window exceeds the plane.
    pub fn cropped(&self, width: usize, height: usize) -> Result<LumaPlane> {
        if width > self.width || height > self.height {
            return Err(WatermarkError::InvalidOperation(format!(
                "cannot crop {}x{} out of {}x{}",
                width, height, self.width, self.height
            )));
        }

        let mut out = LumaPlane::new(width, height);
        for y in 0..height {
            let src = y * self.width;
            let dst = y * width;
            out.data[dst..dst + width].copy_from_slice(&self.data[src..src + width]);
        }
        Ok(out)
    }
}
