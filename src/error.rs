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

//! Error types for the watermarking library.

use std::io;
use thiserror::Error;

/// Result type for watermarking operations.
pub type Result<T> = std::result::Result<T, WatermarkError>;

/// Errors that can occur in watermarking operations.
///
/// The embed and extract entry points fail fast: when an error is returned,
/// the caller's luminance buffer has not been modified.
#[derive(Debug, Error)]
pub enum WatermarkError {
    /// I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Plane dimensions are not multiples of the block alignment.
    #[error("invalid geometry: {width}x{height} (dimensions must be multiples of 32)")]
    InvalidGeometry {
        /// Plane width in samples.
        width: usize,
        /// Plane height in samples.
        height: usize,
    },

    /// The payload needs more 8x8 carrier blocks than the plane provides.
    #[error("insufficient capacity: {requested} bits requested, {available} blocks available")]
    InsufficientCapacity {
        /// Number of payload bits the caller asked for.
        requested: usize,
        /// Total number of carrier blocks in the plane.
        available: usize,
    },

    /// The payload is empty or contains symbols other than +1/-1.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// Invalid operation, such as a crop window larger than the plane.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// Malformed or unsupported BMP data.
    #[error("BMP error: {0}")]
    Bmp(String),
}
