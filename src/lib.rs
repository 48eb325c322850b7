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


//! # lumamark
//!
//! Blind, key-driven, DWT-DCT spread-spectrum image watermarking.
//!
//! This library embeds a short bipolar payload into the luminance channel of
//! a raster image and recovers it again with nothing but the shared 64-bit
//! key: no original image, no side files. The mark is designed to be
//! visually imperceptible at sensible strengths and to survive mild
//! processing such as light quantization, structured additive noise, and
//! limited cropping.
//!
//! ## Features
//!
//! - **Blind detection**: extraction needs only the key and payload length
//! - **Keyed everything**: block assignment and chip polarity both derive
//!   from the key, so different keys produce uncorrelated watermarks
//! - **Per-bit confidence**: every recovered bit reports its vote margin,
//!   aggregated into a three-valued authenticity verdict
//! - **Deterministic**: bit-exact reproducible output on every platform
//! - **Glue included**: BMP codec, BT.601 color conversion, plane padding,
//!   text packing, PSNR/BER metrics, and attack simulators for evaluation
//!
//! ## Quick Start
//!
//! ```
//! use lumamark::{embed, extract, LumaPlane, Verdict};
//!
//! // A smooth synthetic luminance plane (any 32-aligned size works).
//! let mut plane = LumaPlane::from_fn(256, 256, |x, y| {
//!     100.0 + 30.0 * (0.02 * x as f32).sin() + 20.0 * (0.015 * y as f32).cos()
//! });
//!
//! let payload = [1_i8, -1, 1, 1, -1, 1, -1, -1];
//! let key = 0xABCD_EF12_3456_7890;
//!
//! embed(&mut plane, &payload, key, 2.0)?;
//!
//! let result = extract(&mut plane, key, payload.len())?;
//! assert_eq!(result.bits, payload);
//! assert_eq!(result.verdict, Verdict::Verified);
//! # Ok::<(), lumamark::WatermarkError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! embed:                                 extract:
//!
//!   luminance plane                        watermarked plane
//!         │                                      │
//!         ▼                                      ▼
//!   2-level Haar DWT (in place)           2-level Haar DWT (in place)
//!         │                                      │
//!         ▼                                      ▼
//!   HL2 / LH2 subband views               HL2 / LH2 subband views
//!         │                                      │
//!         ▼                                      ▼
//!   keyed block permutation               same keyed permutation
//!         │                                      │
//!         ▼                                      ▼
//!   per block: DCT, add                   per block: DCT, correlate
//!   alpha·bit·chip on 7 mid-freq          with the same chips, vote ±1
//!   coefficients, inverse DCT                    │
//!         │                                      ▼
//!         ▼                               per bit: sign of vote sum,
//!   inverse DWT → marked plane            confidence = |sum| / votes
//!                                                │
//!                                                ▼
//!                                         inverse DWT restores plane
//! ```
//!
//! The engine is synchronous and single-threaded; it owns no global state,
//! so concurrent calls on distinct planes are safe.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod attack;
pub mod bmp;
pub mod color;
pub mod error;
pub mod metrics;
pub mod payload;
pub mod plane;
pub mod preprocess;
pub mod transform;
pub mod watermark;

// Internal modules
mod rng;

// Re-exports
pub use error::{Result, WatermarkError};
pub use plane::LumaPlane;
pub use watermark::{capacity, embed, extract, ExtractResult, Verdict};

/// Required alignment of plane dimensions: each subband must tile exactly
/// into 8x8 blocks after two wavelet levels, so `32 = 8 * 2^2`.
pub const BLOCK_ALIGN: usize = 32;

/// Embedding strength that keeps smooth images above 40 dB PSNR while
/// detecting reliably. Busy photographic content tolerates far more.
pub const DEFAULT_ALPHA: f32 = 2.0;
