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

//! Signal transforms used by the watermarking pipeline.
//!
//! The embed and extract paths share the same transform chain: a two-level
//! Haar wavelet decomposition of the whole luminance plane, subband views
//! over the level-2 detail bands, and an orthonormal 8x8 DCT-II applied to
//! individual blocks inside those bands.

pub mod dct;
pub mod dwt;
pub mod mask;
pub mod subband;

pub use mask::{CoeffIndex, MID_FREQ_MASK};
pub use subband::SubbandView;
