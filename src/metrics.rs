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

//! Quality metrics for watermarked images and recovered payloads.

/// Peak signal-to-noise ratio in dB between two equally sized planes,
/// against a peak of 255.
///
/// Identical inputs report 100 dB rather than infinity.
#[must_use]
pub fn psnr(reference: &[f32], test: &[f32]) -> f32 {
    debug_assert_eq!(reference.len(), test.len());

    let mut mse = 0.0_f64;
    for (a, b) in reference.iter().zip(test.iter()) {
        let diff = f64::from(a - b);
        mse += diff * diff;
    }
    mse /= reference.len() as f64;

    if mse == 0.0 {
        return 100.0;
    }

    (10.0 * (255.0_f64 * 255.0 / mse).log10()) as f32
}

/// Fraction of positions where two symbol sequences disagree.
#[must_use]
pub fn bit_error_rate(expected: &[i8], actual: &[i8]) -> f32 {
    debug_assert_eq!(expected.len(), actual.len());

    let errors = expected
        .iter()
        .zip(actual.iter())
        .filter(|(a, b)| a != b)
        .count();

    errors as f32 / expected.len() as f32
}
