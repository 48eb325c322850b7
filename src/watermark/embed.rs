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

//! Image-level watermark embedding.

use crate::error::{Result, WatermarkError};
use crate::plane::LumaPlane;
use crate::transform::{dwt, SubbandView};

use super::block;
use super::permutation::block_permutation;
use super::Layout;

/// Embeds a bipolar payload into the luminance plane, in place.
///
/// The plane is wavelet-transformed, every payload bit is spread across its
/// share of permuted HL2/LH2 blocks, and the transform is inverted, leaving
/// the watermarked image in the caller's buffer. `alpha` is the embedding
/// strength: larger values survive harsher processing at the cost of PSNR.
///
/// # Errors
///
/// Fails without touching the buffer when the plane dimensions are not
/// multiples of 32, when the payload is empty or contains symbols other than
/// `+1`/`-1`, or when the payload is longer than [`capacity`] allows.
///
/// [`capacity`]: super::capacity
pub fn embed(plane: &mut LumaPlane, payload: &[i8], key: u64, alpha: f32) -> Result<()> {
    let (width, height) = (plane.width(), plane.height());
    let layout = Layout::new(width, height, payload.len())?;

    if let Some(&bad) = payload.iter().find(|&&s| s != 1 && s != -1) {
        return Err(WatermarkError::InvalidPayload(format!(
            "symbol {bad} is not +1/-1"
        )));
    }

    log::debug!(
        "embedding {} bits into {}x{} ({} blocks, {} per bit, alpha {})",
        payload.len(),
        width,
        height,
        layout.total_blocks,
        layout.blocks_per_bit,
        alpha
    );

    dwt::forward(plane.data_mut(), width, height);

    let hl = SubbandView::hl2(width, height);
    let lh = SubbandView::lh2(width, height);
    let perm = block_permutation(key, layout.total_blocks);

    for (bit_index, &bit) in payload.iter().enumerate() {
        for k in 0..layout.blocks_per_bit {
            let p = perm[bit_index * layout.blocks_per_bit + k];

            let (band, local) = if p < layout.blocks_per_band {
                (&hl, p)
            } else {
                (&lh, p - layout.blocks_per_band)
            };

            let by = local / layout.blocks_x;
            let bx = local % layout.blocks_x;
            let origin = band.block_origin(bx, by);

            block::embed_bit(
                plane.data_mut(),
                origin,
                band.stride(),
                bit,
                key,
                bit_index,
                p,
                alpha,
            );
        }
    }

    dwt::inverse(plane.data_mut(), width, height);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics;

    fn test_plane() -> LumaPlane {
        LumaPlane::from_fn(512, 512, |x, y| {
            100.0 + 30.0 * (0.02 * x as f32).sin() + 20.0 * (0.015 * y as f32).cos()
        })
    }

    fn alternating_payload(len: usize) -> Vec<i8> {
        (0..len).map(|i| if i % 2 == 1 { 1 } else { -1 }).collect()
    }

    #[test]
    fn test_embed_is_imperceptible() {
        let mut plane = test_plane();
        let original = plane.data().to_vec();
        let payload = alternating_payload(64);

        embed(&mut plane, &payload, 0xABCD_EF12_3456_7890, 2.0).unwrap();

        let psnr = metrics::psnr(&original, plane.data());
        assert!(psnr >= 40.0, "PSNR too low: {psnr}");

        // The watermark must actually be present.
        assert_ne!(original, plane.data());
    }

    #[test]
    fn test_bad_geometry_leaves_buffer_untouched() {
        let mut plane = LumaPlane::from_fn(100, 96, |x, _| x as f32);
        let original = plane.data().to_vec();

        let err = embed(&mut plane, &[1, -1], 7, 2.0).unwrap_err();
        assert!(matches!(err, WatermarkError::InvalidGeometry { .. }));
        assert_eq!(plane.data(), &original[..]);
    }

    #[test]
    fn test_oversized_payload_leaves_buffer_untouched() {
        let mut plane = LumaPlane::new(32, 32);
        let original = plane.data().to_vec();

        let err = embed(&mut plane, &[1, -1, 1], 7, 2.0).unwrap_err();
        assert!(matches!(err, WatermarkError::InsufficientCapacity { .. }));
        assert_eq!(plane.data(), &original[..]);
    }

    #[test]
    fn test_non_bipolar_payload_rejected() {
        let mut plane = LumaPlane::new(64, 64);
        let err = embed(&mut plane, &[1, 0, -1], 7, 2.0).unwrap_err();
        assert!(matches!(err, WatermarkError::InvalidPayload(_)));
    }

    #[test]
    fn test_different_keys_produce_different_marks() {
        let payload = alternating_payload(16);

        let mut a = test_plane();
        let mut b = test_plane();
        embed(&mut a, &payload, 0x1111, 2.0).unwrap();
        embed(&mut b, &payload, 0x2222, 2.0).unwrap();

        assert_ne!(a.data(), b.data());
    }
}
