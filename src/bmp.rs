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

//! Minimal 24-bit BMP codec.
//!
//! Supports exactly the format the CLI tools exchange: uncompressed
//! `BITMAPINFOHEADER` files with 24 bits per pixel, bottom-up BGR rows
//! padded to 4-byte boundaries. Anything else is rejected rather than
//! guessed at.

use crate::color::RgbImage;
use crate::error::{Result, WatermarkError};
use bytes::{BufMut, BytesMut};
use std::path::Path;

const FILE_HEADER_LEN: usize = 14;
const INFO_HEADER_LEN: usize = 40;
const HEADERS_LEN: usize = FILE_HEADER_LEN + INFO_HEADER_LEN;

#[inline]
fn read_u16(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

#[inline]
fn read_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

#[inline]
fn row_size(width: usize) -> usize {
    (width * 3 + 3) / 4 * 4
}

/// Decodes a 24-bit uncompressed BMP from memory.
///
/// # Errors
///
/// Fails on truncated data, a missing `BM` magic, compression, or any bit
/// depth other than 24.
pub fn decode(data: &[u8]) -> Result<RgbImage> {
    if data.len() < HEADERS_LEN {
        return Err(WatermarkError::Bmp("file shorter than headers".to_string()));
    }
    if &data[0..2] != b"BM" {
        return Err(WatermarkError::Bmp("missing BM magic".to_string()));
    }

    let data_offset = read_u32(data, 10) as usize;
    let width = read_u32(data, 18) as i32;
    let height = read_u32(data, 22) as i32;
    let bits_per_pixel = read_u16(data, 28);
    let compression = read_u32(data, 30);

    if bits_per_pixel != 24 {
        return Err(WatermarkError::Bmp(format!(
            "unsupported bit depth {bits_per_pixel} (only 24bpp)"
        )));
    }
    if compression != 0 {
        return Err(WatermarkError::Bmp(format!(
            "unsupported compression {compression}"
        )));
    }
    if width <= 0 || height <= 0 {
        return Err(WatermarkError::Bmp(format!(
            "unsupported dimensions {width}x{height}"
        )));
    }

    let width = width as usize;
    let height = height as usize;
    let row = row_size(width);

    let needed = data_offset
        .checked_add(row * height)
        .ok_or_else(|| WatermarkError::Bmp("pixel array overflows".to_string()))?;
    if data.len() < needed {
        return Err(WatermarkError::Bmp(format!(
            "truncated pixel array: have {} bytes, need {needed}",
            data.len()
        )));
    }

    let mut rgb = vec![0_u8; width * height * 3];
    for y in 0..height {
        // Rows are stored bottom-up, pixels as BGR.
        let src_row = data_offset + (height - 1 - y) * row;
        let dst_row = y * width * 3;
        for x in 0..width {
            let src = src_row + x * 3;
            let dst = dst_row + x * 3;
            rgb[dst] = data[src + 2];
            rgb[dst + 1] = data[src + 1];
            rgb[dst + 2] = data[src];
        }
    }

    Ok(RgbImage {
        width,
        height,
        data: rgb,
    })
}

/// Encodes an RGB image as a 24-bit uncompressed BMP.
#[must_use]
pub fn encode(image: &RgbImage) -> Vec<u8> {
    let row = row_size(image.width);
    let data_size = row * image.height;
    let file_size = HEADERS_LEN + data_size;

    let mut buf = BytesMut::with_capacity(file_size);

    // BITMAPFILEHEADER
    buf.put_slice(b"BM");
    buf.put_u32_le(file_size as u32);
    buf.put_u16_le(0); // reserved
    buf.put_u16_le(0); // reserved
    buf.put_u32_le(HEADERS_LEN as u32);

    // BITMAPINFOHEADER
    buf.put_u32_le(INFO_HEADER_LEN as u32);
    buf.put_i32_le(image.width as i32);
    buf.put_i32_le(image.height as i32);
    buf.put_u16_le(1); // planes
    buf.put_u16_le(24); // bits per pixel
    buf.put_u32_le(0); // BI_RGB, uncompressed
    buf.put_u32_le(data_size as u32);
    buf.put_i32_le(0); // x pixels per meter
    buf.put_i32_le(0); // y pixels per meter
    buf.put_u32_le(0); // colors used
    buf.put_u32_le(0); // important colors

    // Pixel rows, bottom-up, BGR, padded to 4 bytes.
    let padding = row - image.width * 3;
    for y in (0..image.height).rev() {
        let src_row = y * image.width * 3;
        for x in 0..image.width {
            let src = src_row + x * 3;
            buf.put_u8(image.data[src + 2]);
            buf.put_u8(image.data[src + 1]);
            buf.put_u8(image.data[src]);
        }
        buf.put_bytes(0, padding);
    }

    buf.to_vec()
}

/// Reads a BMP file from disk.
///
/// # Errors
///
/// Fails on I/O errors or malformed BMP data.
pub fn load<P: AsRef<Path>>(path: P) -> Result<RgbImage> {
    let data = std::fs::read(path)?;
    decode(&data)
}

/// Writes an RGB image to disk as BMP.
///
/// # Errors
///
/// Fails on I/O errors.
pub fn save<P: AsRef<Path>>(path: P, image: &RgbImage) -> Result<()> {
    std::fs::write(path, encode(image))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_image(width: usize, height: usize) -> RgbImage {
        let mut data = Vec::with_capacity(width * height * 3);
        for y in 0..height {
            for x in 0..width {
                data.push((x * 40) as u8);
                data.push((y * 40) as u8);
                data.push(((x + y) * 20) as u8);
            }
        }
        RgbImage {
            width,
            height,
            data,
        }
    }

    #[test]
    fn test_roundtrip() {
        // 5 wide: rows need a pad byte, which exercises the stride path.
        let image = sample_image(5, 4);
        let decoded = decode(&encode(&image)).unwrap();
        assert_eq!(decoded, image);
    }

    #[test]
    fn test_roundtrip_no_padding() {
        let image = sample_image(4, 3);
        let decoded = decode(&encode(&image)).unwrap();
        assert_eq!(decoded, image);
    }

    #[test]
    fn test_encoded_header_fields() {
        let image = sample_image(5, 2);
        let bytes = encode(&image);

        assert_eq!(&bytes[0..2], b"BM");
        assert_eq!(read_u32(&bytes, 10), HEADERS_LEN as u32);
        assert_eq!(read_u32(&bytes, 18), 5);
        assert_eq!(read_u32(&bytes, 22), 2);
        assert_eq!(read_u16(&bytes, 28), 24);
        // 5 * 3 = 15 bytes, padded to 16 per row.
        assert_eq!(bytes.len(), HEADERS_LEN + 16 * 2);
    }

    #[test]
    fn test_rejects_wrong_magic() {
        let mut bytes = encode(&sample_image(2, 2));
        bytes[0] = b'X';
        assert!(matches!(decode(&bytes), Err(WatermarkError::Bmp(_))));
    }

    #[test]
    fn test_rejects_truncated_file() {
        let bytes = encode(&sample_image(4, 4));
        assert!(decode(&bytes[..bytes.len() - 8]).is_err());
        assert!(decode(&bytes[..10]).is_err());
    }

    #[test]
    fn test_rejects_other_bit_depths() {
        let mut bytes = encode(&sample_image(2, 2));
        bytes[28] = 32;
        assert!(matches!(decode(&bytes), Err(WatermarkError::Bmp(_))));
    }
}
