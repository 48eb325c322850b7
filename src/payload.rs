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

//! Text payload packing.
//!
//! The engine transports bipolar symbols; these helpers map text to and from
//! that alphabet. Each byte unpacks MSB-first, set bits to `+1` and clear
//! bits to `-1`, matching the detector's `sum >= 0 => +1` convention on the
//! way back.

/// Unpacks text into bipolar symbols, 8 per byte, MSB first.
#[must_use]
pub fn text_to_symbols(text: &str) -> Vec<i8> {
    let mut symbols = Vec::with_capacity(text.len() * 8);
    for byte in text.bytes() {
        for shift in (0..8).rev() {
            symbols.push(if (byte >> shift) & 1 == 1 { 1 } else { -1 });
        }
    }
    symbols
}

/// Packs bipolar symbols back into text.
///
/// Symbols are consumed in groups of 8 (trailing partial bytes are dropped);
/// a non-negative symbol counts as a set bit. Invalid UTF-8 sequences are
/// replaced rather than rejected, since a damaged watermark should still
/// yield a best-effort message.
#[must_use]
pub fn symbols_to_text(symbols: &[i8]) -> String {
    let bytes: Vec<u8> = symbols
        .chunks_exact(8)
        .map(|chunk| {
            chunk
                .iter()
                .fold(0_u8, |acc, &s| (acc << 1) | u8::from(s >= 0))
        })
        .collect();

    String::from_utf8_lossy(&bytes).into_owned()
}
