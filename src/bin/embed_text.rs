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

//! Embed a text message into the luminance channel of a BMP image.
//!
//! Usage:
//!   embed_text <input.bmp> <output.bmp> <message> [key] [alpha]
//!
//! The key accepts decimal or 0x-prefixed hex. Set RUST_LOG=debug for
//! pipeline details.

use lumamark::{bmp, capacity, color, embed, extract, metrics, payload, LumaPlane, BLOCK_ALIGN};
use std::process::ExitCode;

const DEFAULT_KEY: u64 = 0xABCD_EF12_3456_7890;
const DEFAULT_ALPHA: f32 = 9.0;

fn parse_key(arg: &str) -> Option<u64> {
    if let Some(hex) = arg.strip_prefix("0x").or_else(|| arg.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16).ok()
    } else {
        arg.parse().ok()
    }
}

fn usage(program: &str) {
    eprintln!("Usage: {program} <input.bmp> <output.bmp> <message> [key] [alpha]");
    eprintln!();
    eprintln!("Embeds <message> into the luminance channel of <input.bmp> and");
    eprintln!("writes the watermarked image to <output.bmp>. The same key must");
    eprintln!("be given to extract_text to recover the message.");
}

fn run(args: &[String]) -> lumamark::Result<()> {
    let input = &args[0];
    let output = &args[1];
    let message = &args[2];
    let key = args.get(3).and_then(|a| parse_key(a)).unwrap_or(DEFAULT_KEY);
    let alpha: f32 = args
        .get(4)
        .and_then(|a| a.parse().ok())
        .unwrap_or(DEFAULT_ALPHA);

    log::info!("loading {input}");
    let rgb = bmp::load(input)?;
    println!("Input: {input} ({}x{})", rgb.width, rgb.height);

    let mut ycbcr = color::rgb_to_ycbcr(&rgb);
    let plane = LumaPlane::from_vec(rgb.width, rgb.height, ycbcr.y.clone())?;
    let mut padded = plane.padded_to_multiple(BLOCK_ALIGN);
    if padded.width() != rgb.width || padded.height() != rgb.height {
        println!("Padded to: {}x{}", padded.width(), padded.height());
    }

    let symbols = payload::text_to_symbols(message);
    let max_bits = capacity(padded.width(), padded.height());
    println!(
        "Payload: {} bits ({} bytes), capacity {} bits",
        symbols.len(),
        message.len(),
        max_bits
    );

    let reference = padded.data().to_vec();
    embed(&mut padded, &symbols, key, alpha)?;

    let psnr = metrics::psnr(&reference, padded.data());
    println!("Key: {key:#018X}");
    println!("Alpha: {alpha:.2}");
    println!("PSNR: {psnr:.2} dB");

    // Recombine the marked luminance with the untouched chroma planes.
    let cropped = padded.cropped(rgb.width, rgb.height)?;
    ycbcr.y = cropped.into_vec();
    bmp::save(output, &color::ycbcr_to_rgb(&ycbcr))?;
    println!("Saved: {output}");

    // Sanity-check that the mark reads back before declaring success.
    let result = extract(&mut padded, key, symbols.len())?;
    let ber = metrics::bit_error_rate(&symbols, &result.bits);
    println!(
        "Verify: {:?}, mean confidence {:.3}, BER {:.4}",
        result.verdict, result.mean_confidence, ber
    );

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 4 {
        usage(args.first().map_or("embed_text", String::as_str));
        return ExitCode::FAILURE;
    }

    match run(&args[1..]) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
