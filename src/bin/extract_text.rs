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

//! Extract a text message from a watermarked BMP image.
//!
//! Usage:
//!   extract_text <input.bmp> <message-bytes> [key]
//!
//! The message length in bytes and the key must match what embed_text used.

use lumamark::{bmp, color, extract, payload, LumaPlane, BLOCK_ALIGN};
use std::process::ExitCode;

const DEFAULT_KEY: u64 = 0xABCD_EF12_3456_7890;

fn parse_key(arg: &str) -> Option<u64> {
    if let Some(hex) = arg.strip_prefix("0x").or_else(|| arg.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16).ok()
    } else {
        arg.parse().ok()
    }
}

fn usage(program: &str) {
    eprintln!("Usage: {program} <input.bmp> <message-bytes> [key]");
}

fn run(args: &[String]) -> lumamark::Result<()> {
    let input = &args[0];
    let message_bytes: usize = args[1].parse().map_err(|_| {
        lumamark::WatermarkError::InvalidOperation(format!(
            "message length '{}' is not a number",
            args[1]
        ))
    })?;
    let key = args.get(2).and_then(|a| parse_key(a)).unwrap_or(DEFAULT_KEY);

    log::info!("loading {input}");
    let rgb = bmp::load(input)?;
    println!("Input: {input} ({}x{})", rgb.width, rgb.height);

    let ycbcr = color::rgb_to_ycbcr(&rgb);
    let plane = LumaPlane::from_vec(rgb.width, rgb.height, ycbcr.y)?;
    let mut padded = plane.padded_to_multiple(BLOCK_ALIGN);

    let result = extract(&mut padded, key, message_bytes * 8)?;
    let message = payload::symbols_to_text(&result.bits);

    println!("Key: {key:#018X}");
    println!("Message: {message}");
    println!("Verdict: {:?}", result.verdict);
    println!(
        "Confidence: mean {:.3}, min {:.3}",
        result.mean_confidence, result.min_confidence
    );

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        usage(args.first().map_or("extract_text", String::as_str));
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
