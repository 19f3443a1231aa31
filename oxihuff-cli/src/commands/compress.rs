//! Compress command implementation.

use crate::utils::{check_overwrite, compressed_path, format_bits};
use oxihuff_huffman::{EncodeStats, encode_file};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Serialize)]
struct CompressReport<'a> {
    input: &'a Path,
    output: &'a Path,
    original_size: u64,
    compressed_size: u64,
    header_bits: u64,
    payload_bits: u64,
    ratio: f64,
    space_savings: f64,
}

pub fn cmd_compress(
    input: &Path,
    output: Option<PathBuf>,
    force: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = output.unwrap_or_else(|| compressed_path(input));
    check_overwrite(&output, force)?;

    let stats = encode_file(input, &output)?;

    if json {
        let report = CompressReport {
            input,
            output: &output,
            original_size: stats.original_size,
            compressed_size: stats.compressed_size,
            header_bits: stats.header_bits,
            payload_bits: stats.payload_bits,
            ratio: stats.ratio(),
            space_savings: stats.space_savings(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_stats(input, &output, &stats);
    Ok(())
}

fn print_stats(input: &Path, output: &Path, stats: &EncodeStats) {
    println!("{} -> {}", input.display(), output.display());
    println!("  Original size:   {} bytes", stats.original_size);
    println!("  Compressed size: {} bytes", stats.compressed_size);
    println!("  Tree header:     {}", format_bits(stats.header_bits));
    println!("  Payload:         {}", format_bits(stats.payload_bits));
    if stats.original_size > 0 {
        println!("  Space savings:   {:.1}%", stats.space_savings());
    }
}
