//! Info command implementation.

use crate::utils::format_bits;
use oxihuff_huffman::codec::SYMBOL_COUNT_BITS;
use oxihuff_huffman::read_header;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct InfoReport<'a> {
    file: &'a Path,
    compressed_size: u64,
    symbol_count: u64,
    distinct_bytes: usize,
    header_bits: u64,
    max_code_bits: u8,
    payload_bits: u64,
}

pub fn cmd_info(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let data = std::fs::read(input)?;
    let header = read_header(&data)?;

    let (distinct_bytes, max_code_bits) = match &header.tree {
        Some(tree) => (tree.leaf_count(), tree.code_table()?.max_len()),
        None => (0, 0),
    };
    let used_bits = SYMBOL_COUNT_BITS as u64 + header.header_bits;
    // Includes the final byte's padding.
    let payload_bits = (data.len() as u64 * 8).saturating_sub(used_bits);

    let report = InfoReport {
        file: input,
        compressed_size: data.len() as u64,
        symbol_count: header.symbol_count,
        distinct_bytes,
        header_bits: header.header_bits,
        max_code_bits,
        payload_bits,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Stream Information");
    println!("==================");
    println!("File: {}", input.display());
    println!("Size: {} bytes", report.compressed_size);
    println!();
    println!("Header:");
    println!("  Symbols: {}", report.symbol_count);
    println!("  Distinct bytes: {}", report.distinct_bytes);
    println!("  Tree header: {}", format_bits(report.header_bits));
    println!("  Longest code: {} bits", report.max_code_bits);
    println!("  Payload (with padding): {}", format_bits(report.payload_bits));

    Ok(())
}
