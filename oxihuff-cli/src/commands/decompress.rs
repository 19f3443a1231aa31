//! Decompress command implementation.

use crate::utils::{check_overwrite, decompressed_path};
use oxihuff_huffman::decode_file;
use std::path::{Path, PathBuf};

pub fn cmd_decompress(
    input: &Path,
    output: Option<PathBuf>,
    force: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = output.unwrap_or_else(|| decompressed_path(input));
    check_overwrite(&output, force)?;

    let stats = decode_file(input, &output)?;

    println!("{} -> {}", input.display(), output.display());
    println!(
        "  {} bytes -> {} bytes",
        stats.compressed_size, stats.decompressed_size
    );
    Ok(())
}
