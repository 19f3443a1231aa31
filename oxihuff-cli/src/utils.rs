//! Utility functions for the CLI.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Extension given to compressed files.
pub const EXTENSION: &str = "huff";

/// Default output path for `compress`: the input with `.huff` appended.
pub fn compressed_path(input: &Path) -> PathBuf {
    append_extension(input, EXTENSION)
}

/// Default output path for `decompress`: the input without its `.huff`
/// extension, or with `.out` appended if it has none.
pub fn decompressed_path(input: &Path) -> PathBuf {
    if input.extension() == Some(OsStr::new(EXTENSION)) {
        input.with_extension("")
    } else {
        append_extension(input, "out")
    }
}

fn append_extension(path: &Path, extension: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

/// Refuse to replace an existing file unless `force` is set.
pub fn check_overwrite(path: &Path, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !force && path.exists() {
        return Err(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )
        .into());
    }
    Ok(())
}

/// Format a size in bits as bytes plus leftover bits, e.g. `4 bytes + 7 bits`.
pub fn format_bits(bits: u64) -> String {
    match (bits / 8, bits % 8) {
        (bytes, 0) => format!("{} bytes", bytes),
        (bytes, rest) => format!("{} bytes + {} bits", bytes, rest),
    }
}
