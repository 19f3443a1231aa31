//! Command implementations for OxiHuff CLI.

pub mod compress;
pub mod decompress;
pub mod info;
pub mod table;

pub use compress::cmd_compress;
pub use decompress::cmd_decompress;
pub use info::cmd_info;
pub use table::cmd_table;
pub use test::cmd_test;
