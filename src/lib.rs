//! LZJWM: a byte-oriented dictionary compressor for random-access decode on
//! embedded runtimes. See the module-level docs of `compress` and
//! `decompress` for the bitstream format and the two algorithms that read
//! and write it.

pub mod cli;
pub mod compress;
pub mod config;
pub mod decompress;
pub mod header;
pub mod io;
pub mod matcher;
pub mod node;
pub mod record;
pub mod yaml;

pub use compress::{CompressError, CompressOutput};
pub use config::Config;
pub use decompress::DecompressError;
