//! Command-line surface: argument parsing and the verbosity globals.

pub mod args;
pub mod constants;

pub use args::{Args, OutputForm};
