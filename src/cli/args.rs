//! Command-line argument parsing, via `clap`'s derive API.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Output form selected by `-f`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputForm {
    Raw,
    Yaml,
    C,
    #[value(name = "c_avr")]
    CAvr,
}

/// Parsed command line.
#[derive(Debug, Parser)]
#[command(name = "lzjwm", about = "byte-oriented dictionary compressor for random-access decode")]
pub struct Args {
    /// Compress the input.
    #[arg(short = 'c')]
    pub compress: bool,

    /// Decompress the input.
    #[arg(short = 'd')]
    pub decompress: bool,

    /// Parse input as a YAML list of `{name, data}` records.
    #[arg(short = 'y')]
    pub yaml: bool,

    /// Treat each input line as its own record, named by line index.
    #[arg(short = 'l')]
    pub lines: bool,

    /// Dedup-and-sort records by data before framing.
    #[arg(short = 's')]
    pub dedup: bool,

    /// Append a NUL terminator between records.
    #[arg(short = '0')]
    pub terminate: bool,

    /// Add NUL to the no_compress set, so it survives verbatim for
    /// downstream random-access scanning.
    #[arg(short = 'z')]
    pub no_compress_nul: bool,

    /// Increase diagnostic verbosity (repeatable).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Output form when compressing.
    #[arg(short = 'f', value_enum, default_value_t = OutputForm::Raw)]
    pub format: OutputForm,

    /// Output path (default stdout).
    #[arg(short = 'o')]
    pub output: Option<PathBuf>,

    /// Input files (default stdin).
    pub files: Vec<PathBuf>,
}

impl Args {
    /// Validate that exactly one of `-c`/`-d` was given.
    pub fn validate(&self) -> Result<(), String> {
        if self.compress == self.decompress {
            Err("one of -c or -d is required".to_string())
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        let mut full = vec!["lzjwm"];
        full.extend_from_slice(args);
        Args::parse_from(full)
    }

    #[test]
    fn compress_flag_sets_compress() {
        let a = parse(&["-c"]);
        assert!(a.compress);
        assert!(!a.decompress);
    }

    #[test]
    fn rejects_neither_c_nor_d() {
        assert!(parse(&[]).validate().is_err());
    }

    #[test]
    fn rejects_both_c_and_d() {
        assert!(parse(&["-c", "-d"]).validate().is_err());
    }

    #[test]
    fn verbose_counts_repetitions() {
        let a = parse(&["-c", "-vvv"]);
        assert_eq!(a.verbose, 3);
    }

    #[test]
    fn format_defaults_to_raw() {
        assert_eq!(parse(&["-c"]).format, OutputForm::Raw);
    }

    #[test]
    fn format_yaml_is_selectable() {
        assert_eq!(parse(&["-c", "-f", "yaml"]).format, OutputForm::Yaml);
    }

    #[test]
    fn collects_positional_files() {
        let a = parse(&["-c", "a.txt", "b.txt"]);
        assert_eq!(a.files, vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]);
    }
}
