//! Input/output plumbing for the CLI: reading one or more input files (or
//! stdin), writing the chosen output form to a path or stdout, and splitting
//! joined input into lines for `-l` mode.
//!
//! Each input is read whole and the output written once — no sparse-file
//! tracking, no overwrite prompting, no multithreaded readers.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Record name used for a single unnamed stream read from stdin.
pub const STDIN_NAME: &str = "<stdin>";

/// One input stream read to completion, paired with the name its record
/// takes in the default (no `-y`/`-l`) framing mode.
pub struct InputFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Read every path in `paths` in order, or stdin alone when `paths` is empty.
pub fn read_inputs(paths: &[PathBuf]) -> Result<Vec<InputFile>> {
    if paths.is_empty() {
        let mut bytes = Vec::new();
        io::stdin().read_to_end(&mut bytes).context("reading stdin")?;
        return Ok(vec![InputFile { name: STDIN_NAME.to_string(), bytes }]);
    }

    paths
        .iter()
        .map(|path| {
            let mut bytes = Vec::new();
            File::open(path)
                .with_context(|| format!("opening {}", path.display()))?
                .read_to_end(&mut bytes)
                .with_context(|| format!("reading {}", path.display()))?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.to_string_lossy().into_owned());
            Ok(InputFile { name, bytes })
        })
        .collect()
}

/// Write `bytes` to `path`, or stdout when `path` is `None`.
pub fn write_output(path: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(path) => File::create(path)
            .with_context(|| format!("creating {}", path.display()))?
            .write_all(bytes)
            .with_context(|| format!("writing {}", path.display())),
        None => io::stdout().write_all(bytes).context("writing stdout"),
    }
}

/// Split `bytes` into lines: `\r\n`, lone `\r`, and lone `\n` each terminate
/// a line; a buffer ending exactly on a terminator produces no trailing
/// empty line.
pub fn splitlines(bytes: &[u8]) -> Vec<Vec<u8>> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\r' => {
                lines.push(bytes[start..i].to_vec());
                i += 1;
                if bytes.get(i) == Some(&b'\n') {
                    i += 1;
                }
                start = i;
            }
            b'\n' => {
                lines.push(bytes[start..i].to_vec());
                i += 1;
                start = i;
            }
            _ => i += 1,
        }
    }
    if start < bytes.len() {
        lines.push(bytes[start..].to_vec());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_lf() {
        assert_eq!(splitlines(b"a\nb\nc"), vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]);
    }

    #[test]
    fn trailing_terminator_has_no_empty_line() {
        assert_eq!(splitlines(b"a\nb\n"), vec![b"a".to_vec(), b"b".to_vec()]);
    }

    #[test]
    fn handles_crlf_and_lone_cr() {
        assert_eq!(
            splitlines(b"a\r\nb\rc"),
            vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]
        );
    }

    #[test]
    fn empty_input_has_no_lines() {
        assert!(splitlines(b"").is_empty());
    }
}
