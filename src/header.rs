//! C header emission.
//!
//! Escapes the compressed byte buffer into a C string literal, wraps it
//! into ≤80-character quoted fragments, and emits `OFFSET_*`/`LENGTH_*`
//! macros for every record in the manifest.

use crate::record::ManifestEntry;

const LINE_LENGTH: usize = 80;

/// Characters with a named C escape, paired index-for-index with their
/// single-letter spelling (`\a`, `\b`, ... `\\`, `\"`).
const NAMED_ESCAPE_BYTES: [u8; 9] = [0x07, 0x08, 0x0c, 0x0a, 0x0d, 0x09, 0x0b, b'\\', b'"'];
const NAMED_ESCAPE_LETTERS: [u8; 9] = [b'a', b'b', b'f', b'n', b'r', b't', b'v', b'\\', b'"'];

/// Uppercase a record name into a valid C identifier fragment: letters and
/// digits are uppercased, everything else (including already-uppercase
/// punctuation) becomes `_`.
pub fn to_dname(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Escape one byte into its C string-literal spelling: a named escape,
/// verbatim printable ASCII (`0x20..=0x7e`), or three-digit octal.
fn escape_byte(byte: u8) -> String {
    if let Some(pos) = NAMED_ESCAPE_BYTES.iter().position(|&b| b == byte) {
        format!("\\{}", NAMED_ESCAPE_LETTERS[pos] as char)
    } else if (0x20..=0x7e).contains(&byte) {
        (byte as char).to_string()
    } else {
        format!("\\{:03o}", byte)
    }
}

/// Pack escape units greedily into lines no shorter than `LINE_LENGTH`
/// characters are needed, stopping once a line reaches `LINE_LENGTH` — an
/// escape unit (up to 4 characters) is never split across lines, so a line
/// may run slightly past `LINE_LENGTH` before the check re-triggers.
fn wrap_units(units: &[String]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut idx = 0;
    while idx < units.len() {
        let mut line = String::new();
        while line.len() < LINE_LENGTH && idx < units.len() {
            line.push_str(&units[idx]);
            idx += 1;
        }
        lines.push(line);
    }
    lines
}

/// Render `data` as the body of a C string literal declaration, split into
/// concatenated quoted fragments.
fn bytes_to_string_decl(name: &str, data: &[u8], prgmem: &str) -> String {
    let units: Vec<String> = data.iter().map(|&b| escape_byte(b)).collect();
    let header = format!("static const char {name}[]{prgmem} = ");

    if units.is_empty() {
        return format!("{header}\"\";\n");
    }

    let lines = wrap_units(&units);
    let mut out = format!("{header}\n");
    let last = lines.len() - 1;
    for (i, line) in lines.iter().enumerate() {
        let terminator = if i == last { ";" } else { "" };
        out.push_str(&format!("    \"{line}\"{terminator}\n"));
    }
    out
}

/// Emit a full C header: guard, `OFFSET_*`/`LENGTH_*` macros per manifest
/// entry, and the compressed data array.
///
/// `avr` selects the `PROGMEM` qualifier (`-f c_avr` vs `-f c`).
pub fn emit_header(compressed: &[u8], manifest: &[ManifestEntry], avr: bool) -> String {
    let mut out = String::new();
    out.push_str("#ifndef LZJWM_DATA_H\n");
    out.push_str("#define LZJWM_DATA_H\n\n");

    for entry in manifest {
        let id = to_dname(&entry.name);
        out.push_str(&format!("#define OFFSET_{id} {}\n", entry.compressed_offset));
        out.push_str(&format!("#define LENGTH_{id} {}\n\n", entry.length));
    }

    let prgmem = if avr { " PROGMEM" } else { "" };
    out.push_str(&bytes_to_string_decl("lzjwm_data", compressed, prgmem));
    out.push('\n');
    out.push_str("#endif\n");
    out
}
