//! The random-access stream decoder.

use std::error::Error;
use std::fmt;

use crate::config::Config;

/// Recursion bound for nested backreference expansion. Well-formed streams
/// are bounded by `max_offset` per step and chain to at most `O(log N)`
/// depth; this guards against the unbounded depth a malicious stream could
/// otherwise induce.
const MAX_RECURSION_DEPTH: usize = 100_000;

/// Errors surfaced by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecompressError {
    /// A backreference's computed target position (`start - back - 2`) is
    /// negative — the stream is malformed.
    MalformedBitstream { at: usize },
    /// Nested backreference expansion exceeded the recursion bound.
    RecursionTooDeep,
}

impl fmt::Display for DecompressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecompressError::MalformedBitstream { at } => {
                write!(f, "backreference at token offset {at} targets a negative position")
            }
            DecompressError::RecursionTooDeep => {
                write!(f, "backreference expansion exceeded the maximum nesting depth")
            }
        }
    }
}

impl Error for DecompressError {}

/// Decode up to `needed` original bytes starting at bitstream position
/// `start`, appending them to `sink`. Returns the number of bytes actually
/// delivered — fewer than `needed` only when `buf` is exhausted first; this
/// is not an error, callers compare the return value against what they
/// expected.
///
/// Seed `start` with a record's `compressed_offset` and `needed` with its
/// `length` for random-access decode of a single record.
pub fn decompress(
    buf: &[u8],
    start: usize,
    needed: usize,
    config: &Config,
    sink: &mut Vec<u8>,
) -> Result<usize, DecompressError> {
    decompress_at_depth(buf, start, needed, config, sink, 0)
}

fn decompress_at_depth(
    buf: &[u8],
    mut start: usize,
    mut needed: usize,
    config: &Config,
    sink: &mut Vec<u8>,
    depth: usize,
) -> Result<usize, DecompressError> {
    let requested = needed;
    let count_bits = config.count_bits();
    let count_mask = (1u8 << count_bits) - 1;

    while needed > 0 && start < buf.len() {
        let ch = buf[start];
        start += 1;

        if ch & 0x80 == 0 {
            sink.push(ch);
            needed -= 1;
            continue;
        }

        let back = (ch & 0x7f) >> count_bits;
        let count = (ch & count_mask) as usize + 2;

        let target = (start as isize) - (back as isize) - 2;
        if target < 0 {
            return Err(DecompressError::MalformedBitstream { at: start - 1 });
        }
        let target = target as usize;

        if needed > count {
            if depth >= MAX_RECURSION_DEPTH {
                return Err(DecompressError::RecursionTooDeep);
            }
            let produced = decompress_at_depth(buf, target, count, config, sink, depth + 1)?;
            needed -= produced;
        } else {
            // Tail-continue rather than recurse: the caller only needs a
            // prefix, so jump to the referenced region and keep decoding
            // linearly from there.
            start = target;
        }
    }

    Ok(requested - needed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compress::compress;
    use std::collections::BTreeMap;

    #[test]
    fn truncated_request_returns_partial_count() {
        let cfg = Config::default_config();
        let out = compress(b"hello hello hello", &cfg, &BTreeMap::new()).unwrap();
        let mut sink = Vec::new();
        // Request more than the stream holds once exhausted at start=0.
        let delivered = decompress(&out.bytes, 0, 1000, &cfg, &mut sink).unwrap();
        assert_eq!(delivered, sink.len());
        assert_eq!(sink, b"hello hello hello");
    }

    #[test]
    fn negative_target_is_malformed() {
        let cfg = Config::default_config();
        // 0x80 | (back=0 << 2) | (count_field=0) => decodes to count=2, back=0,
        // target = start(1) - 0 - 2 = -1: malformed when this is the first byte.
        let buf = [0x80u8];
        let mut sink = Vec::new();
        let err = decompress(&buf, 0, 2, &cfg, &mut sink).unwrap_err();
        assert_eq!(err, DecompressError::MalformedBitstream { at: 0 });
    }

    #[test]
    fn partial_prefix_decode_matches_prefix() {
        let cfg = Config::default_config();
        let input = b"the quick brown fox jumps over the lazy dog, again";
        let out = compress(input, &cfg, &BTreeMap::new()).unwrap();
        let mut sink = Vec::new();
        let delivered = decompress(&out.bytes, 0, 3, &cfg, &mut sink).unwrap();
        assert_eq!(delivered, 3);
        assert_eq!(&sink, &input[..3]);
    }
}
