//! Record framing and the anchor map.
//!
//! Concatenates named records into one buffer the compressor can operate
//! on, tracking which byte offsets must remain individually addressable.
//! The optional dedup-and-sort mode (`-s`) groups records by identical
//! `data` before framing, emitting each unique blob once and back-filling
//! every duplicate's manifest entry from its group's sole emission.

use std::collections::BTreeMap;

use crate::compress::{compress, CompressError};
use crate::config::Config;

/// One record as supplied by a caller, before framing.
#[derive(Debug, Clone)]
pub struct InputRecord {
    pub name: String,
    pub data: Vec<u8>,
    /// Declared length, honored verbatim when present rather than always
    /// recomputed from `data.len()`.
    pub length: Option<usize>,
}

impl InputRecord {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        InputRecord { name: name.into(), data, length: None }
    }

    fn effective_length(&self) -> usize {
        self.length.unwrap_or(self.data.len())
    }
}

/// One entry of the post-compression record manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub name: String,
    pub length: usize,
    pub compressed_offset: usize,
}

struct Group {
    data: Vec<u8>,
    /// Indices into the original `records` slice sharing this group's data.
    members: Vec<usize>,
}

fn group_records(records: &[InputRecord], dedup: bool) -> Vec<Group> {
    if !dedup {
        return records
            .iter()
            .enumerate()
            .map(|(i, r)| Group { data: r.data.clone(), members: vec![i] })
            .collect();
    }

    // BTreeMap<Vec<u8>, _> sorts groups by byte-lexicographic order of their
    // data, which affects which group lands at offset 0.
    let mut grouped: BTreeMap<Vec<u8>, Vec<usize>> = BTreeMap::new();
    for (i, r) in records.iter().enumerate() {
        grouped.entry(r.data.clone()).or_default().push(i);
    }
    grouped
        .into_iter()
        .map(|(data, members)| Group { data, members })
        .collect()
}

/// Frame `records` into one buffer, compress it, and return the compressed
/// bitstream alongside a manifest entry per input record (in the same
/// relative order groups were emitted: original order normally, or sorted
/// group order under `dedup`).
pub fn frame_and_compress(
    records: &[InputRecord],
    config: &Config,
    dedup: bool,
) -> Result<(Vec<u8>, Vec<ManifestEntry>), CompressError> {
    let groups = group_records(records, dedup);

    let mut buffer = Vec::new();
    let mut anchors: BTreeMap<usize, usize> = BTreeMap::new();
    for (group_idx, group) in groups.iter().enumerate() {
        // Zero-length records are never given an addressable anchor: there
        // is no byte to point at, so their manifest entry instead gets the
        // `compressed_offset = 0` sentinel below, regardless of where they
        // fall in the buffer.
        if !group.data.is_empty() {
            anchors.insert(buffer.len(), group_idx);
        }
        buffer.extend_from_slice(&group.data);
        buffer.extend_from_slice(config.terminator());
    }

    let compressed = compress(&buffer, config, &anchors)?;

    let mut manifest = Vec::new();
    for (group_idx, group) in groups.iter().enumerate() {
        let compressed_offset = if group.data.is_empty() {
            0
        } else {
            compressed.anchor_offsets[&group_idx]
        };
        for &member in &group.members {
            manifest.push(ManifestEntry {
                name: records[member].name.clone(),
                length: records[member].effective_length(),
                compressed_offset,
            });
        }
    }

    Ok((compressed.bytes, manifest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decompress::decompress;

    #[test]
    fn repeated_records_are_each_independently_addressable() {
        let cfg = Config::default_config();
        let records = vec![
            InputRecord::new("0", b"hello".to_vec()),
            InputRecord::new("1", b"hello".to_vec()),
            InputRecord::new("2", b"hello".to_vec()),
        ];
        let (bytes, manifest) = frame_and_compress(&records, &cfg, false).unwrap();
        assert_eq!(manifest.len(), 3);
        for entry in &manifest {
            let mut sink = Vec::new();
            let n = decompress(&bytes, entry.compressed_offset, entry.length, &cfg, &mut sink).unwrap();
            assert_eq!(n, 5);
            assert_eq!(sink, b"hello");
        }
    }

    #[test]
    fn dedup_unifies_identical_records() {
        let cfg = Config::default_config();
        let records = vec![
            InputRecord::new("foo", b"xyzxyz".to_vec()),
            InputRecord::new("bar", b"xyzxyz".to_vec()),
        ];
        let (bytes, manifest) = frame_and_compress(&records, &cfg, true).unwrap();
        assert_eq!(manifest.len(), 2);
        let foo = manifest.iter().find(|e| e.name == "foo").unwrap();
        let bar = manifest.iter().find(|e| e.name == "bar").unwrap();
        assert_eq!(foo.compressed_offset, bar.compressed_offset);
        assert_eq!(foo.length, 6);
        assert_eq!(bar.length, 6);
        let mut sink = Vec::new();
        decompress(&bytes, foo.compressed_offset, foo.length, &cfg, &mut sink).unwrap();
        assert_eq!(sink, b"xyzxyz");
    }

    #[test]
    fn zero_length_record_gets_sentinel_offset() {
        let cfg = Config::default_config();
        let records = vec![InputRecord::new("empty", Vec::new()), InputRecord::new("rest", b"abc".to_vec())];
        let (_, manifest) = frame_and_compress(&records, &cfg, false).unwrap();
        let empty = manifest.iter().find(|e| e.name == "empty").unwrap();
        assert_eq!(empty.length, 0);
        assert_eq!(empty.compressed_offset, 0);
    }

    #[test]
    fn terminator_separates_records() {
        let mut cfg = Config::default_config();
        cfg.set_terminator(vec![0]);
        let records = vec![InputRecord::new("a", b"ab".to_vec()), InputRecord::new("b", b"cd".to_vec())];
        let (bytes, manifest) = frame_and_compress(&records, &cfg, false).unwrap();
        let mut sink = Vec::new();
        for entry in &manifest {
            sink.clear();
            decompress(&bytes, entry.compressed_offset, entry.length, &cfg, &mut sink).unwrap();
        }
        // Both records still independently round-trip even with a separator
        // byte woven through the shared buffer.
        let a = manifest.iter().find(|e| e.name == "a").unwrap();
        let mut sink = Vec::new();
        decompress(&bytes, a.compressed_offset, a.length, &cfg, &mut sink).unwrap();
        assert_eq!(sink, b"ab");
    }
}
