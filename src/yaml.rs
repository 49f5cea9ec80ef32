//! YAML record I/O.
//!
//! Input (`-y`): a top-level sequence of `{name, data}` mappings, `data`
//! either an ASCII string or raw bytes. Output (`-f yaml`): a single mapping
//! `{raw, compressed_length, parts}`.
//!
//! Binary fields (`data`, `raw`) go through `serde_bytes` so they serialize
//! as YAML's `!!binary` base64 blocks.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::record::{InputRecord, ManifestEntry};

#[derive(Debug, Deserialize)]
struct RawYamlRecord {
    name: serde_yaml::Value,
    #[serde(default, with = "serde_bytes")]
    data: Vec<u8>,
    #[serde(default)]
    length: Option<usize>,
}

fn name_from_value(value: &serde_yaml::Value) -> Result<String> {
    match value {
        serde_yaml::Value::String(s) => Ok(s.clone()),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        other => Err(anyhow!("record name must be a string or number, got {other:?}")),
    }
}

/// Parse the `-y` input shape into [`InputRecord`]s.
pub fn parse_input_records(input: &[u8]) -> Result<Vec<InputRecord>> {
    let raw: Vec<RawYamlRecord> =
        serde_yaml::from_slice(input).context("failed to parse YAML record list")?;
    raw.into_iter()
        .map(|r| {
            Ok(InputRecord {
                name: name_from_value(&r.name)?,
                data: r.data,
                length: r.length,
            })
        })
        .collect()
}

#[derive(Debug, Serialize)]
struct YamlPart {
    name: String,
    length: usize,
    compressed_offset: usize,
}

#[derive(Debug, Serialize)]
struct YamlOutput {
    #[serde(with = "serde_bytes")]
    raw: Vec<u8>,
    compressed_length: usize,
    parts: Vec<YamlPart>,
}

/// Render the `-f yaml` output shape.
pub fn render_output(raw: &[u8], manifest: &[ManifestEntry]) -> Result<String> {
    let output = YamlOutput {
        raw: raw.to_vec(),
        compressed_length: raw.len(),
        parts: manifest
            .iter()
            .map(|m| YamlPart { name: m.name.clone(), length: m.length, compressed_offset: m.compressed_offset })
            .collect(),
    };
    serde_yaml::to_string(&output).context("failed to render YAML output")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ascii_string_data() {
        let yaml = "- name: greeting\n  data: hello\n";
        let records = parse_input_records(yaml.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "greeting");
        assert_eq!(records[0].data, b"hello");
    }

    #[test]
    fn parses_binary_data_tag() {
        // base64 of b"hi" is "aGk="
        let yaml = "- name: bin\n  data: !!binary aGk=\n";
        let records = parse_input_records(yaml.as_bytes()).unwrap();
        assert_eq!(records[0].data, b"hi");
    }

    #[test]
    fn honors_explicit_length() {
        let yaml = "- name: r\n  data: ab\n  length: 9\n";
        let records = parse_input_records(yaml.as_bytes()).unwrap();
        assert_eq!(records[0].length, Some(9));
    }

    #[test]
    fn renders_output_shape_round_trips_through_parser() {
        let manifest = vec![ManifestEntry { name: "a".into(), length: 3, compressed_offset: 0 }];
        let rendered = render_output(b"abc", &manifest).unwrap();
        let value: serde_yaml::Value = serde_yaml::from_str(&rendered).unwrap();
        assert_eq!(value["compressed_length"], 3);
        assert_eq!(value["parts"][0]["name"], "a");
    }
}
