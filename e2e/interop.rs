//! Round-trips representative compression scenarios through the built CLI
//! binary (`-c` then `-d`), both as a full-stream decode and, where framing
//! makes full-stream decode lossy (line splitting, dedup), via per-record
//! random-access decode seeded from the `-f yaml` manifest.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use lzjwm::config::Config;
use lzjwm::decompress::decompress;
use serde::Deserialize;

fn lzjwm_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_lzjwm"))
}

fn pipe(args: &[&str], stdin: &[u8]) -> Vec<u8> {
    let mut child = Command::new(lzjwm_bin())
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn lzjwm");
    child.stdin.take().unwrap().write_all(stdin).unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success(), "lzjwm {:?} failed", args);
    output.stdout
}

fn round_trip(extra_compress_args: &[&str], input: &[u8]) -> Vec<u8> {
    let mut args = vec!["-c"];
    args.extend_from_slice(extra_compress_args);
    let compressed = pipe(&args, input);
    pipe(&["-d"], &compressed)
}

#[derive(Debug, Deserialize)]
struct YamlPart {
    name: String,
    length: usize,
    compressed_offset: usize,
}

#[derive(Debug, Deserialize)]
struct YamlOutput {
    #[serde(with = "serde_bytes")]
    raw: Vec<u8>,
    #[allow(dead_code)]
    compressed_length: usize,
    parts: Vec<YamlPart>,
}

fn compress_yaml(extra_args: &[&str], input: &[u8]) -> YamlOutput {
    let mut args = vec!["-c", "-f", "yaml"];
    args.extend_from_slice(extra_args);
    let out = pipe(&args, input);
    serde_yaml::from_slice(&out).expect("parse yaml output")
}

fn decode_part(raw: &[u8], part: &YamlPart) -> Vec<u8> {
    let cfg = Config::default_config();
    let mut sink = Vec::new();
    let produced = decompress(raw, part.compressed_offset, part.length, &cfg, &mut sink).unwrap();
    assert_eq!(produced, part.length);
    sink
}

#[test]
fn repeated_pattern_round_trips() {
    assert_eq!(round_trip(&[], b"ababab"), b"ababab");
}

#[test]
fn line_mode_records_round_trip_via_manifest_offsets() {
    let out = compress_yaml(&["-l"], b"hello\nhello\nhello\n");
    assert_eq!(out.parts.len(), 3);
    for (i, part) in out.parts.iter().enumerate() {
        assert_eq!(part.name, i.to_string());
        assert_eq!(decode_part(&out.raw, part), b"hello");
    }
}

#[test]
fn nul_run_with_no_compress_round_trips() {
    let input = vec![0u8; 10];
    assert_eq!(round_trip(&["-z"], &input), input);
}

#[test]
fn dedup_records_round_trip_via_manifest_offsets() {
    let out = compress_yaml(&["-l", "-s"], b"xyzxyz\nxyzxyz\n");
    assert_eq!(out.parts.len(), 2);
    assert_eq!(out.parts[0].compressed_offset, out.parts[1].compressed_offset);
    for part in &out.parts {
        assert_eq!(decode_part(&out.raw, part), b"xyzxyz");
    }
}

#[test]
fn long_run_of_repeated_byte_round_trips() {
    let input = vec![b'a'; 32];
    assert_eq!(round_trip(&[], &input), input);
}

#[test]
fn long_sentence_round_trips() {
    let input = b"the quick brown fox jumps over the lazy dog, again";
    assert_eq!(round_trip(&[], input), *input);
}

#[test]
fn multi_file_default_framing_round_trips_concatenation() {
    let dir = tempfile::TempDir::new().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    std::fs::write(&a, b"foo").unwrap();
    std::fs::write(&b, b"bar").unwrap();

    let mut child = Command::new(lzjwm_bin())
        .args(["-c", a.to_str().unwrap(), b.to_str().unwrap()])
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    let compressed = child.wait_with_output().unwrap().stdout;

    assert_eq!(pipe(&["-d"], &compressed), b"foobar");
}
