//! Black-box tests driving the compiled `lzjwm` binary via `std::process::Command`.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tempfile::TempDir;

fn lzjwm_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_lzjwm"))
}

fn run(args: &[&str], stdin: &[u8]) -> (std::process::ExitStatus, Vec<u8>, Vec<u8>) {
    let mut child = Command::new(lzjwm_bin())
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn lzjwm");
    child.stdin.take().unwrap().write_all(stdin).unwrap();
    let output = child.wait_with_output().unwrap();
    (output.status, output.stdout, output.stderr)
}

#[test]
fn compress_decompress_roundtrip_through_files() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input.txt");
    fs::write(&input, b"ababab").unwrap();
    let compressed = dir.path().join("out.bin");

    let status = Command::new(lzjwm_bin())
        .args(["-c", "-o", compressed.to_str().unwrap(), input.to_str().unwrap()])
        .status()
        .unwrap();
    assert!(status.success());

    let (status, stdout, _) = run(&["-d", compressed.to_str().unwrap()], b"");
    assert!(status.success());
    assert_eq!(stdout, b"ababab");
}

#[test]
fn yaml_output_contains_parts_and_raw() {
    let (status, stdout, _) = run(&["-c", "-f", "yaml"], b"hello");
    assert!(status.success());
    let text = String::from_utf8(stdout).unwrap();
    assert!(text.contains("compressed_length"));
    assert!(text.contains("parts"));
    assert!(text.contains("raw"));
}

#[test]
fn c_header_output_has_guard_and_macros() {
    let (status, stdout, _) = run(&["-c", "-f", "c"], b"hello");
    assert!(status.success());
    let text = String::from_utf8(stdout).unwrap();
    assert!(text.contains("#ifndef LZJWM_DATA_H"));
    assert!(text.contains("OFFSET_"));
    assert!(text.contains("LENGTH_"));
    assert!(!text.contains("PROGMEM"));
}

#[test]
fn c_avr_header_adds_progmem() {
    let (status, stdout, _) = run(&["-c", "-f", "c_avr"], b"hello");
    assert!(status.success());
    let text = String::from_utf8(stdout).unwrap();
    assert!(text.contains("PROGMEM"));
}

#[test]
fn dedup_flag_unifies_identical_lines() {
    let (status, stdout, _) = run(&["-c", "-l", "-s", "-f", "yaml"], b"xyzxyz\nxyzxyz\n");
    assert!(status.success());
    let value: serde_yaml::Value = serde_yaml::from_slice(&stdout).unwrap();
    let parts = value["parts"].as_sequence().unwrap();
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0]["compressed_offset"], parts[1]["compressed_offset"]);
}

#[test]
fn missing_mode_flag_exits_with_failure() {
    let (status, _, stderr) = run(&[], b"data");
    assert!(!status.success());
    assert!(!stderr.is_empty());
}

#[test]
fn both_mode_flags_exit_with_failure() {
    let (status, _, _) = run(&["-c", "-d"], b"data");
    assert!(!status.success());
}

#[test]
fn no_compress_nul_flag_emits_nul_bytes_verbatim() {
    let nuls = vec![0u8; 10];
    let (status, stdout, _) = run(&["-c", "-z"], &nuls);
    assert!(status.success());
    assert_eq!(stdout.len(), 10);
    assert!(stdout.iter().all(|&b| b == 0));
}

#[test]
fn lines_mode_names_records_by_index() {
    let (status, stdout, _) = run(&["-c", "-l", "-f", "yaml"], b"one\ntwo\nthree\n");
    assert!(status.success());
    let value: serde_yaml::Value = serde_yaml::from_slice(&stdout).unwrap();
    let names: Vec<String> = value["parts"]
        .as_sequence()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["0", "1", "2"]);
}
