use std::{fs, path::Path};

use huffpack::{decode, encode, Corruption, Error};
use tempfile::TempDir;

fn round_trip(dir: &TempDir, input: &[u8]) -> Vec<u8> {
    let plain = dir.path().join("input.txt");
    let encoded = dir.path().join("encoded.bin");
    let decoded = dir.path().join("decoded.txt");
    fs::write(&plain, input).unwrap();

    encode(&plain, &encoded).unwrap();
    decode(&encoded, &decoded).unwrap();
    fs::read(&decoded).unwrap()
}

#[test]
fn files_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let inputs: Vec<Vec<u8>> = vec![
        Vec::new(),
        b"a".to_vec(),
        b"aaab".to_vec(),
        vec![b'\n'; 1000],
        b"___\n".repeat(50),
        b"Lorem ipsum dolor sit amet, consectetur adipiscing elit.\n".repeat(40),
        (0..=255u8).rev().cycle().take(3000).collect(),
    ];
    for input in inputs {
        assert_eq!(round_trip(&dir, &input), input);
    }
}

#[test]
fn empty_file_encodes_to_a_header() {
    let dir = tempfile::tempdir().unwrap();
    assert!(round_trip(&dir, b"").is_empty());
    let encoded = fs::read(dir.path().join("encoded.bin")).unwrap();
    assert!(encoded.starts_with(b"HUF\x01"));
    assert!(encoded.ends_with(b"___\n"));
}

#[test]
fn skewed_file_gets_smaller() {
    let dir = tempfile::tempdir().unwrap();
    let mut input = vec![b' '; 9000];
    input.extend(b"0123456789".repeat(100));
    assert_eq!(round_trip(&dir, &input), input);

    let encoded_len = fs::metadata(dir.path().join("encoded.bin")).unwrap().len();
    assert!((encoded_len as usize) < input.len());
}

#[test]
fn encoding_overwrites_an_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("encoded.bin"), vec![0xff; 10_000]).unwrap();
    assert_eq!(round_trip(&dir, b"fresh"), b"fresh");
}

#[test]
fn missing_input_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out");
    let err = decode(dir.path().join("nope.bin"), &output).unwrap_err();
    match err {
        Error::Io { path, .. } => assert_eq!(path, dir.path().join("nope.bin")),
        other => panic!("unexpected {:?}", other),
    }
    assert!(!output.exists());
}

fn corrupt_decode(dir: &Path, encoded: &[u8]) -> Error {
    let input = dir.join("corrupt.bin");
    let output = dir.join("corrupt.txt");
    fs::write(&input, encoded).unwrap();
    let err = decode(&input, &output).unwrap_err();
    // a failed decode leaves no partial output behind
    assert!(!output.exists());
    err
}

#[test]
fn corrupt_files_are_rejected_without_output() {
    let dir = tempfile::tempdir().unwrap();
    round_trip(&dir, b"abracadabra, abracadabra");
    let encoded = fs::read(dir.path().join("encoded.bin")).unwrap();

    let err = corrupt_decode(dir.path(), &encoded[..encoded.len() - 2]);
    assert!(err.corruption().is_some(), "{}", err);

    let err = corrupt_decode(dir.path(), &encoded[..8]);
    assert_eq!(err.corruption(), Some(&Corruption::Truncated));

    let err = corrupt_decode(dir.path(), b"plain text, not an encoded file");
    assert_eq!(err.corruption(), Some(&Corruption::BadMagic));
}

#[test]
fn truncation_never_panics() {
    let dir = tempfile::tempdir().unwrap();
    let input = b"It was the best of times, it was the worst of times".to_vec();
    round_trip(&dir, &input);
    let encoded = fs::read(dir.path().join("encoded.bin")).unwrap();

    for len in 0..encoded.len() {
        match huffpack::decode_bytes(&encoded[..len]) {
            Ok(decoded) => assert!(input.starts_with(&decoded)),
            Err(err) => assert!(err.corruption().is_some(), "{}", err),
        }
    }
}
