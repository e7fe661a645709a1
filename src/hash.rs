// src/hash.rs

//! SHA-256 helpers for source verification and package ids
//!
//! Checksums are written as `algorithm:hex`, e.g. `sha256:abc123...`.
//! Only SHA-256 is accepted.

use crate::error::{Error, Result};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Prefix used for checksum strings
pub const SHA256_PREFIX: &str = "sha256:";

/// Hash a byte slice, returning lowercase hex
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Hash anything readable in fixed-size chunks
pub fn sha256_reader<R: Read>(mut reader: R) -> io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 64 * 1024];
    loop {
        let n = reader.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Hash a file on disk
pub fn sha256_file(path: &Path) -> Result<String> {
    let file = File::open(path)
        .map_err(|e| Error::IoError(format!("Failed to open {}: {}", path.display(), e)))?;
    Ok(sha256_reader(file)?)
}

/// Split a checksum string into its hex digest
///
/// Fails for anything other than `sha256:<hex>`.
pub fn parse_checksum(checksum: &str) -> Result<&str> {
    let (algorithm, digest) = checksum
        .split_once(':')
        .ok_or_else(|| Error::ParseError(format!("Invalid checksum format: {}", checksum)))?;

    if algorithm != "sha256" {
        return Err(Error::ParseError(format!(
            "Unsupported checksum algorithm: {} (supported: sha256)",
            algorithm
        )));
    }
    if digest.is_empty() || !digest.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::ParseError(format!("Invalid sha256 digest: {}", digest)));
    }

    Ok(digest)
}

/// Verify a file against an expected `sha256:` checksum
pub fn verify_file(path: &Path, expected: &str) -> Result<()> {
    let digest = parse_checksum(expected)?;
    let actual = sha256_file(path)?;
    if !actual.eq_ignore_ascii_case(digest) {
        return Err(Error::ChecksumMismatch {
            expected: expected.to_string(),
            actual: format!("{}{}", SHA256_PREFIX, actual),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_sha256_known_value() {
        assert_eq!(
            sha256_hex(b"hello"),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn test_reader_matches_bytes() {
        let data = vec![7u8; 200_000];
        assert_eq!(sha256_reader(&data[..]).unwrap(), sha256_hex(&data));
    }

    #[test]
    fn test_parse_checksum() {
        assert_eq!(parse_checksum("sha256:abc123").unwrap(), "abc123");
        assert!(parse_checksum("abc123").is_err());
        assert!(parse_checksum("md5:abc123").is_err());
        assert!(parse_checksum("sha256:").is_err());
        assert!(parse_checksum("sha256:xyz").is_err());
    }

    #[test]
    fn test_verify_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"hello").unwrap();

        let good = format!("sha256:{}", sha256_hex(b"hello"));
        assert!(verify_file(file.path(), &good).is_ok());

        let bad = format!("sha256:{}", sha256_hex(b"world"));
        match verify_file(file.path(), &bad) {
            Err(Error::ChecksumMismatch { expected, .. }) => assert_eq!(expected, bad),
            other => panic!("expected checksum mismatch, got {:?}", other),
        }
    }
}
