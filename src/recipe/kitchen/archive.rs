// src/recipe/kitchen/archive.rs

//! Source download and extraction utilities for the Kitchen

use crate::error::{Error, Result};
use flate2::read::GzDecoder;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::blocking::Client;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;
use std::process::Command;
use std::time::Duration;
use tar::Archive;
use tracing::{debug, info, warn};
use xz2::read::XzDecoder;

/// Maximum retry attempts for failed downloads
const MAX_RETRIES: u32 = 3;

/// Retry delay in milliseconds
const RETRY_DELAY_MS: u64 = 1000;

/// Buffer size for streaming downloads (8 KB)
const STREAM_BUFFER_SIZE: usize = 8192;

fn create_progress_bar(size: u64, name: &str) -> ProgressBar {
    let pb = if size > 0 {
        ProgressBar::new(size)
    } else {
        ProgressBar::new_spinner()
    };
    if let Ok(style) = ProgressStyle::default_bar().template(
        "{spinner:.green} [{elapsed_precise}] [{bar:30.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}) {msg}",
    ) {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message(name.to_string());
    pb
}

/// Download a file from a URL, retrying transient failures
pub fn download_file(url: &str, dest: &Path, timeout: Duration) -> Result<()> {
    let client = Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| Error::InitError(format!("Failed to create HTTP client: {e}")))?;

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    let display_name = dest
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| url.to_string());

    let mut attempt = 0;
    loop {
        attempt += 1;
        match fetch_to_file(&client, url, dest, &display_name) {
            Ok(bytes) => {
                debug!("Downloaded {} bytes from {}", bytes, url);
                return Ok(());
            }
            Err(e) => {
                let _ = fs::remove_file(dest);
                if attempt >= MAX_RETRIES {
                    return Err(Error::DownloadError(format!(
                        "Failed to download {} after {} attempts: {}",
                        url, attempt, e
                    )));
                }
                warn!("Download attempt {} failed: {}, retrying...", attempt, e);
                std::thread::sleep(Duration::from_millis(RETRY_DELAY_MS * attempt as u64));
            }
        }
    }
}

fn fetch_to_file(client: &Client, url: &str, dest: &Path, display_name: &str) -> Result<u64> {
    let mut response = client
        .get(url)
        .send()
        .map_err(|e| Error::DownloadError(format!("Failed to fetch {}: {}", url, e)))?;

    if !response.status().is_success() {
        return Err(Error::DownloadError(format!(
            "HTTP {} from {}",
            response.status(),
            url
        )));
    }

    let total_size = response.content_length().unwrap_or(0);
    let pb = create_progress_bar(total_size, display_name);
    let mut file = File::create(dest)?;
    let mut buffer = [0u8; STREAM_BUFFER_SIZE];
    let mut downloaded: u64 = 0;

    loop {
        let n = response
            .read(&mut buffer)
            .map_err(|e| Error::DownloadError(format!("Failed to read response: {e}")))?;
        if n == 0 {
            break;
        }
        file.write_all(&buffer[..n])?;
        downloaded += n as u64;
        pb.set_position(downloaded);
    }

    pb.finish_and_clear();
    Ok(downloaded)
}

/// Extract an archive into a destination directory
///
/// Supports: .tar.gz, .tgz, .tar.xz, .txz, .tar natively; .zip through the
/// system `tar` (bsdtar on Windows and macOS).
pub fn extract_archive(archive: &Path, dest: &Path) -> Result<()> {
    let filename = archive
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");

    fs::create_dir_all(dest)?;
    info!("Extracting {} into {}", filename, dest.display());

    if filename.ends_with(".tar.gz") || filename.ends_with(".tgz") {
        unpack_tar(GzDecoder::new(File::open(archive)?), dest)
    } else if filename.ends_with(".tar.xz") || filename.ends_with(".txz") {
        unpack_tar(XzDecoder::new(File::open(archive)?), dest)
    } else if filename.ends_with(".tar") {
        unpack_tar(File::open(archive)?, dest)
    } else if filename.ends_with(".zip") {
        extract_with_system_tar(archive, dest)
    } else {
        Err(Error::ParseError(format!(
            "Unknown archive format: {}",
            filename
        )))
    }
}

fn unpack_tar<R: Read>(reader: R, dest: &Path) -> Result<()> {
    let mut archive = Archive::new(reader);
    archive.set_preserve_permissions(true);
    archive
        .unpack(dest)
        .map_err(|e| Error::IoError(format!("Failed to extract archive: {}", e)))
}

fn extract_with_system_tar(archive: &Path, dest: &Path) -> Result<()> {
    let output = Command::new("tar")
        .arg("-xf")
        .arg(archive)
        .arg("-C")
        .arg(dest)
        .output()
        .map_err(|e| Error::IoError(format!("tar failed: {}", e)))?;

    if !output.status.success() {
        return Err(Error::IoError(format!(
            "Failed to extract archive: {}",
            String::from_utf8_lossy(&output.stderr)
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use tempfile::TempDir;

    #[test]
    fn test_extract_archive_unknown_format() {
        let result = extract_archive(Path::new("file.unknown"), Path::new("/tmp"));
        assert!(result.is_err());
    }

    #[test]
    fn test_extract_tar_gz() {
        let dir = TempDir::new().unwrap();
        let archive_path = dir.path().join("boost_1_65_1.tar.gz");

        {
            let file = File::create(&archive_path).unwrap();
            let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));
            let content = b"#!/bin/sh\nexit 0\n";
            let mut header = tar::Header::new_gnu();
            header.set_size(content.len() as u64);
            header.set_mode(0o755);
            header.set_cksum();
            builder
                .append_data(&mut header, "boost_1_65_1/bootstrap.sh", &content[..])
                .unwrap();
            builder.into_inner().unwrap().finish().unwrap();
        }

        let dest = dir.path().join("out");
        extract_archive(&archive_path, &dest).unwrap();
        let extracted = fs::read(dest.join("boost_1_65_1").join("bootstrap.sh")).unwrap();
        assert_eq!(extracted, b"#!/bin/sh\nexit 0\n");
    }

    #[test]
    fn test_download_invalid_url() {
        let dir = TempDir::new().unwrap();
        let result = download_file(
            "not-a-url",
            &dir.path().join("out.tar.gz"),
            Duration::from_secs(1),
        );
        assert!(matches!(result, Err(Error::DownloadError(_))));
    }
}
