//! Shared fixtures for the integration tests

#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::CompressionMethod;
use zip::unstable::write::FileOptionsExt;
use zip::write::{FileOptions, ZipWriter};

pub const CONTENT: &str = "The quick brown fox jumps over the lazy dog.\n";

/// Archive with a single ZipCrypto-protected entry
pub fn encrypted_archive(dir: &Path, password: &str) -> PathBuf {
    let path = dir.join(format!("locked-{}.zip", password.len()));
    let mut writer = ZipWriter::new(File::create(&path).unwrap());
    let options: FileOptions<'_, ()> = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .with_deprecated_encryption(password.as_bytes());
    writer.start_file("secret.txt", options).unwrap();
    writer.write_all(CONTENT.repeat(64).as_bytes()).unwrap();
    writer.finish().unwrap();
    path
}

/// Archive whose only entry is stored without encryption
pub fn plain_archive(dir: &Path) -> PathBuf {
    let path = dir.join("plain.zip");
    let mut writer = ZipWriter::new(File::create(&path).unwrap());
    let options: FileOptions<'_, ()> = FileOptions::default();
    writer.start_file("readme.txt", options).unwrap();
    writer.write_all(CONTENT.as_bytes()).unwrap();
    writer.finish().unwrap();
    path
}
