// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegobmp-core

//! On-disk integration tests: payload files, carrier files and the full
//! hide-then-recover flow through the filesystem.

use stegobmp_core::{embed, extract, BmpImage, FilePackage, StegAlgorithm, StegoError};

#[test]
fn payload_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let secret_path = dir.path().join("note.txt");
    std::fs::write(&secret_path, b"meet me at midnight").unwrap();

    let package = FilePackage::from_path(&secret_path).unwrap();
    assert_eq!(package.extension, ".txt");
    assert_eq!(package.data, b"meet me at midnight");

    let out = package.write_to(dir.path().join("recovered")).unwrap();
    assert_eq!(out, dir.path().join("recovered.txt"));
    assert_eq!(std::fs::read(out).unwrap(), b"meet me at midnight");
}

#[test]
fn payload_without_extension_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("noext");
    std::fs::write(&path, b"data").unwrap();

    assert!(matches!(
        FilePackage::from_path(&path),
        Err(StegoError::InvalidExtension)
    ));
}

#[test]
fn empty_payload_file_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.bin");
    std::fs::write(&path, b"").unwrap();

    assert!(matches!(
        FilePackage::from_path(&path),
        Err(StegoError::InvalidArgument(_))
    ));
}

#[test]
fn carrier_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cover.bmp");

    let mut img = BmpImage::new(20, 10);
    for i in 0..img.total_components() {
        *img.component_mut(i).unwrap() = (i % 251) as u8;
    }
    img.save(&path).unwrap();

    let loaded = BmpImage::load(&path).unwrap();
    assert_eq!(loaded.width(), 20);
    assert_eq!(loaded.height(), 10);
    assert_eq!(loaded.to_bytes(), img.to_bytes());
}

#[test]
fn end_to_end_through_filesystem() {
    let dir = tempfile::tempdir().unwrap();

    // The secret file on disk.
    let secret_path = dir.path().join("payload.png");
    let secret_bytes: Vec<u8> = (0u16..300).map(|i| (i % 256) as u8).collect();
    std::fs::write(&secret_path, &secret_bytes).unwrap();

    // A carrier big enough for it.
    let cover_path = dir.path().join("cover.bmp");
    let mut cover = BmpImage::new(64, 64);
    for i in 0..cover.total_components() {
        *cover.component_mut(i).unwrap() = (i as u8).wrapping_mul(13);
    }
    cover.save(&cover_path).unwrap();

    // Hide.
    let package = FilePackage::from_path(&secret_path).unwrap();
    let mut carrier = BmpImage::load(&cover_path).unwrap();
    embed(&mut carrier, &package, StegAlgorithm::Lsbi).unwrap();
    let stego_path = dir.path().join("stego.bmp");
    carrier.save(&stego_path).unwrap();

    // Recover.
    let stego = BmpImage::load(&stego_path).unwrap();
    let recovered = extract(&stego, StegAlgorithm::Lsbi).unwrap();
    let out_path = recovered.write_to(dir.path().join("recovered")).unwrap();

    assert_eq!(out_path, dir.path().join("recovered.png"));
    assert_eq!(std::fs::read(out_path).unwrap(), secret_bytes);
}

#[test]
fn stego_bmp_stays_a_valid_bmp() {
    let mut img = BmpImage::new(32, 32);
    let package = FilePackage {
        data: vec![9u8; 50],
        extension: ".dat".to_string(),
    };
    embed(&mut img, &package, StegAlgorithm::Lsb4).unwrap();

    let reparsed = BmpImage::from_bytes(&img.to_bytes()).unwrap();
    assert_eq!(reparsed.width(), 32);
    assert_eq!(reparsed.height(), 32);
}
