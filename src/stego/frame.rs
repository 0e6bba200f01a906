// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegobmp-core

//! Payload frame construction and parsing.
//!
//! The frame is the self-describing container that makes extraction possible
//! without external metadata. All three algorithms embed the same format:
//!
//! ```text
//! [4 bytes] payload size in bytes (big-endian u32)
//! [N bytes] payload data
//! [M bytes] file extension, starting with '.', including the NUL terminator
//! ```
//!
//! The size field is big-endian on the wire regardless of host byte order;
//! [`size_to_wire`]/[`size_from_wire`] are the only places that convert.
//! When encryption is layered on top, this entire frame becomes the block
//! cipher plaintext and the embedded stream is `[ciphertext_len:4][ciphertext]`
//! instead.

use crate::stego::error::StegoError;
use crate::stego::payload::FilePackage;

/// Maximum extension length in bytes, including the NUL terminator.
pub const EXTENSION_MAX: usize = 16;

/// Size field width in bytes.
pub const SIZE_FIELD_LEN: usize = 4;

/// Convert a payload size to its wire representation (big-endian).
pub fn size_to_wire(size: u32) -> [u8; SIZE_FIELD_LEN] {
    size.to_be_bytes()
}

/// Read a payload size from its wire representation (big-endian).
pub fn size_from_wire(bytes: [u8; SIZE_FIELD_LEN]) -> u32 {
    u32::from_be_bytes(bytes)
}

/// Validate an extension string against the frame format rules:
/// starts with `.`, more than just the dot, and fits the bound with its
/// NUL terminator.
pub fn validate_extension(extension: &str) -> Result<(), StegoError> {
    let bytes = extension.as_bytes();
    if bytes.first() != Some(&b'.') || bytes.len() < 2 {
        return Err(StegoError::InvalidExtension);
    }
    if bytes.len() + 1 > EXTENSION_MAX {
        return Err(StegoError::InvalidExtension);
    }
    if bytes.contains(&0) {
        return Err(StegoError::InvalidExtension);
    }
    Ok(())
}

/// Serialize a payload into a frame buffer ready for embedding (or for
/// encryption, on the encrypted path).
///
/// # Errors
/// - [`StegoError::InvalidArgument`] if the payload is empty or its length
///   exceeds the 32-bit size field.
/// - [`StegoError::InvalidExtension`] if the extension violates the format.
pub fn build_frame(package: &FilePackage) -> Result<Vec<u8>, StegoError> {
    if package.data.is_empty() {
        return Err(StegoError::InvalidArgument("payload data is empty"));
    }
    if package.data.len() > u32::MAX as usize {
        return Err(StegoError::InvalidArgument("payload exceeds 32-bit size field"));
    }
    validate_extension(&package.extension)?;

    let ext = package.extension.as_bytes();
    let mut frame = Vec::with_capacity(SIZE_FIELD_LEN + package.data.len() + ext.len() + 1);
    frame.extend_from_slice(&size_to_wire(package.data.len() as u32));
    frame.extend_from_slice(&package.data);
    frame.extend_from_slice(ext);
    frame.push(0);
    Ok(frame)
}

/// Parse a frame buffer back into a payload, verifying the format.
///
/// The input may be longer than the actual frame (block cipher padding on
/// the encrypted path); trailing bytes after the extension terminator are
/// ignored.
///
/// # Errors
/// [`StegoError::FrameCorrupted`] for a zero size or truncated buffer,
/// [`StegoError::InvalidExtension`] for a malformed extension.
pub fn parse_frame(buf: &[u8]) -> Result<FilePackage, StegoError> {
    if buf.len() < SIZE_FIELD_LEN {
        return Err(StegoError::FrameCorrupted);
    }
    let size = size_from_wire([buf[0], buf[1], buf[2], buf[3]]) as usize;
    if size == 0 {
        return Err(StegoError::FrameCorrupted);
    }
    let data_end = SIZE_FIELD_LEN + size;
    if buf.len() < data_end + 2 {
        // At minimum '.' plus one character plus NUL must follow the data.
        return Err(StegoError::FrameCorrupted);
    }

    let data = buf[SIZE_FIELD_LEN..data_end].to_vec();

    let ext_bytes = &buf[data_end..];
    let ext_len = ext_bytes
        .iter()
        .take(EXTENSION_MAX)
        .position(|&b| b == 0)
        .ok_or(StegoError::FrameCorrupted)?;
    let extension = std::str::from_utf8(&ext_bytes[..ext_len])
        .map_err(|_| StegoError::InvalidExtension)?
        .to_string();
    validate_extension(&extension)?;

    Ok(FilePackage { data, extension })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn package(data: &[u8], extension: &str) -> FilePackage {
        FilePackage {
            data: data.to_vec(),
            extension: extension.to_string(),
        }
    }

    #[test]
    fn build_parse_roundtrip() {
        let original = package(&[0xDE, 0xAD, 0xBE, 0xEF], ".png");
        let frame = build_frame(&original).unwrap();
        let parsed = parse_frame(&frame).unwrap();
        assert_eq!(parsed.data, original.data);
        assert_eq!(parsed.extension, ".png");
    }

    #[test]
    fn size_field_is_big_endian() {
        let frame = build_frame(&package(&[0u8; 258], ".txt")).unwrap();
        assert_eq!(&frame[..4], &[0x00, 0x00, 0x01, 0x02]);
    }

    #[test]
    fn wire_order_idempotent() {
        for x in [0u32, 1, 0x0102_0304, 0xFFFF_FFFF, 0x8000_0000] {
            assert_eq!(size_from_wire(size_to_wire(x)), x);
        }
    }

    #[test]
    fn zero_size_rejected() {
        let mut frame = build_frame(&package(&[1, 2, 3], ".txt")).unwrap();
        frame[..4].copy_from_slice(&[0, 0, 0, 0]);
        assert!(matches!(parse_frame(&frame), Err(StegoError::FrameCorrupted)));
    }

    #[test]
    fn truncated_frame_rejected() {
        let frame = build_frame(&package(&[1, 2, 3], ".txt")).unwrap();
        assert!(matches!(
            parse_frame(&frame[..frame.len() - 3]),
            Err(StegoError::FrameCorrupted)
        ));
        assert!(matches!(parse_frame(&[0x00, 0x01]), Err(StegoError::FrameCorrupted)));
    }

    #[test]
    fn missing_terminator_rejected() {
        let original = package(&[9u8; 5], ".tar");
        let mut frame = build_frame(&original).unwrap();
        let len = frame.len();
        frame[len - 1] = b'x'; // overwrite NUL
        assert!(matches!(parse_frame(&frame), Err(StegoError::FrameCorrupted)));
    }

    #[test]
    fn extension_must_start_with_dot() {
        assert!(matches!(
            build_frame(&package(&[1], "txt")),
            Err(StegoError::InvalidExtension)
        ));

        let mut frame = build_frame(&package(&[1], ".txt")).unwrap();
        frame[5] = b'x'; // '.' -> 'x' in the embedded extension
        assert!(matches!(parse_frame(&frame), Err(StegoError::InvalidExtension)));
    }

    #[test]
    fn extension_length_bound() {
        // 15 bytes including the dot + NUL = 16: at the bound, accepted.
        let ok = format!(".{}", "a".repeat(14));
        assert!(build_frame(&package(&[1], &ok)).is_ok());

        let too_long = format!(".{}", "a".repeat(15));
        assert!(matches!(
            build_frame(&package(&[1], &too_long)),
            Err(StegoError::InvalidExtension)
        ));
    }

    #[test]
    fn empty_payload_rejected() {
        assert!(matches!(
            build_frame(&package(&[], ".txt")),
            Err(StegoError::InvalidArgument(_))
        ));
    }

    #[test]
    fn trailing_padding_ignored() {
        let original = package(&[7u8; 9], ".gz");
        let mut frame = build_frame(&original).unwrap();
        frame.extend_from_slice(&[0xAA; 7]); // cipher padding residue
        let parsed = parse_frame(&frame).unwrap();
        assert_eq!(parsed.data, original.data);
        assert_eq!(parsed.extension, ".gz");
    }
}
