// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegobmp-core

//! Steganographic embedding and extraction pipelines.
//!
//! This module wires the pieces together: a payload file is framed
//! (`[size:4][data][extension + NUL]`), optionally encrypted, then written
//! bit-by-bit into the carrier's color components by one of three
//! interchangeable algorithms:
//!
//! - **LSB1**: 1 bit per component.
//! - **LSB4**: 4 bits per component (4x the capacity, more visible).
//! - **LSBI**: 1 bit per green/blue component with adaptive per-pattern
//!   inversion to reduce statistical bias.
//!
//! Extraction mirrors the embed order exactly -- size, then data, then
//! extension -- threading one cursor and (for LSBI) the pattern-map context
//! through the reads. Every embed is preceded by a capacity check; a
//! payload that does not fit is reported before any pixel changes.

pub mod algorithm;
pub mod bits;
pub mod capacity;
pub mod crypto;
pub mod error;
pub mod frame;
pub mod lsbi;
pub mod payload;

use std::fmt;
use std::str::FromStr;

use crate::bmp::BmpImage;
use algorithm::{Lsb1, Lsb4, SteganographyAlgorithm};
use lsbi::Lsbi;

pub use crypto::{CipherAlgorithm, CipherMode};
pub use error::StegoError;
pub use payload::FilePackage;

/// Steganography algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StegAlgorithm {
    Lsb1,
    Lsb4,
    Lsbi,
}

impl FromStr for StegAlgorithm {
    type Err = StegoError;

    fn from_str(s: &str) -> Result<Self, StegoError> {
        match s.to_ascii_uppercase().as_str() {
            "LSB1" => Ok(Self::Lsb1),
            "LSB4" => Ok(Self::Lsb4),
            "LSBI" => Ok(Self::Lsbi),
            _ => Err(StegoError::InvalidArgument("unknown steganography algorithm")),
        }
    }
}

impl fmt::Display for StegAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lsb1 => write!(f, "LSB1"),
            Self::Lsb4 => write!(f, "LSB4"),
            Self::Lsbi => write!(f, "LSBI"),
        }
    }
}

fn strategy(algorithm: StegAlgorithm) -> &'static dyn SteganographyAlgorithm {
    match algorithm {
        StegAlgorithm::Lsb1 => &Lsb1,
        StegAlgorithm::Lsb4 => &Lsb4,
        StegAlgorithm::Lsbi => &Lsbi,
    }
}

/// Hide a payload in the carrier.
///
/// The carrier is mutated in place. On error the pixel contents are
/// undefined (a capacity failure happens before any mutation; later
/// failures may leave a partial write) -- discard the image instead of
/// saving it.
///
/// # Errors
/// - [`StegoError::PayloadTooLarge`] if the frame exceeds the algorithm's
///   capacity for this carrier.
/// - [`StegoError::InvalidExtension`] / [`StegoError::InvalidArgument`] for
///   a malformed payload.
pub fn embed(
    image: &mut BmpImage,
    package: &FilePackage,
    algorithm: StegAlgorithm,
) -> Result<(), StegoError> {
    let frame = frame::build_frame(package)?;
    embed_frame(image, &frame, algorithm)
}

/// Hide an encrypted payload in the carrier.
///
/// The plaintext frame (`[size][data][extension]`) is encrypted as a whole
/// and the embedded stream becomes `[ciphertext_len:4][ciphertext]`; the
/// extension travels inside the ciphertext.
pub fn embed_encrypted(
    image: &mut BmpImage,
    package: &FilePackage,
    algorithm: StegAlgorithm,
    cipher: CipherAlgorithm,
    mode: CipherMode,
    password: &str,
) -> Result<(), StegoError> {
    let plain = frame::build_frame(package)?;
    let ciphertext = crypto::encrypt(&plain, cipher, mode, password)?;
    if ciphertext.len() > u32::MAX as usize {
        return Err(StegoError::InvalidArgument("ciphertext exceeds 32-bit size field"));
    }

    let mut stream = Vec::with_capacity(frame::SIZE_FIELD_LEN + ciphertext.len());
    stream.extend_from_slice(&frame::size_to_wire(ciphertext.len() as u32));
    stream.extend_from_slice(&ciphertext);
    embed_frame(image, &stream, algorithm)
}

fn embed_frame(
    image: &mut BmpImage,
    frame_bytes: &[u8],
    algorithm: StegAlgorithm,
) -> Result<(), StegoError> {
    let num_bits = frame_bytes.len() * 8;
    let strategy = strategy(algorithm);
    if !strategy.check_capacity(image, num_bits) {
        log::warn!(
            "payload needs {num_bits} bits but {algorithm} capacity is {} bits",
            capacity::max_bits(image, algorithm)
        );
        return Err(StegoError::PayloadTooLarge);
    }

    let mut cursor = 0;
    strategy.embed(image, frame_bytes, num_bits, &mut cursor)?;
    log::info!("embedded {num_bits} bits using {algorithm}");
    Ok(())
}

/// Recover a payload hidden with [`embed`].
///
/// # Errors
/// [`StegoError::FrameCorrupted`] / [`StegoError::InvalidExtension`] when
/// the carrier does not hold a valid frame under `algorithm` -- typically
/// the wrong algorithm was chosen or the image carries nothing.
pub fn extract(image: &BmpImage, algorithm: StegAlgorithm) -> Result<FilePackage, StegoError> {
    let strategy = strategy(algorithm);
    let mut cursor = 0;
    let context = strategy.begin_extract(image, &mut cursor)?;

    let size = extract_size(image, strategy, algorithm, &mut cursor, &context)?;
    let data = strategy.extract(image, size * 8, &mut cursor, &context)?;
    let extension = extract_extension(image, strategy, &mut cursor, &context)?;

    log::info!("extracted {size} bytes with extension {extension} using {algorithm}");
    Ok(FilePackage { data, extension })
}

/// Recover and decrypt a payload hidden with [`embed_encrypted`].
///
/// The cipher, mode and password must match the embed side exactly.
pub fn extract_encrypted(
    image: &BmpImage,
    algorithm: StegAlgorithm,
    cipher: CipherAlgorithm,
    mode: CipherMode,
    password: &str,
) -> Result<FilePackage, StegoError> {
    let strategy = strategy(algorithm);
    let mut cursor = 0;
    let context = strategy.begin_extract(image, &mut cursor)?;

    let ciphertext_len = extract_size(image, strategy, algorithm, &mut cursor, &context)?;
    let ciphertext = strategy.extract(image, ciphertext_len * 8, &mut cursor, &context)?;

    let plain = crypto::decrypt(&ciphertext, cipher, mode, password)?;
    frame::parse_frame(&plain)
}

/// Read and validate the leading 32-bit size field.
fn extract_size(
    image: &BmpImage,
    strategy: &dyn SteganographyAlgorithm,
    algorithm: StegAlgorithm,
    cursor: &mut usize,
    context: &algorithm::ExtractionContext,
) -> Result<usize, StegoError> {
    let raw = strategy.extract(image, 32, cursor, context)?;
    let size = frame::size_from_wire([raw[0], raw[1], raw[2], raw[3]]) as usize;
    if size == 0 {
        return Err(StegoError::FrameCorrupted);
    }
    // A size the carrier could never hold means garbage, not a payload.
    if size.saturating_mul(8) > capacity::max_bits(image, algorithm) {
        return Err(StegoError::FrameCorrupted);
    }
    Ok(size)
}

/// Read the NUL-terminated extension, one byte at a time.
fn extract_extension(
    image: &BmpImage,
    strategy: &dyn SteganographyAlgorithm,
    cursor: &mut usize,
    context: &algorithm::ExtractionContext,
) -> Result<String, StegoError> {
    let mut bytes = Vec::new();
    loop {
        let byte = strategy.extract(image, 8, cursor, context)?[0];
        if byte == 0 {
            break;
        }
        bytes.push(byte);
        if bytes.len() >= frame::EXTENSION_MAX {
            return Err(StegoError::FrameCorrupted);
        }
    }
    let extension = std::str::from_utf8(&bytes)
        .map_err(|_| StegoError::InvalidExtension)?
        .to_string();
    frame::validate_extension(&extension)?;
    Ok(extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_accepts_stable_vocabulary() {
        assert_eq!("LSB1".parse::<StegAlgorithm>().unwrap(), StegAlgorithm::Lsb1);
        assert_eq!("lsb4".parse::<StegAlgorithm>().unwrap(), StegAlgorithm::Lsb4);
        assert_eq!("LsbI".parse::<StegAlgorithm>().unwrap(), StegAlgorithm::Lsbi);
        assert!("LSB2".parse::<StegAlgorithm>().is_err());
    }

    #[test]
    fn extract_from_blank_carrier_fails_cleanly() {
        // An all-zero carrier decodes a zero size field -- a framing error,
        // not garbage output.
        let img = BmpImage::new(8, 8);
        for algorithm in [StegAlgorithm::Lsb1, StegAlgorithm::Lsb4, StegAlgorithm::Lsbi] {
            assert!(matches!(
                extract(&img, algorithm),
                Err(StegoError::FrameCorrupted)
            ));
        }
    }

    #[test]
    fn absurd_size_field_rejected() {
        // Embed only a huge size field; extraction must reject it against
        // the carrier capacity instead of allocating gigabytes.
        let mut img = BmpImage::new(8, 8);
        let mut cursor = 0;
        bits::embed_bits(&mut img, &u32::MAX.to_be_bytes(), 32, 1, &mut cursor).unwrap();
        assert!(matches!(
            extract(&img, StegAlgorithm::Lsb1),
            Err(StegoError::FrameCorrupted)
        ));
    }
}
