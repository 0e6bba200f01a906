// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegobmp-core

//! Error types for the steganography pipeline.
//!
//! [`StegoError`] covers all failure modes from BMP parsing through bit
//! packing, frame extraction and decryption. The variants map onto the four
//! failure classes the embedding contract distinguishes: capacity, framing,
//! bounds and argument errors.

use core::fmt;

use crate::bmp::error::BmpError;

/// Errors that can occur during steganographic embedding or extraction.
#[derive(Debug)]
pub enum StegoError {
    /// The carrier could not be parsed as a supported BMP.
    InvalidBmp(BmpError),
    /// The payload does not fit in the carrier under the chosen algorithm.
    /// Detected before any pixel is modified.
    PayloadTooLarge,
    /// The extracted frame is malformed (zero size, size beyond capacity,
    /// or a missing extension terminator). Usually the wrong algorithm or
    /// password was used.
    FrameCorrupted,
    /// The extension does not start with `.` or exceeds the length bound.
    InvalidExtension,
    /// A computed component address fell outside the carrier's data region.
    /// Always a defect or malicious input, never silently clamped.
    OutOfBounds,
    /// A caller-supplied argument violated the contract.
    InvalidArgument(&'static str),
    /// Block cipher decryption failed (wrong password or corrupted data).
    DecryptionFailed,
    /// Payload file I/O failed.
    Io(std::io::Error),
}

impl fmt::Display for StegoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBmp(e) => write!(f, "invalid BMP carrier: {e}"),
            Self::PayloadTooLarge => write!(f, "payload too large for this carrier"),
            Self::FrameCorrupted => write!(f, "extracted frame is malformed"),
            Self::InvalidExtension => write!(f, "invalid payload file extension"),
            Self::OutOfBounds => write!(f, "component address out of bounds"),
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Self::DecryptionFailed => write!(f, "decryption failed (wrong password?)"),
            Self::Io(e) => write!(f, "payload file I/O error: {e}"),
        }
    }
}

impl std::error::Error for StegoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidBmp(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<BmpError> for StegoError {
    fn from(e: BmpError) -> Self {
        Self::InvalidBmp(e)
    }
}

impl From<std::io::Error> for StegoError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
