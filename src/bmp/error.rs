// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegobmp-core

//! Error types for BMP parsing and file I/O.

use std::fmt;

/// Errors that can occur while reading or writing a BMP carrier.
#[derive(Debug)]
pub enum BmpError {
    /// Input data is too short or truncated.
    UnexpectedEof,
    /// Missing "BM" signature at start of data.
    InvalidSignature,
    /// DIB header is not the 40-byte V3 variant.
    UnsupportedHeader(u32),
    /// Bits-per-pixel is not 24.
    UnsupportedBitDepth(u16),
    /// Compression field is non-zero.
    UnsupportedCompression(u32),
    /// Width or height is zero or negative.
    InvalidDimensions,
    /// Declared pixel data size is zero or smaller than the padded rows require.
    InvalidDataSize,
    /// Underlying file I/O failed.
    Io(std::io::Error),
}

impl fmt::Display for BmpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof => write!(f, "unexpected end of BMP data"),
            Self::InvalidSignature => write!(f, "missing BM signature (not a BMP)"),
            Self::UnsupportedHeader(size) => {
                write!(f, "unsupported DIB header size: {size} bytes (only 40-byte V3)")
            }
            Self::UnsupportedBitDepth(bpp) => {
                write!(f, "unsupported bit depth: {bpp} bits/pixel (only 24)")
            }
            Self::UnsupportedCompression(c) => {
                write!(f, "unsupported compression type: {c} (only uncompressed)")
            }
            Self::InvalidDimensions => write!(f, "invalid BMP dimensions"),
            Self::InvalidDataSize => write!(f, "invalid BMP pixel data size"),
            Self::Io(e) => write!(f, "BMP file I/O error: {e}"),
        }
    }
}

impl std::error::Error for BmpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BmpError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

pub type Result<T> = std::result::Result<T, BmpError>;
