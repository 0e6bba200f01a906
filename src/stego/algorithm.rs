// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegobmp-core

//! Steganography algorithm strategies.
//!
//! Each algorithm implements [`SteganographyAlgorithm`]: embed a bit
//! sequence, extract one back, and answer the capacity question. The cursor
//! is a component index threaded through successive calls so that the size,
//! data and extension fields occupy consecutive slots; LSBI additionally
//! hands the extraction passes an [`ExtractionContext::PatternMap`] read
//! once from the head of the carrier.

use crate::bmp::BmpImage;
use crate::stego::bits::{embed_bits, extract_bits};
use crate::stego::capacity;
use crate::stego::error::StegoError;
use crate::stego::StegAlgorithm;

/// Per-extraction state passed between the size, data and extension reads.
///
/// LSB1/LSB4 carry no state. For LSBI this is the 4-bit inversion pattern
/// map, consumed once from the start of the stream and threaded through --
/// never recomputed mid-extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionContext {
    None,
    PatternMap(u8),
}

/// A bit-level embedding strategy over a BMP carrier.
pub trait SteganographyAlgorithm {
    /// Embed the first `num_bits` bits of `data` starting at `*cursor`.
    fn embed(
        &self,
        image: &mut BmpImage,
        data: &[u8],
        num_bits: usize,
        cursor: &mut usize,
    ) -> Result<(), StegoError>;

    /// Read any per-stream context and position the cursor at the first
    /// payload slot. Called exactly once, before the first `extract`.
    fn begin_extract(
        &self,
        _image: &BmpImage,
        _cursor: &mut usize,
    ) -> Result<ExtractionContext, StegoError> {
        Ok(ExtractionContext::None)
    }

    /// Extract `num_bits` bits starting at `*cursor`, MSB-first into a
    /// zero-initialized buffer.
    fn extract(
        &self,
        image: &BmpImage,
        num_bits: usize,
        cursor: &mut usize,
        context: &ExtractionContext,
    ) -> Result<Vec<u8>, StegoError>;

    /// True iff `num_bits` payload bits fit this carrier.
    fn check_capacity(&self, image: &BmpImage, num_bits: usize) -> bool;
}

/// Fixed-rate LSB substitution, 1 bit per component.
pub struct Lsb1;

impl SteganographyAlgorithm for Lsb1 {
    fn embed(
        &self,
        image: &mut BmpImage,
        data: &[u8],
        num_bits: usize,
        cursor: &mut usize,
    ) -> Result<(), StegoError> {
        embed_bits(image, data, num_bits, 1, cursor)
    }

    fn extract(
        &self,
        image: &BmpImage,
        num_bits: usize,
        cursor: &mut usize,
        _context: &ExtractionContext,
    ) -> Result<Vec<u8>, StegoError> {
        extract_bits(image, num_bits, 1, cursor)
    }

    fn check_capacity(&self, image: &BmpImage, num_bits: usize) -> bool {
        capacity::check_capacity(image, StegAlgorithm::Lsb1, num_bits)
    }
}

/// Fixed-rate LSB substitution, 4 bits per component.
///
/// `num_bits` must be a multiple of 4; the bit packer rejects anything else.
pub struct Lsb4;

impl SteganographyAlgorithm for Lsb4 {
    fn embed(
        &self,
        image: &mut BmpImage,
        data: &[u8],
        num_bits: usize,
        cursor: &mut usize,
    ) -> Result<(), StegoError> {
        embed_bits(image, data, num_bits, 4, cursor)
    }

    fn extract(
        &self,
        image: &BmpImage,
        num_bits: usize,
        cursor: &mut usize,
        _context: &ExtractionContext,
    ) -> Result<Vec<u8>, StegoError> {
        extract_bits(image, num_bits, 4, cursor)
    }

    fn check_capacity(&self, image: &BmpImage, num_bits: usize) -> bool {
        capacity::check_capacity(image, StegAlgorithm::Lsb4, num_bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lsb1_embed_extract_roundtrip() {
        let mut img = BmpImage::new(4, 2);
        let data = [0xC3, 0x5A];
        let mut cursor = 0;
        Lsb1.embed(&mut img, &data, 16, &mut cursor).unwrap();

        let mut cursor = 0;
        let out = Lsb1
            .extract(&img, 16, &mut cursor, &ExtractionContext::None)
            .unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn lsb4_embed_extract_roundtrip() {
        let mut img = BmpImage::new(4, 2);
        let data = [0xC3, 0x5A];
        let mut cursor = 0;
        Lsb4.embed(&mut img, &data, 16, &mut cursor).unwrap();
        assert_eq!(cursor, 4);

        let mut cursor = 0;
        let out = Lsb4
            .extract(&img, 16, &mut cursor, &ExtractionContext::None)
            .unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn lsb4_rejects_unaligned_count() {
        let mut img = BmpImage::new(4, 2);
        let mut cursor = 0;
        assert!(matches!(
            Lsb4.embed(&mut img, &[0xFF], 7, &mut cursor),
            Err(StegoError::InvalidArgument(_))
        ));
    }

    #[test]
    fn default_context_is_none() {
        let img = BmpImage::new(2, 2);
        let mut cursor = 0;
        let ctx = Lsb1.begin_extract(&img, &mut cursor).unwrap();
        assert_eq!(ctx, ExtractionContext::None);
        assert_eq!(cursor, 0);
    }
}
