// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegobmp-core

//! LSBI: LSB substitution with adaptive pattern inversion.
//!
//! LSBI reduces the statistical bias plain LSB substitution leaves behind.
//! Components are classified by the 2-bit pattern directly above their LSB
//! (`(component >> 1) & 0b11`). Embedding first writes every data bit
//! literally while tallying, per pattern, how many components actually
//! changed; any pattern where changes outnumber non-changes gets its bit
//! inverted in a second pass. The four inversion decisions form the pattern
//! map, stored in the first four bit-slots (plain LSB1) so extraction can
//! undo the inversions.
//!
//! Only green and blue components carry data -- red components are skipped
//! entirely on both the embed and extract side, halving usable bandwidth.
//! The reserved map slots are the first four components regardless of
//! channel.
//!
//! Ties (`changed == unchanged`) leave the map bit clear. This tie-break and
//! the capacity formula are format conventions shared with existing embedded
//! images; do not alter them.

use crate::bmp::address::Channel;
use crate::bmp::BmpImage;
use crate::stego::algorithm::{ExtractionContext, SteganographyAlgorithm};
use crate::stego::bits::{embed_bits, extract_bits, source_bit};
use crate::stego::capacity::{self, LSBI_MAP_BITS};
use crate::stego::error::StegoError;
use crate::stego::StegAlgorithm;

/// Adaptive LSB with per-pattern inversion.
pub struct Lsbi;

/// Advance `index` to the next green or blue component.
fn next_eligible(image: &BmpImage, mut index: usize) -> Result<usize, StegoError> {
    loop {
        match image.channel_of(index) {
            None => return Err(StegoError::PayloadTooLarge),
            Some(Channel::Red) => index += 1,
            Some(_) => return Ok(index),
        }
    }
}

impl SteganographyAlgorithm for Lsbi {
    /// Embed the whole bit stream in one call.
    ///
    /// The pattern tallies span every data bit, so LSBI cannot embed
    /// incrementally: the caller passes the complete frame at once, with the
    /// cursor at the head of the stream.
    fn embed(
        &self,
        image: &mut BmpImage,
        data: &[u8],
        num_bits: usize,
        cursor: &mut usize,
    ) -> Result<(), StegoError> {
        if num_bits > data.len().saturating_mul(8) {
            return Err(StegoError::InvalidArgument("bit count exceeds source buffer"));
        }
        let base = *cursor;

        // Pass 1: write each bit literally into the next eligible component,
        // tallying changed/unchanged per 2-bit pattern.
        let mut changed = [0usize; 4];
        let mut unchanged = [0usize; 4];
        let mut index = base + LSBI_MAP_BITS;
        for bit_index in 0..num_bits {
            let bit = source_bit(data, bit_index);
            index = next_eligible(image, index)?;
            let component = image.component_mut(index).ok_or(StegoError::OutOfBounds)?;
            let pattern = ((*component >> 1) & 0b11) as usize;
            if *component & 1 != bit {
                changed[pattern] += 1;
            } else {
                unchanged[pattern] += 1;
            }
            *component = (*component & 0xFE) | bit;
            index += 1;
        }
        let end = index;

        // Build the map: invert pattern p iff it changed more often than not.
        let mut map = 0u8;
        for p in 0..4 {
            if changed[p] > unchanged[p] {
                map |= 1 << p;
            }
        }

        // Store the map in the reserved slots, pattern 0 bit first.
        let mut map_byte = 0u8;
        for p in 0..4 {
            map_byte |= ((map >> p) & 1) << (7 - p);
        }
        let mut map_cursor = base;
        embed_bits(image, &[map_byte], LSBI_MAP_BITS, 1, &mut map_cursor)?;

        // Pass 2: re-walk the same components; wherever the map marks the
        // component's pattern, the final LSB is the inverted data bit. The
        // pattern bits themselves were never touched, so both passes (and
        // extraction) classify identically.
        let mut index = base + LSBI_MAP_BITS;
        for bit_index in 0..num_bits {
            let bit = source_bit(data, bit_index);
            index = next_eligible(image, index)?;
            let component = image.component_mut(index).ok_or(StegoError::OutOfBounds)?;
            let pattern = ((*component >> 1) & 0b11) as usize;
            if map & (1 << pattern) != 0 {
                *component = (*component & 0xFE) | (bit ^ 1);
            }
            index += 1;
        }

        *cursor = end;
        Ok(())
    }

    /// Read the pattern map from the reserved slots and position the cursor
    /// at the first data slot.
    fn begin_extract(
        &self,
        image: &BmpImage,
        cursor: &mut usize,
    ) -> Result<ExtractionContext, StegoError> {
        let raw = extract_bits(image, LSBI_MAP_BITS, 1, cursor)?;
        let mut map = 0u8;
        for p in 0..4 {
            map |= ((raw[0] >> (7 - p)) & 1) << p;
        }
        log::debug!("LSBI pattern map: {map:04b}");
        Ok(ExtractionContext::PatternMap(map))
    }

    fn extract(
        &self,
        image: &BmpImage,
        num_bits: usize,
        cursor: &mut usize,
        context: &ExtractionContext,
    ) -> Result<Vec<u8>, StegoError> {
        let map = match context {
            ExtractionContext::PatternMap(map) => *map,
            ExtractionContext::None => {
                return Err(StegoError::InvalidArgument("LSBI extraction requires a pattern map"))
            }
        };

        let mut out = vec![0u8; (num_bits + 7) / 8];
        let mut index = *cursor;
        for bit_index in 0..num_bits {
            index = next_eligible(image, index)?;
            let component = image.component(index).ok_or(StegoError::OutOfBounds)?;
            let mut bit = component & 1;
            let pattern = (component >> 1) & 0b11;
            if map & (1 << pattern) != 0 {
                bit ^= 1;
            }
            out[bit_index / 8] |= bit << (7 - bit_index % 8);
            index += 1;
        }
        *cursor = index;
        Ok(out)
    }

    fn check_capacity(&self, image: &BmpImage, num_bits: usize) -> bool {
        capacity::check_capacity(image, StegAlgorithm::Lsbi, num_bits)
    }
}
