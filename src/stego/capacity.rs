// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegobmp-core

//! Per-algorithm capacity checks.
//!
//! Every embed operation runs the matching predicate before touching a
//! single pixel; embedding on insufficient capacity is a reported error,
//! never an out-of-bounds write. The packer's own exhaustion check is a
//! second line of defense, not a substitute.

use crate::bmp::BmpImage;
use crate::stego::StegAlgorithm;

/// Number of bit-slots reserved for the LSBI inversion pattern map.
pub const LSBI_MAP_BITS: usize = 4;

/// Maximum number of payload bits the carrier can hold under `algorithm`.
///
/// - LSB1: one bit per component, `width*height*3`.
/// - LSB4: four bits per component, `width*height*3*4`.
/// - LSBI: the historical budget `width*height*2*2` minus the 4 map bits.
///   This is the formula extraction-compatible tools agree on; the green/
///   blue eligibility walk enforces the physical limit during embedding.
pub fn max_bits(image: &BmpImage, algorithm: StegAlgorithm) -> usize {
    let pixels = image.total_pixels();
    match algorithm {
        StegAlgorithm::Lsb1 => pixels * 3,
        StegAlgorithm::Lsb4 => pixels * 3 * 4,
        StegAlgorithm::Lsbi => (pixels * 2 * 2).saturating_sub(LSBI_MAP_BITS),
    }
}

/// True iff `num_bits` payload bits fit the carrier under `algorithm`.
pub fn check_capacity(image: &BmpImage, algorithm: StegAlgorithm, num_bits: usize) -> bool {
    num_bits <= max_bits(image, algorithm)
}
