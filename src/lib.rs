// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegobmp-core

//! # stegobmp-core
//!
//! LSB steganography engine for hiding arbitrary files in uncompressed
//! 24-bit BMP images. Provides three embedding algorithms:
//!
//! - **LSB1**: 1 bit per color component. Lowest visual impact.
//! - **LSB4**: 4 bits per component. Four times the capacity.
//! - **LSBI**: adaptive LSB with per-pattern inversion over the green and
//!   blue channels, reducing the statistical footprint of the embedding.
//!
//! The hidden payload is self-describing (`[size:4][data][extension]`), so
//! extraction needs no metadata beyond the algorithm choice. Payloads can
//! optionally be encrypted with AES-128/192/256 or 3DES in ECB/CFB/OFB/CBC,
//! keys derived from a password via PBKDF2. The BMP codec (`bmp` module) is
//! zero-dependency (std only).
//!
//! # Quick start
//!
//! ```rust,ignore
//! use stegobmp_core::{embed, extract, BmpImage, FilePackage, StegAlgorithm};
//!
//! let mut carrier = BmpImage::load("cover.bmp").unwrap();
//! let secret = FilePackage::from_path("secret.png").unwrap();
//! embed(&mut carrier, &secret, StegAlgorithm::Lsb1).unwrap();
//! carrier.save("stego.bmp").unwrap();
//!
//! let recovered = extract(&BmpImage::load("stego.bmp").unwrap(), StegAlgorithm::Lsb1).unwrap();
//! assert_eq!(recovered.data, secret.data);
//! ```

pub mod bmp;
pub mod stego;

pub use bmp::address::Channel;
pub use bmp::error::BmpError;
pub use bmp::BmpImage;
pub use stego::{embed, embed_encrypted, extract, extract_encrypted};
pub use stego::{CipherAlgorithm, CipherMode, FilePackage, StegAlgorithm, StegoError};
pub use stego::capacity::{check_capacity, max_bits};
