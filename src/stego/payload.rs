// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegobmp-core

//! Payload file handling.
//!
//! A [`FilePackage`] is the logical record that gets hidden: the raw bytes of
//! a file plus its extension (with the leading dot). Reading a secret file
//! produces one; extraction reconstructs one; writing appends the recovered
//! extension to the caller's base path so `secret` + `.png` lands as
//! `secret.png`.

use std::path::{Path, PathBuf};

use crate::stego::error::StegoError;
use crate::stego::frame::validate_extension;

/// A payload to be hidden or that has been recovered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePackage {
    /// Raw file contents.
    pub data: Vec<u8>,
    /// File extension including the leading `.`, e.g. `".png"`.
    pub extension: String,
}

impl FilePackage {
    /// Read a file from disk into a package, taking the extension from the
    /// file name.
    ///
    /// # Errors
    /// - [`StegoError::InvalidExtension`] if the file name has no extension
    ///   or the extension violates the frame format bounds.
    /// - [`StegoError::InvalidArgument`] if the file is empty.
    /// - [`StegoError::Io`] if the file cannot be read.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, StegoError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"))
            .ok_or(StegoError::InvalidExtension)?;
        validate_extension(&extension)?;

        let data = std::fs::read(path)?;
        if data.is_empty() {
            return Err(StegoError::InvalidArgument("payload file is empty"));
        }

        log::info!(
            "read payload {} ({} bytes, extension {})",
            path.display(),
            data.len(),
            extension
        );
        Ok(Self { data, extension })
    }

    /// Write the package to `base_path` with the package extension appended,
    /// returning the full output path.
    ///
    /// # Errors
    /// [`StegoError::Io`] if the file cannot be written.
    pub fn write_to(&self, base_path: impl AsRef<Path>) -> Result<PathBuf, StegoError> {
        let mut name = base_path.as_ref().as_os_str().to_os_string();
        name.push(&self.extension);
        let full_path = PathBuf::from(name);

        std::fs::write(&full_path, &self.data)?;
        log::info!(
            "wrote payload {} ({} bytes)",
            full_path.display(),
            self.data.len()
        );
        Ok(full_path)
    }
}
