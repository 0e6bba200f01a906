// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegobmp-core

//! Command-line front end for the stegobmp engine.
//!
//! ```text
//! stegobmp --embed --in secret.png -p cover.bmp --out stego.bmp --steg LSB1
//! stegobmp --embed --in secret.png -p cover.bmp --out stego.bmp --steg LSBI \
//!          -a aes256 -m cbc --pass "hunter2"
//! stegobmp --extract -p stego.bmp --out recovered --steg LSB1
//! ```
//!
//! On extraction, `--out` is the base path: the recovered extension is
//! appended to it.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use stegobmp_core::{
    embed, embed_encrypted, extract, extract_encrypted, BmpImage, CipherAlgorithm, CipherMode,
    FilePackage, StegAlgorithm,
};

#[derive(Parser)]
#[command(name = "stegobmp", about = "Hide and recover files in 24-bit BMP images")]
struct Cli {
    /// Embed a file into the carrier.
    #[arg(long, conflicts_with = "extract")]
    embed: bool,

    /// Extract a hidden file from the carrier.
    #[arg(long, conflicts_with = "embed")]
    extract: bool,

    /// File to hide (embed mode only).
    #[arg(long = "in", value_name = "FILE", required_if_eq("embed", "true"))]
    input: Option<PathBuf>,

    /// Carrier BMP image.
    #[arg(short = 'p', long = "carrier", value_name = "BMP")]
    carrier: PathBuf,

    /// Output path: the stego BMP (embed) or the base name for the
    /// recovered file (extract; the hidden extension is appended).
    #[arg(long, value_name = "PATH")]
    out: PathBuf,

    /// Steganography algorithm: LSB1, LSB4 or LSBI.
    #[arg(long, value_parser = parse_steg)]
    steg: StegAlgorithm,

    /// Cipher algorithm: aes128, aes192, aes256 or 3des.
    #[arg(short = 'a', value_parser = parse_cipher, requires = "pass")]
    algorithm: Option<CipherAlgorithm>,

    /// Cipher mode: ecb, cfb, ofb or cbc.
    #[arg(short = 'm', value_parser = parse_mode, requires = "pass")]
    mode: Option<CipherMode>,

    /// Encryption password. Presence of this flag turns encryption on.
    #[arg(long)]
    pass: Option<String>,

    /// Log level: off, error, warn, info, debug or trace.
    #[arg(long, default_value = "warn")]
    loglevel: log::LevelFilter,
}

fn parse_steg(s: &str) -> Result<StegAlgorithm, String> {
    s.parse().map_err(|e| format!("{e}"))
}

fn parse_cipher(s: &str) -> Result<CipherAlgorithm, String> {
    s.parse().map_err(|e| format!("{e}"))
}

fn parse_mode(s: &str) -> Result<CipherMode, String> {
    s.parse().map_err(|e| format!("{e}"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new().filter_level(cli.loglevel).init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("stegobmp: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.embed && !cli.extract {
        return Err("choose one of --embed or --extract".into());
    }

    // Defaults match the reference tool: giving only --pass means aes128/cbc.
    let cipher = cli.algorithm.unwrap_or(CipherAlgorithm::Aes128);
    let mode = cli.mode.unwrap_or(CipherMode::Cbc);

    if cli.embed {
        let input = cli.input.as_ref().ok_or("--in is required for --embed")?;
        let package = FilePackage::from_path(input)?;
        let mut carrier = BmpImage::load(&cli.carrier)?;

        match &cli.pass {
            Some(pass) => embed_encrypted(&mut carrier, &package, cli.steg, cipher, mode, pass)?,
            None => embed(&mut carrier, &package, cli.steg)?,
        }
        carrier.save(&cli.out)?;
        println!("embedded {} into {}", input.display(), cli.out.display());
    } else {
        let carrier = BmpImage::load(&cli.carrier)?;
        let package = match &cli.pass {
            Some(pass) => extract_encrypted(&carrier, cli.steg, cipher, mode, pass)?,
            None => extract(&carrier, cli.steg)?,
        };
        let written = package.write_to(&cli.out)?;
        println!("extracted {} bytes to {}", package.data.len(), written.display());
    }
    Ok(())
}
