// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegobmp-core

//! Symmetric encryption layer for hidden payloads.
//!
//! Supports AES-128/192/256 and 3DES (EDE3) in ECB, CFB, OFB and CBC modes.
//! Key and IV are derived together from the password with
//! PBKDF2-HMAC-SHA256 over a fixed salt, so the decrypt side reproduces
//! them from the password alone -- nothing key-related is embedded in the
//! carrier.
//!
//! Block modes (ECB/CBC) use PKCS#7 padding; stream modes (CFB/OFB) keep
//! the plaintext length. A wrong password surfaces as
//! [`StegoError::DecryptionFailed`] for the padded modes; for the stream
//! modes it yields garbage that the frame parser rejects instead.

use std::fmt;
use std::str::FromStr;

use aes::{Aes128, Aes192, Aes256};
use cipher::block_padding::Pkcs7;
use cipher::{
    AsyncStreamCipher, BlockCipher, BlockDecryptMut, BlockEncryptMut, KeyInit, KeyIvInit,
    StreamCipher,
};
use des::TdesEde3;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::stego::error::StegoError;

/// PBKDF2 iteration count. Fixed: both sides must derive identical keys.
const PBKDF2_ITERATIONS: u32 = 10_000;

/// Fixed 8-byte salt. Deliberately constant so that decryption needs only
/// the password; the payload itself carries no key material.
const PBKDF2_SALT: [u8; 8] = [0u8; 8];

/// Block cipher selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherAlgorithm {
    Aes128,
    Aes192,
    Aes256,
    TripleDes,
}

impl CipherAlgorithm {
    fn key_len(self) -> usize {
        match self {
            Self::Aes128 => 16,
            Self::Aes192 => 24,
            Self::Aes256 => 32,
            Self::TripleDes => 24,
        }
    }

    fn block_len(self) -> usize {
        match self {
            Self::Aes128 | Self::Aes192 | Self::Aes256 => 16,
            Self::TripleDes => 8,
        }
    }
}

impl FromStr for CipherAlgorithm {
    type Err = StegoError;

    fn from_str(s: &str) -> Result<Self, StegoError> {
        match s.to_ascii_lowercase().as_str() {
            "aes128" => Ok(Self::Aes128),
            "aes192" => Ok(Self::Aes192),
            "aes256" => Ok(Self::Aes256),
            "3des" => Ok(Self::TripleDes),
            _ => Err(StegoError::InvalidArgument("unknown cipher algorithm")),
        }
    }
}

impl fmt::Display for CipherAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Aes128 => write!(f, "aes128"),
            Self::Aes192 => write!(f, "aes192"),
            Self::Aes256 => write!(f, "aes256"),
            Self::TripleDes => write!(f, "3des"),
        }
    }
}

/// Block cipher mode of operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherMode {
    Ecb,
    Cfb,
    Ofb,
    Cbc,
}

impl FromStr for CipherMode {
    type Err = StegoError;

    fn from_str(s: &str) -> Result<Self, StegoError> {
        match s.to_ascii_lowercase().as_str() {
            "ecb" => Ok(Self::Ecb),
            "cfb" => Ok(Self::Cfb),
            "ofb" => Ok(Self::Ofb),
            "cbc" => Ok(Self::Cbc),
            _ => Err(StegoError::InvalidArgument("unknown cipher mode")),
        }
    }
}

impl fmt::Display for CipherMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ecb => write!(f, "ecb"),
            Self::Cfb => write!(f, "cfb"),
            Self::Ofb => write!(f, "ofb"),
            Self::Cbc => write!(f, "cbc"),
        }
    }
}

/// Derive `key_len` key bytes plus `iv_len` IV bytes from the password.
///
/// Key and IV come out of a single PBKDF2 stream, key first, exactly as on
/// the encrypt side -- the split must match or decryption fails.
fn derive_key_iv(password: &str, key_len: usize, iv_len: usize) -> (Zeroizing<Vec<u8>>, Vec<u8>) {
    let mut key_iv = Zeroizing::new(vec![0u8; key_len + iv_len]);
    pbkdf2::pbkdf2_hmac::<Sha256>(
        password.as_bytes(),
        &PBKDF2_SALT,
        PBKDF2_ITERATIONS,
        &mut key_iv,
    );
    let key = Zeroizing::new(key_iv[..key_len].to_vec());
    let iv = key_iv[key_len..].to_vec();
    (key, iv)
}

fn encrypt_ecb<C>(key: &[u8], data: &[u8]) -> Result<Vec<u8>, StegoError>
where
    C: BlockEncryptMut + BlockCipher + KeyInit,
{
    let cipher = ecb::Encryptor::<C>::new_from_slice(key)
        .map_err(|_| StegoError::InvalidArgument("invalid key length"))?;
    Ok(cipher.encrypt_padded_vec_mut::<Pkcs7>(data))
}

fn decrypt_ecb<C>(key: &[u8], data: &[u8]) -> Result<Vec<u8>, StegoError>
where
    C: BlockDecryptMut + BlockCipher + KeyInit,
{
    let cipher = ecb::Decryptor::<C>::new_from_slice(key)
        .map_err(|_| StegoError::InvalidArgument("invalid key length"))?;
    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(data)
        .map_err(|_| StegoError::DecryptionFailed)
}

fn encrypt_cbc<C>(key: &[u8], iv: &[u8], data: &[u8]) -> Result<Vec<u8>, StegoError>
where
    C: BlockEncryptMut + BlockCipher + KeyInit,
{
    let cipher = cbc::Encryptor::<C>::new_from_slices(key, iv)
        .map_err(|_| StegoError::InvalidArgument("invalid key length"))?;
    Ok(cipher.encrypt_padded_vec_mut::<Pkcs7>(data))
}

fn decrypt_cbc<C>(key: &[u8], iv: &[u8], data: &[u8]) -> Result<Vec<u8>, StegoError>
where
    C: BlockDecryptMut + BlockCipher + KeyInit,
{
    let cipher = cbc::Decryptor::<C>::new_from_slices(key, iv)
        .map_err(|_| StegoError::InvalidArgument("invalid key length"))?;
    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(data)
        .map_err(|_| StegoError::DecryptionFailed)
}

fn encrypt_cfb<C>(key: &[u8], iv: &[u8], data: &[u8]) -> Result<Vec<u8>, StegoError>
where
    C: BlockEncryptMut + BlockCipher + KeyInit,
{
    let mut buf = data.to_vec();
    cfb_mode::Encryptor::<C>::new_from_slices(key, iv)
        .map_err(|_| StegoError::InvalidArgument("invalid key length"))?
        .encrypt(&mut buf);
    Ok(buf)
}

fn decrypt_cfb<C>(key: &[u8], iv: &[u8], data: &[u8]) -> Result<Vec<u8>, StegoError>
where
    C: BlockEncryptMut + BlockCipher + KeyInit,
{
    let mut buf = data.to_vec();
    cfb_mode::Decryptor::<C>::new_from_slices(key, iv)
        .map_err(|_| StegoError::InvalidArgument("invalid key length"))?
        .decrypt(&mut buf);
    Ok(buf)
}

fn apply_ofb<C>(key: &[u8], iv: &[u8], data: &[u8]) -> Result<Vec<u8>, StegoError>
where
    C: BlockEncryptMut + BlockCipher + KeyInit,
    <C as cipher::BlockSizeUser>::BlockSize: cipher::typenum::IsLess<cipher::typenum::U256>,
    cipher::typenum::Le<<C as cipher::BlockSizeUser>::BlockSize, cipher::typenum::U256>:
        cipher::typenum::NonZero,
{
    let mut buf = data.to_vec();
    ofb::Ofb::<C>::new_from_slices(key, iv)
        .map_err(|_| StegoError::InvalidArgument("invalid key length"))?
        .apply_keystream(&mut buf);
    Ok(buf)
}

/// Encrypt `data` with the selected algorithm and mode, key and IV derived
/// from `password`.
pub fn encrypt(
    data: &[u8],
    algorithm: CipherAlgorithm,
    mode: CipherMode,
    password: &str,
) -> Result<Vec<u8>, StegoError> {
    let iv_len = if mode == CipherMode::Ecb { 0 } else { algorithm.block_len() };
    let (key, iv) = derive_key_iv(password, algorithm.key_len(), iv_len);

    match mode {
        CipherMode::Ecb => match algorithm {
            CipherAlgorithm::Aes128 => encrypt_ecb::<Aes128>(&key, data),
            CipherAlgorithm::Aes192 => encrypt_ecb::<Aes192>(&key, data),
            CipherAlgorithm::Aes256 => encrypt_ecb::<Aes256>(&key, data),
            CipherAlgorithm::TripleDes => encrypt_ecb::<TdesEde3>(&key, data),
        },
        CipherMode::Cbc => match algorithm {
            CipherAlgorithm::Aes128 => encrypt_cbc::<Aes128>(&key, &iv, data),
            CipherAlgorithm::Aes192 => encrypt_cbc::<Aes192>(&key, &iv, data),
            CipherAlgorithm::Aes256 => encrypt_cbc::<Aes256>(&key, &iv, data),
            CipherAlgorithm::TripleDes => encrypt_cbc::<TdesEde3>(&key, &iv, data),
        },
        CipherMode::Cfb => match algorithm {
            CipherAlgorithm::Aes128 => encrypt_cfb::<Aes128>(&key, &iv, data),
            CipherAlgorithm::Aes192 => encrypt_cfb::<Aes192>(&key, &iv, data),
            CipherAlgorithm::Aes256 => encrypt_cfb::<Aes256>(&key, &iv, data),
            CipherAlgorithm::TripleDes => encrypt_cfb::<TdesEde3>(&key, &iv, data),
        },
        CipherMode::Ofb => match algorithm {
            CipherAlgorithm::Aes128 => apply_ofb::<Aes128>(&key, &iv, data),
            CipherAlgorithm::Aes192 => apply_ofb::<Aes192>(&key, &iv, data),
            CipherAlgorithm::Aes256 => apply_ofb::<Aes256>(&key, &iv, data),
            CipherAlgorithm::TripleDes => apply_ofb::<TdesEde3>(&key, &iv, data),
        },
    }
}

/// Decrypt `data` with the selected algorithm and mode, key and IV derived
/// from `password`.
pub fn decrypt(
    data: &[u8],
    algorithm: CipherAlgorithm,
    mode: CipherMode,
    password: &str,
) -> Result<Vec<u8>, StegoError> {
    let iv_len = if mode == CipherMode::Ecb { 0 } else { algorithm.block_len() };
    let (key, iv) = derive_key_iv(password, algorithm.key_len(), iv_len);

    match mode {
        CipherMode::Ecb => match algorithm {
            CipherAlgorithm::Aes128 => decrypt_ecb::<Aes128>(&key, data),
            CipherAlgorithm::Aes192 => decrypt_ecb::<Aes192>(&key, data),
            CipherAlgorithm::Aes256 => decrypt_ecb::<Aes256>(&key, data),
            CipherAlgorithm::TripleDes => decrypt_ecb::<TdesEde3>(&key, data),
        },
        CipherMode::Cbc => match algorithm {
            CipherAlgorithm::Aes128 => decrypt_cbc::<Aes128>(&key, &iv, data),
            CipherAlgorithm::Aes192 => decrypt_cbc::<Aes192>(&key, &iv, data),
            CipherAlgorithm::Aes256 => decrypt_cbc::<Aes256>(&key, &iv, data),
            CipherAlgorithm::TripleDes => decrypt_cbc::<TdesEde3>(&key, &iv, data),
        },
        CipherMode::Cfb => match algorithm {
            CipherAlgorithm::Aes128 => decrypt_cfb::<Aes128>(&key, &iv, data),
            CipherAlgorithm::Aes192 => decrypt_cfb::<Aes192>(&key, &iv, data),
            CipherAlgorithm::Aes256 => decrypt_cfb::<Aes256>(&key, &iv, data),
            CipherAlgorithm::TripleDes => decrypt_cfb::<TdesEde3>(&key, &iv, data),
        },
        CipherMode::Ofb => match algorithm {
            CipherAlgorithm::Aes128 => apply_ofb::<Aes128>(&key, &iv, data),
            CipherAlgorithm::Aes192 => apply_ofb::<Aes192>(&key, &iv, data),
            CipherAlgorithm::Aes256 => apply_ofb::<Aes256>(&key, &iv, data),
            CipherAlgorithm::TripleDes => apply_ofb::<TdesEde3>(&key, &iv, data),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALGORITHMS: [CipherAlgorithm; 4] = [
        CipherAlgorithm::Aes128,
        CipherAlgorithm::Aes192,
        CipherAlgorithm::Aes256,
        CipherAlgorithm::TripleDes,
    ];
    const MODES: [CipherMode; 4] = [
        CipherMode::Ecb,
        CipherMode::Cfb,
        CipherMode::Ofb,
        CipherMode::Cbc,
    ];

    #[test]
    fn encrypt_decrypt_roundtrip_all_combinations() {
        let msg = b"Hello, steganography!";
        for algorithm in ALGORITHMS {
            for mode in MODES {
                let ct = encrypt(msg, algorithm, mode, "secret123").unwrap();
                assert_ne!(ct, msg.to_vec(), "{algorithm}/{mode} left plaintext visible");
                let pt = decrypt(&ct, algorithm, mode, "secret123").unwrap();
                assert_eq!(pt, msg.to_vec(), "{algorithm}/{mode} roundtrip failed");
            }
        }
    }

    #[test]
    fn wrong_password_fails_padded_modes() {
        let msg = b"secret message";
        for algorithm in ALGORITHMS {
            for mode in [CipherMode::Ecb, CipherMode::Cbc] {
                let ct = encrypt(msg, algorithm, mode, "correct").unwrap();
                let result = decrypt(&ct, algorithm, mode, "wrong");
                // PKCS#7 unpadding almost always rejects a garbled block.
                if let Ok(pt) = result {
                    assert_ne!(pt, msg.to_vec());
                }
            }
        }
    }

    #[test]
    fn wrong_password_garbles_stream_modes() {
        let msg = b"secret message";
        for mode in [CipherMode::Cfb, CipherMode::Ofb] {
            let ct = encrypt(msg, CipherAlgorithm::Aes256, mode, "correct").unwrap();
            let pt = decrypt(&ct, CipherAlgorithm::Aes256, mode, "wrong").unwrap();
            assert_ne!(pt, msg.to_vec());
        }
    }

    #[test]
    fn stream_modes_preserve_length() {
        let msg = [7u8; 13];
        for mode in [CipherMode::Cfb, CipherMode::Ofb] {
            let ct = encrypt(&msg, CipherAlgorithm::Aes128, mode, "p").unwrap();
            assert_eq!(ct.len(), msg.len());
        }
    }

    #[test]
    fn padded_modes_round_up_to_block() {
        let msg = [7u8; 13];
        let ct = encrypt(&msg, CipherAlgorithm::Aes128, CipherMode::Cbc, "p").unwrap();
        assert_eq!(ct.len(), 16);
        let ct = encrypt(&msg, CipherAlgorithm::TripleDes, CipherMode::Cbc, "p").unwrap();
        assert_eq!(ct.len(), 16); // two 8-byte blocks
    }

    #[test]
    fn key_derivation_is_deterministic() {
        let (key_a, iv_a) = derive_key_iv("pass", 32, 16);
        let (key_b, iv_b) = derive_key_iv("pass", 32, 16);
        assert_eq!(*key_a, *key_b);
        assert_eq!(iv_a, iv_b);

        let (key_c, _) = derive_key_iv("other", 32, 16);
        assert_ne!(*key_a, *key_c);
    }

    #[test]
    fn selector_strings() {
        assert_eq!("aes128".parse::<CipherAlgorithm>().unwrap(), CipherAlgorithm::Aes128);
        assert_eq!("AES256".parse::<CipherAlgorithm>().unwrap(), CipherAlgorithm::Aes256);
        assert_eq!("3des".parse::<CipherAlgorithm>().unwrap(), CipherAlgorithm::TripleDes);
        assert!("des".parse::<CipherAlgorithm>().is_err());

        assert_eq!("cbc".parse::<CipherMode>().unwrap(), CipherMode::Cbc);
        assert_eq!("OFB".parse::<CipherMode>().unwrap(), CipherMode::Ofb);
        assert!("ctr".parse::<CipherMode>().is_err());
    }
}
