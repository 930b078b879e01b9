//! Symmetric encryption of whole snapshot payloads.
//!
//! `Aes128Ecb` reproduces the legacy at-rest format: a fixed key, PKCS#7
//! padding and no IV, so equal plaintexts give equal ciphertexts. It only
//! obfuscates the file. `Aes128Gcm` draws a fresh nonce for every save and
//! authenticates the payload; prefer it for anything that matters.

use crate::utils::error::{LibraryError, Result};
use aes::Aes128;
use aes_gcm::aead::Aead;
use aes_gcm::{Aes128Gcm, Nonce};
use ecb::cipher::block_padding::Pkcs7;
use ecb::cipher::{BlockDecryptMut, BlockEncryptMut, KeyInit};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

type Aes128EcbEnc = ecb::Encryptor<Aes128>;
type Aes128EcbDec = ecb::Decryptor<Aes128>;

pub const KEY_LEN: usize = 16;
pub const DEFAULT_KEY: &str = "1234567812345678";
const GCM_NONCE_LEN: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CipherMode {
    #[default]
    #[serde(rename = "aes128-ecb")]
    Aes128Ecb,
    #[serde(rename = "aes128-gcm")]
    Aes128Gcm,
}

impl CipherMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CipherMode::Aes128Ecb => "aes128-ecb",
            CipherMode::Aes128Gcm => "aes128-gcm",
        }
    }
}

impl fmt::Display for CipherMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CipherMode {
    type Err = LibraryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aes128-ecb" | "ecb" => Ok(CipherMode::Aes128Ecb),
            "aes128-gcm" | "gcm" => Ok(CipherMode::Aes128Gcm),
            other => Err(LibraryError::InvalidConfigValueError {
                field: "encryption.mode".to_string(),
                value: other.to_string(),
                reason: "Supported modes: aes128-ecb, aes128-gcm".to_string(),
            }),
        }
    }
}

#[derive(Clone)]
pub struct PayloadCipher {
    key: [u8; KEY_LEN],
    mode: CipherMode,
}

// Keep the key out of debug output and logs.
impl fmt::Debug for PayloadCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PayloadCipher")
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl PayloadCipher {
    pub fn new(key: &[u8], mode: CipherMode) -> Result<Self> {
        let key: [u8; KEY_LEN] = key.try_into().map_err(|_| LibraryError::CipherError {
            message: format!("key must be {} bytes, got {}", KEY_LEN, key.len()),
        })?;
        Ok(Self { key, mode })
    }

    /// The legacy fixed-key ECB cipher.
    pub fn legacy() -> Self {
        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(DEFAULT_KEY.as_bytes());
        Self {
            key,
            mode: CipherMode::Aes128Ecb,
        }
    }

    pub fn mode(&self) -> CipherMode {
        self.mode
    }

    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        match self.mode {
            CipherMode::Aes128Ecb => {
                let enc = Aes128EcbEnc::new_from_slice(&self.key).map_err(cipher_error)?;
                Ok(enc.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
            }
            CipherMode::Aes128Gcm => {
                let gcm = Aes128Gcm::new_from_slice(&self.key).map_err(cipher_error)?;
                let mut nonce = [0u8; GCM_NONCE_LEN];
                rand::rng().fill_bytes(&mut nonce);

                let sealed = gcm
                    .encrypt(Nonce::from_slice(&nonce), plaintext)
                    .map_err(cipher_error)?;

                let mut out = Vec::with_capacity(GCM_NONCE_LEN + sealed.len());
                out.extend_from_slice(&nonce);
                out.extend_from_slice(&sealed);
                Ok(out)
            }
        }
    }

    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        match self.mode {
            CipherMode::Aes128Ecb => {
                let dec = Aes128EcbDec::new_from_slice(&self.key).map_err(cipher_error)?;
                dec.decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
                    .map_err(|_| LibraryError::CipherError {
                        message: "bad padding or ciphertext length".to_string(),
                    })
            }
            CipherMode::Aes128Gcm => {
                if ciphertext.len() < GCM_NONCE_LEN {
                    return Err(LibraryError::CipherError {
                        message: "payload shorter than nonce".to_string(),
                    });
                }
                let (nonce, sealed) = ciphertext.split_at(GCM_NONCE_LEN);
                let gcm = Aes128Gcm::new_from_slice(&self.key).map_err(cipher_error)?;
                gcm.decrypt(Nonce::from_slice(nonce), sealed)
                    .map_err(|_| LibraryError::CipherError {
                        message: "authentication failed".to_string(),
                    })
            }
        }
    }
}

fn cipher_error(e: impl fmt::Display) -> LibraryError {
    LibraryError::CipherError {
        message: e.to_string(),
    }
}
