use crate::core::cipher::PayloadCipher;
use crate::domain::model::Library;
use crate::utils::error::{LibraryError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    format_version: u32,
    saved_at: DateTime<Utc>,
    library: Library,
}

/// Turns the whole aggregate into an encrypted blob and back.
#[derive(Debug, Clone)]
pub struct SnapshotCodec {
    cipher: PayloadCipher,
}

impl SnapshotCodec {
    pub fn new(cipher: PayloadCipher) -> Self {
        Self { cipher }
    }

    pub fn cipher(&self) -> &PayloadCipher {
        &self.cipher
    }

    pub fn encode(&self, library: &Library) -> Result<Vec<u8>> {
        let snapshot = SnapshotRef {
            format_version: FORMAT_VERSION,
            saved_at: Utc::now(),
            library,
        };
        let plaintext = serde_json::to_vec(&snapshot)?;
        tracing::debug!(
            "Encoding snapshot: {} bytes plaintext, mode {}",
            plaintext.len(),
            self.cipher.mode()
        );
        self.cipher.encrypt(&plaintext)
    }

    pub fn decode(&self, data: &[u8]) -> Result<Library> {
        let plaintext = self.cipher.decrypt(data)?;
        let snapshot: Snapshot = serde_json::from_slice(&plaintext)?;

        if snapshot.format_version != FORMAT_VERSION {
            return Err(LibraryError::UnsupportedFormatError {
                found: snapshot.format_version,
                expected: FORMAT_VERSION,
            });
        }

        tracing::debug!("Decoded snapshot saved at {}", snapshot.saved_at);
        Ok(snapshot.library)
    }
}

// Borrowing twin of `Snapshot` so encoding never clones the library.
#[derive(Serialize)]
struct SnapshotRef<'a> {
    format_version: u32,
    saved_at: DateTime<Utc>,
    library: &'a Library,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cipher::{CipherMode, DEFAULT_KEY};

    fn sample_library() -> Library {
        let mut library = Library::new();
        library.add_book("Dune", "Herbert");
        library.add_book("Emma", "Austen");
        library.add_member("Alice");
        library.issue_book(1, 1).unwrap();
        library.issue_book(2, 1).unwrap();
        library.return_book(1, 1).unwrap();
        library
    }

    #[test]
    fn test_decode_reproduces_library() {
        for mode in [CipherMode::Aes128Ecb, CipherMode::Aes128Gcm] {
            let codec =
                SnapshotCodec::new(PayloadCipher::new(DEFAULT_KEY.as_bytes(), mode).unwrap());
            let library = sample_library();

            let blob = codec.encode(&library).unwrap();
            assert_eq!(codec.decode(&blob).unwrap(), library);
        }
    }

    #[test]
    fn test_ciphertext_is_not_plain_json() {
        let codec = SnapshotCodec::new(PayloadCipher::legacy());
        let blob = codec.encode(&sample_library()).unwrap();
        let needle = b"Dune";
        assert!(!blob.windows(needle.len()).any(|w| w == needle));
    }

    #[test]
    fn test_rejects_unknown_format_version() {
        let cipher = PayloadCipher::legacy();
        let json = serde_json::json!({
            "format_version": 99,
            "saved_at": "2024-01-01T00:00:00Z",
            "library": { "books": [], "members": [], "return_history": [] }
        });
        let blob = cipher.encrypt(json.to_string().as_bytes()).unwrap();

        let err = SnapshotCodec::new(cipher).decode(&blob).unwrap_err();
        assert!(matches!(
            err,
            LibraryError::UnsupportedFormatError { found: 99, .. }
        ));
    }

    #[test]
    fn test_decrypted_garbage_is_a_serialization_error() {
        let cipher = PayloadCipher::legacy();
        let blob = cipher.encrypt(b"not json at all").unwrap();
        let err = SnapshotCodec::new(cipher).decode(&blob).unwrap_err();
        assert!(matches!(err, LibraryError::SerializationError(_)));
    }
}
