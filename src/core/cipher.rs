//! AEAD seal/open for the session blob.
//!
//! AES-256-GCM with a fresh random nonce per seal. The sealed blob is
//! the combined encoding `nonce || ciphertext || tag`, so callers only
//! ever handle a single opaque byte string.

use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use rand::RngCore;
use zeroize::Zeroizing;

use crate::error::{CipherError, Result};

/// Key size in bytes (AES-256).
pub const KEY_LEN: usize = 32;

/// Nonce size in bytes (96-bit GCM nonce).
pub const NONCE_LEN: usize = 12;

/// Authentication tag size in bytes.
pub const TAG_LEN: usize = 16;

/// Seal `plaintext` under `key`.
///
/// # Returns
///
/// The combined blob `nonce || ciphertext || tag`. Sealing the same
/// plaintext twice produces different blobs (fresh nonce each call).
///
/// # Errors
///
/// Returns `CipherError::KeyLength` for a key that is not 32 bytes, or
/// `CipherError::Seal` if the primitive fails.
pub fn seal(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = build_cipher(key)?;

    let mut nonce_bytes = [0u8; NONCE_LEN];
    rand::thread_rng().fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| CipherError::Seal(e.to_string()))?;

    let mut blob = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    blob.extend_from_slice(&nonce_bytes);
    blob.extend_from_slice(&ciphertext);
    Ok(blob)
}

/// Open a blob produced by [`seal`].
///
/// # Returns
///
/// The authenticated plaintext, wrapped so it is wiped on drop.
///
/// # Errors
///
/// Returns `CipherError::Integrity` if the blob is truncated, was
/// tampered with, or was sealed under a different key. Partial or
/// unauthenticated plaintext is never returned.
pub fn open(key: &[u8], blob: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    let cipher = build_cipher(key)?;

    // A valid blob holds at least a nonce and a tag. Anything shorter
    // is corruption, reported the same way as a failed tag check.
    if blob.len() < NONCE_LEN + TAG_LEN {
        return Err(CipherError::Integrity.into());
    }

    let (nonce_bytes, ciphertext) = blob.split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    let plaintext = cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| CipherError::Integrity)?;
    Ok(Zeroizing::new(plaintext))
}

fn build_cipher(key: &[u8]) -> Result<Aes256Gcm> {
    Aes256Gcm::new_from_slice(key).map_err(|_| {
        CipherError::KeyLength {
            expected: KEY_LEN,
            actual: key.len(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn test_key() -> [u8; KEY_LEN] {
        let mut key = [0u8; KEY_LEN];
        rand::thread_rng().fill_bytes(&mut key);
        key
    }

    #[test]
    fn seal_open_roundtrip() {
        let key = test_key();
        let plaintext = b"session=abc123; path=/";

        let blob = seal(&key, plaintext).unwrap();
        let opened = open(&key, &blob).unwrap();
        assert_eq!(&opened[..], plaintext);
    }

    #[test]
    fn blob_layout_is_nonce_ciphertext_tag() {
        let key = test_key();
        let plaintext = b"payload";
        let blob = seal(&key, plaintext).unwrap();
        assert_eq!(blob.len(), NONCE_LEN + plaintext.len() + TAG_LEN);
    }

    #[test]
    fn sealing_twice_differs() {
        let key = test_key();
        let a = seal(&key, b"same").unwrap();
        let b = seal(&key, b"same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn wrong_key_is_integrity_error() {
        let blob = seal(&test_key(), b"secret").unwrap();
        let err = open(&test_key(), &blob).unwrap_err();
        assert!(matches!(err, Error::Cipher(CipherError::Integrity)));
    }

    #[test]
    fn truncated_blob_is_integrity_error() {
        let key = test_key();
        let blob = seal(&key, b"secret").unwrap();
        let err = open(&key, &blob[..NONCE_LEN + TAG_LEN - 1]).unwrap_err();
        assert!(matches!(err, Error::Cipher(CipherError::Integrity)));
    }

    #[test]
    fn any_flipped_bit_is_integrity_error() {
        let key = test_key();
        let blob = seal(&key, b"cookie payload").unwrap();

        for i in 0..blob.len() {
            let mut tampered = blob.clone();
            tampered[i] ^= 0x01;
            let err = open(&key, &tampered).unwrap_err();
            assert!(
                matches!(err, Error::Cipher(CipherError::Integrity)),
                "byte {} flip must fail the tag check",
                i
            );
        }
    }

    #[test]
    fn empty_plaintext_roundtrips() {
        let key = test_key();
        let blob = seal(&key, b"").unwrap();
        assert_eq!(&open(&key, &blob).unwrap()[..], b"");
    }

    #[test]
    fn short_key_is_key_length_error() {
        let err = seal(&[0u8; 16], b"x").unwrap_err();
        assert!(matches!(
            err,
            Error::Cipher(CipherError::KeyLength {
                expected: KEY_LEN,
                actual: 16
            })
        ));
    }
}
