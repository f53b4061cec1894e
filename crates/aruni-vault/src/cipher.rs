//! Password-based authenticated encryption of credential bundles
//!
//! Token layout, base64url encoded as a single ASCII line:
//!
//! ```text
//! version (1 byte) | nonce (12 bytes) | ciphertext + Poly1305 tag
//! ```
//!
//! The key is a single unsalted SHA-256 of the password. That is fast to
//! brute-force offline and is kept only so existing tokens stay readable; a
//! salted, slow KDF (Argon2id with the salt stored in the token) needs a new
//! version byte.

use base64::{engine::general_purpose::URL_SAFE as BASE64_URL, Engine};
use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Nonce,
};
use rand::RngCore;
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::bundle::CredentialBundle;
use crate::error::{VaultError, VaultResult};
use crate::password::check_length;

/// Token format version
pub const TOKEN_VERSION: u8 = 0x01;

/// Nonce size in bytes for ChaCha20-Poly1305
const NONCE_SIZE: usize = 12;

/// Poly1305 tag size in bytes
const TAG_SIZE: usize = 16;

/// 256-bit key derived from a password, wiped on drop
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey([u8; 32]);

impl DerivedKey {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

/// Derive the symmetric key from a password
pub fn derive_key(password: &str) -> DerivedKey {
    let digest = Sha256::digest(password.as_bytes());
    let mut key = [0u8; 32];
    key.copy_from_slice(&digest);
    DerivedKey(key)
}

/// Generate a random nonce for encryption
fn generate_nonce() -> [u8; NONCE_SIZE] {
    let mut nonce = [0u8; NONCE_SIZE];
    rand::thread_rng().fill_bytes(&mut nonce);
    nonce
}

/// Encrypt a bundle under a password
///
/// Every call draws a fresh nonce, so locking the same bundle twice yields
/// different tokens.
pub fn lock(bundle: &CredentialBundle, password: &str) -> VaultResult<Vec<u8>> {
    check_length(password)?;

    let key = derive_key(password);
    let cipher = ChaCha20Poly1305::new_from_slice(key.as_bytes())
        .map_err(|_| VaultError::Encryption)?;

    let plaintext = Zeroizing::new(serde_json::to_vec(bundle)?);
    let nonce_bytes = generate_nonce();
    let sealed = cipher
        .encrypt(Nonce::from_slice(&nonce_bytes), plaintext.as_slice())
        .map_err(|_| VaultError::Encryption)?;

    let mut raw = Vec::with_capacity(1 + NONCE_SIZE + sealed.len());
    raw.push(TOKEN_VERSION);
    raw.extend_from_slice(&nonce_bytes);
    raw.extend_from_slice(&sealed);

    Ok(BASE64_URL.encode(raw).into_bytes())
}

/// Decrypt a token produced by [`lock`]
///
/// The tag is verified before any plaintext is parsed. Bad encoding,
/// truncation, a wrong password and tampering all surface as
/// [`VaultError::Authentication`].
pub fn unlock(token: &[u8], password: &str) -> VaultResult<CredentialBundle> {
    let raw = BASE64_URL
        .decode(token.trim_ascii())
        .map_err(|_| VaultError::Authentication)?;

    let (&version, rest) = raw.split_first().ok_or(VaultError::Authentication)?;
    if version != TOKEN_VERSION {
        return Err(VaultError::UnsupportedFormat(version));
    }
    if rest.len() < NONCE_SIZE + TAG_SIZE {
        return Err(VaultError::Authentication);
    }
    let (nonce_bytes, sealed) = rest.split_at(NONCE_SIZE);

    let key = derive_key(password);
    let cipher = ChaCha20Poly1305::new_from_slice(key.as_bytes())
        .map_err(|_| VaultError::Authentication)?;
    let plaintext = Zeroizing::new(
        cipher
            .decrypt(Nonce::from_slice(nonce_bytes), sealed)
            .map_err(|_| VaultError::Authentication)?,
    );

    serde_json::from_slice(&plaintext).map_err(|_| VaultError::Authentication)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle() -> CredentialBundle {
        CredentialBundle::new("sheet-123", br#"{"client_email":"bot@x.org"}"#.to_vec())
    }

    #[test]
    fn test_key_derivation_is_deterministic() {
        let a = derive_key("hunter22");
        let b = derive_key("hunter22");
        let c = derive_key("hunter23");

        assert_eq!(a.as_bytes(), b.as_bytes());
        assert_ne!(a.as_bytes(), c.as_bytes());
    }

    #[test]
    fn test_lock_unlock() {
        let token = lock(&bundle(), "open sesame").unwrap();
        assert_eq!(unlock(&token, "open sesame").unwrap(), bundle());
    }

    #[test]
    fn test_token_is_single_ascii_line() {
        let token = lock(&bundle(), "open sesame").unwrap();
        assert!(token.iter().all(|b| b.is_ascii_graphic()));
    }

    #[test]
    fn test_trailing_newline_tolerated() {
        let mut token = lock(&bundle(), "open sesame").unwrap();
        token.push(b'\n');
        assert!(unlock(&token, "open sesame").is_ok());
    }

    #[test]
    fn test_wrong_password() {
        let token = lock(&bundle(), "open sesame").unwrap();
        assert!(matches!(
            unlock(&token, "open sesame!"),
            Err(VaultError::Authentication)
        ));
    }

    #[test]
    fn test_tampered_token() {
        let token = lock(&bundle(), "open sesame").unwrap();
        let mut raw = BASE64_URL.decode(&token).unwrap();
        let last = raw.len() - 1;
        raw[last] ^= 0x01;
        let tampered = BASE64_URL.encode(raw).into_bytes();

        assert!(matches!(
            unlock(&tampered, "open sesame"),
            Err(VaultError::Authentication)
        ));
    }

    #[test]
    fn test_malformed_tokens() {
        for token in [&b""[..], b"not base64 !!", b"AQID"] {
            assert!(
                matches!(unlock(token, "open sesame"), Err(VaultError::Authentication)),
                "token {:?}",
                token
            );
        }
    }

    #[test]
    fn test_unknown_version() {
        let token = lock(&bundle(), "open sesame").unwrap();
        let mut raw = BASE64_URL.decode(&token).unwrap();
        raw[0] = 0x80;
        let foreign = BASE64_URL.encode(raw).into_bytes();

        assert!(matches!(
            unlock(&foreign, "open sesame"),
            Err(VaultError::UnsupportedFormat(0x80))
        ));
    }

    #[test]
    fn test_short_password_rejected() {
        assert!(matches!(
            lock(&bundle(), "abc"),
            Err(VaultError::Validation(_))
        ));
    }
}
