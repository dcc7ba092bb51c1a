//! # Payload encryption
//!
//! Password based transform applied to a payload before it is hidden.
//! The key is derived with argon2id, the data is sealed with XChaCha20Poly1305.
//!
//! The sealed layout is `ciphertext || nonce (24 bytes) || salt (32 bytes)`.

use argon2::{Argon2, ParamsBuilder};
use chacha20poly1305::aead::Aead;
use chacha20poly1305::{Key, KeyInit, XChaCha20Poly1305, XNonce};
use log::debug;
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroize;

pub mod error;

pub use crate::error::CipherError;

pub const NONCE_LEN: usize = 24;
pub const SALT_LEN: usize = 32;
const KEY_LEN: usize = 32;

/// Bytes added on top of the plain data by [`encrypt_data`]
pub const OVERHEAD: usize = NONCE_LEN + SALT_LEN + 16;

pub type Result<T> = std::result::Result<T, CipherError>;

/// decrypt data with password, it uses argon2id for key derivation and XChaCha20Poly1305 for decryption
pub fn decrypt_data(password: &str, data: &[u8]) -> Result<Vec<u8>> {
    if data.len() < SALT_LEN + NONCE_LEN {
        return Err(CipherError::TooShort(data.len(), SALT_LEN + NONCE_LEN));
    }
    let (sealed, trailer) = data.split_at(data.len() - SALT_LEN - NONCE_LEN);
    let (nonce, salt) = trailer.split_at(NONCE_LEN);

    let mut key = derive_key(password.as_bytes(), salt)?;
    let decryptor = XChaCha20Poly1305::new(Key::from_slice(&key));
    key.zeroize();

    let plain = decryptor
        .decrypt(XNonce::from_slice(nonce), sealed)
        .map_err(CipherError::Decryption)?;
    debug!("decrypted {} bytes into {} bytes", data.len(), plain.len());

    Ok(plain)
}

/// encrypt data with password, it uses argon2id for key derivation and XChaCha20Poly1305 for encryption
pub fn encrypt_data(password: &str, data: &[u8]) -> Result<Vec<u8>> {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    let mut key = derive_key(password.as_bytes(), &salt)?;

    let mut nonce = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce);

    let encryptor = XChaCha20Poly1305::new(Key::from_slice(&key));
    key.zeroize();
    let mut sealed = encryptor
        .encrypt(XNonce::from_slice(&nonce), data)
        .map_err(CipherError::Encryption)?;
    sealed.extend_from_slice(&nonce);
    sealed.extend_from_slice(&salt);

    nonce.zeroize();
    salt.zeroize();
    debug!("encrypted {} bytes into {} bytes", data.len(), sealed.len());

    Ok(sealed)
}

fn default_secure_argon<'key>() -> Result<Argon2<'key>> {
    let params = ParamsBuilder::default()
        .t_cost(10)
        .output_len(KEY_LEN)
        .build()
        .map_err(CipherError::KeyDerivationParams)?;

    Ok(Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        params,
    ))
}

fn derive_key(password: &[u8], salt: &[u8]) -> Result<[u8; KEY_LEN]> {
    let mut output_key_material = [0u8; KEY_LEN];
    default_secure_argon()?
        .hash_password_into(password, salt, &mut output_key_material)
        .map_err(CipherError::KeyDerivation)?;

    Ok(output_key_material)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOREM: &[u8] = b"lorem ipsum dolor sit amet, consectetur adipiscing elit.";

    #[test]
    fn should_derive_the_same_key_for_the_same_salt() {
        let salt = rand::random::<[u8; SALT_LEN]>();

        let first = derive_key(b"hunter42", &salt).unwrap();
        let second = derive_key(b"hunter42", &salt).unwrap();

        assert_ne!(first, [0u8; KEY_LEN]);
        assert_eq!(first, second);
    }

    #[test]
    fn should_round_trip_with_the_right_password() {
        let password = "resistance is futile";

        let sealed = encrypt_data(password, LOREM).unwrap();
        let plain = decrypt_data(password, &sealed).unwrap();

        assert_ne!(LOREM, sealed.as_slice());
        assert_eq!(sealed.len(), LOREM.len() + OVERHEAD);
        assert_eq!(LOREM, plain.as_slice());
    }

    #[test]
    fn should_fail_with_a_wrong_password() {
        let sealed = encrypt_data("right", LOREM).unwrap();

        let result = decrypt_data("wrong", &sealed);

        assert!(matches!(result, Err(CipherError::Decryption(_))));
    }

    #[test]
    fn should_reject_data_shorter_than_nonce_and_salt() {
        let result = decrypt_data("any", &[0u8; 10]);

        assert!(matches!(result, Err(CipherError::TooShort(10, 56))));
    }
}
