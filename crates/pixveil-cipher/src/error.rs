pub use argon2::Error as Argon2Error;
pub use chacha20poly1305::Error as Chacha20Poly1305Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CipherError {
    #[error("Key derivation error")]
    KeyDerivation(Argon2Error),

    #[error("Key derivation parameter error")]
    KeyDerivationParams(Argon2Error),

    #[error("Decryption error")]
    Decryption(Chacha20Poly1305Error),

    #[error("Encryption error")]
    Encryption(Chacha20Poly1305Error),

    /// The data cannot even hold nonce and salt
    #[error("Encrypted data is too short: {0} bytes, at least {1} bytes expected")]
    TooShort(usize, usize),
}
