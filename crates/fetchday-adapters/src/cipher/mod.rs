//! Data cipher adapters.

mod aes;

pub use aes::{AesGcmCipher, KEY_LEN, NONCE_LEN};
