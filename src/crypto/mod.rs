//! Cryptographic primitives for password records.
//!
//! Provides salt generation and PBKDF2 key derivation.

pub mod kdf;
pub mod salt;

pub use kdf::{HashPrimitive, Options, derive_key};
pub use salt::generate_salt;

/// Default salt length (16 bytes).
pub const DEFAULT_SALT_LEN: usize = 16;
/// Largest salt length; each salt byte is drawn from one random byte.
pub const MAX_SALT_LEN: usize = 256;
/// Default PBKDF2 iteration count.
pub const DEFAULT_ITERATIONS: u32 = 32;
/// Default derived key length (32 bytes).
pub const DEFAULT_KEY_LEN: usize = 32;
