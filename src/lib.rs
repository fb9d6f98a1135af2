//! Salted PBKDF2 password records.
//!
//! [`encode_password`] turns a plaintext password into a hex record holding a
//! fresh salt, the format tag and the derived key. [`verify_password`] checks a
//! plaintext against such a record and tells a malformed record apart from a
//! wrong password.
//!
//! ```
//! let record = pwcodec::encode_password("hunter2")?;
//! assert!(pwcodec::verify_password("hunter2", &record).is_ok());
//! assert!(pwcodec::verify_password("hunter3", &record).unwrap_err().is_mismatch());
//! # Ok::<(), pwcodec::Error>(())
//! ```

mod crypto;
mod error;
pub mod format;

pub use crate::crypto::{
    DEFAULT_ITERATIONS, DEFAULT_KEY_LEN, DEFAULT_SALT_LEN, HashPrimitive, MAX_SALT_LEN, Options,
    derive_key, generate_salt,
};
pub use crate::error::{Error, Malformed, Result};
pub use crate::format::{FORMAT_TAG, Record, TAG_LEN};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

/// Salt and derived key produced for one password.
#[derive(Debug, Clone)]
pub struct Encoded {
    salt: Vec<u8>,
    derived_key: Zeroizing<Vec<u8>>,
}

impl Encoded {
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    pub fn derived_key(&self) -> &[u8] {
        &self.derived_key
    }

    pub fn into_record(self) -> Record {
        Record::new(self.salt, self.derived_key)
    }
}

/// Generates a fresh salt and derives the key for `password`.
///
/// # Errors
///
/// Fails only if the OS random generator is unavailable.
pub fn encode(password: &[u8], options: &Options) -> Result<Encoded> {
    let salt = generate_salt(options.salt_len())?;
    let derived_key = derive_key(password, &salt, options);
    Ok(Encoded { salt, derived_key })
}

/// Encodes `password` into a hex record laid out according to `options`.
pub fn encode_to_record(password: &str, options: &Options) -> Result<String> {
    Ok(encode(password.as_bytes(), options)?.into_record().to_hex())
}

/// Encodes `password` into a hex record with the default options.
pub fn encode_password(password: &str) -> Result<String> {
    encode_to_record(password, &Options::default())
}

/// Re-derives the key for `password` and `salt` and compares it with
/// `derived_key` in constant time.
///
/// A `derived_key` whose length differs from `options.key_len()` never matches.
pub fn verify(password: &[u8], salt: &[u8], derived_key: &[u8], options: &Options) -> bool {
    let candidate = derive_key(password, salt, options);
    candidate.as_slice().ct_eq(derived_key).into()
}

/// Checks `password` against a hex record laid out according to `options`.
///
/// # Errors
///
/// - [`Error::MalformedRecord`] if the record is not hex, has the wrong length
///   or carries the wrong format tag.
/// - [`Error::PasswordMismatch`] if the record is well formed but the password
///   does not match.
pub fn verify_record(password: &str, record: &str, options: &Options) -> Result<()> {
    let record = Record::from_hex(record, options)?;

    if !verify(
        password.as_bytes(),
        record.salt(),
        record.derived_key(),
        options,
    ) {
        return Err(Error::PasswordMismatch);
    }

    Ok(())
}

/// Checks `password` against a hex record produced with the default options.
pub fn verify_password(password: &str, record: &str) -> Result<()> {
    verify_record(password, record, &Options::default())
}
