//! Password record layout.
//!
//! A record is the concatenation of salt, format tag and derived key,
//! rendered as hex for storage:
//!
//! ```text
//! SALT (salt_len) | TAG (6, "pbkdf2") | DERIVED_KEY (key_len)
//! ```
//!
//! Salt and key lengths are not stored; they come from the [`Options`] the
//! record was produced with.

use zeroize::Zeroizing;

use crate::crypto::Options;
use crate::error::{Malformed, Result};

/// Marker identifying PBKDF2 records of this layout.
pub const FORMAT_TAG: &[u8; TAG_LEN] = b"pbkdf2";
/// Length of the format tag.
pub const TAG_LEN: usize = 6;

/// A parsed password record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    salt: Vec<u8>,
    derived_key: Zeroizing<Vec<u8>>,
}

impl Record {
    pub fn new(salt: Vec<u8>, derived_key: Zeroizing<Vec<u8>>) -> Self {
        Self { salt, derived_key }
    }

    /// Number of raw bytes in a record produced with `options`.
    pub fn encoded_len(options: &Options) -> usize {
        options.salt_len() + TAG_LEN + options.key_len()
    }

    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    pub fn tag(&self) -> &[u8] {
        FORMAT_TAG
    }

    pub fn derived_key(&self) -> &[u8] {
        &self.derived_key
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.salt.len() + TAG_LEN + self.derived_key.len());

        buf.extend_from_slice(&self.salt);
        buf.extend_from_slice(FORMAT_TAG);
        buf.extend_from_slice(&self.derived_key);

        buf
    }

    /// Lowercase hex form of the record, the form meant for storage.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Parses raw record bytes laid out according to `options`.
    ///
    /// # Errors
    ///
    /// Returns [`Malformed::InvalidLength`] if the byte count does not match the
    /// layout and [`Malformed::TagMismatch`] if the format tag is wrong.
    pub fn from_bytes(data: &[u8], options: &Options) -> Result<Self> {
        let expected = Self::encoded_len(options);
        if data.len() != expected {
            return Err(Malformed::InvalidLength {
                expected,
                actual: data.len(),
            }
            .into());
        }

        let salt_len = options.salt_len();
        let (salt, rest) = data.split_at(salt_len);
        let (tag, derived_key) = rest.split_at(TAG_LEN);

        if tag != FORMAT_TAG {
            return Err(Malformed::TagMismatch.into());
        }

        Ok(Self {
            salt: salt.to_vec(),
            derived_key: Zeroizing::new(derived_key.to_vec()),
        })
    }

    /// Decodes a hex record and parses it according to `options`.
    ///
    /// # Errors
    ///
    /// Returns [`Malformed::InvalidHex`] if `record` is not hex, otherwise the
    /// errors of [`Record::from_bytes`].
    pub fn from_hex(record: &str, options: &Options) -> Result<Self> {
        let data = Zeroizing::new(hex::decode(record).map_err(|_| Malformed::InvalidHex)?);
        Self::from_bytes(&data, options)
    }
}
