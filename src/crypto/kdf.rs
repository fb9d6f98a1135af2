use std::fmt;
use std::str::FromStr;

use pbkdf2::pbkdf2_hmac;
use serde::{Deserialize, Serialize};
use sha2::{Sha256, Sha384, Sha512};
use zeroize::Zeroizing;

use super::{DEFAULT_ITERATIONS, DEFAULT_KEY_LEN, DEFAULT_SALT_LEN, MAX_SALT_LEN};
use crate::error::{Error, Result};

/// Hash function used as the PBKDF2 pseudo-random function (through HMAC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashPrimitive {
    Sha256,
    Sha384,
    #[default]
    Sha512,
}

impl HashPrimitive {
    pub fn name(&self) -> &'static str {
        match self {
            HashPrimitive::Sha256 => "sha256",
            HashPrimitive::Sha384 => "sha384",
            HashPrimitive::Sha512 => "sha512",
        }
    }
}

impl fmt::Display for HashPrimitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashPrimitive {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(HashPrimitive::Sha256),
            "sha384" | "sha-384" => Ok(HashPrimitive::Sha384),
            "sha512" | "sha-512" => Ok(HashPrimitive::Sha512),
            _ => Err(Error::InvalidOptions("unknown hash primitive")),
        }
    }
}

/// Cost and layout parameters of a password record.
///
/// The same options must be used to encode and to verify a record: the salt and
/// key lengths fix the record layout, the iteration count and hash fix the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawOptions")]
pub struct Options {
    salt_len: usize,
    iterations: u32,
    key_len: usize,
    hash: HashPrimitive,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            salt_len: DEFAULT_SALT_LEN,
            iterations: DEFAULT_ITERATIONS,
            key_len: DEFAULT_KEY_LEN,
            hash: HashPrimitive::Sha512,
        }
    }
}

impl Options {
    pub fn new(salt_len: usize, iterations: u32, key_len: usize, hash: HashPrimitive) -> Result<Self> {
        let options = Self {
            salt_len,
            iterations,
            key_len,
            hash,
        };
        options.validate()?;
        Ok(options)
    }

    pub fn salt_len(&self) -> usize {
        self.salt_len
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn key_len(&self) -> usize {
        self.key_len
    }

    pub fn hash(&self) -> HashPrimitive {
        self.hash
    }

    pub fn validate(&self) -> Result<()> {
        if self.salt_len < 1 {
            return Err(Error::InvalidOptions("salt length must be >= 1"));
        }
        if self.salt_len > MAX_SALT_LEN {
            return Err(Error::InvalidOptions("salt length must be <= 256"));
        }
        if self.iterations < 1 {
            return Err(Error::InvalidOptions("iterations must be >= 1"));
        }
        if self.key_len < 1 {
            return Err(Error::InvalidOptions("key length must be >= 1"));
        }
        Ok(())
    }
}

// Deserialization goes through the validating constructor; missing fields take defaults.
#[derive(Deserialize)]
#[serde(default)]
struct RawOptions {
    salt_len: usize,
    iterations: u32,
    key_len: usize,
    hash: HashPrimitive,
}

impl Default for RawOptions {
    fn default() -> Self {
        let d = Options::default();
        Self {
            salt_len: d.salt_len,
            iterations: d.iterations,
            key_len: d.key_len,
            hash: d.hash,
        }
    }
}

impl TryFrom<RawOptions> for Options {
    type Error = Error;

    fn try_from(raw: RawOptions) -> Result<Self> {
        Options::new(raw.salt_len, raw.iterations, raw.key_len, raw.hash)
    }
}

/// Derive `options.key_len()` bytes from a password and salt with PBKDF2-HMAC.
///
/// Always performs the full iteration count; the result only depends on the inputs.
pub fn derive_key(password: &[u8], salt: &[u8], options: &Options) -> Zeroizing<Vec<u8>> {
    let mut key = Zeroizing::new(vec![0u8; options.key_len]);

    match options.hash {
        HashPrimitive::Sha256 => pbkdf2_hmac::<Sha256>(password, salt, options.iterations, &mut key),
        HashPrimitive::Sha384 => pbkdf2_hmac::<Sha384>(password, salt, options.iterations, &mut key),
        HashPrimitive::Sha512 => pbkdf2_hmac::<Sha512>(password, salt, options.iterations, &mut key),
    }

    key
}
