//! Error types for encoding and verifying password records.

use std::fmt;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Why a stored record could not be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Malformed {
    /// The record is not valid hexadecimal.
    InvalidHex,
    /// The decoded record has the wrong number of bytes for the layout.
    InvalidLength { expected: usize, actual: usize },
    /// The format tag between salt and key is not the expected one.
    TagMismatch,
}

impl fmt::Display for Malformed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Malformed::InvalidHex => write!(f, "record is not valid hex"),
            Malformed::InvalidLength { expected, actual } => {
                write!(f, "expected {expected} bytes, got {actual}")
            }
            Malformed::TagMismatch => write!(f, "unknown format tag"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    /// The stored text is not a record of this scheme. Never caused by a wrong password.
    #[error("malformed password record: {0}")]
    MalformedRecord(Malformed),

    /// The record parsed but the password does not match it.
    #[error("wrong password")]
    PasswordMismatch,

    #[error("invalid options: {0}")]
    InvalidOptions(&'static str),

    #[error("OS random generator unavailable: {0}")]
    Entropy(getrandom::Error),
}

impl Error {
    pub fn is_malformed(&self) -> bool {
        matches!(self, Error::MalformedRecord(_))
    }

    pub fn is_mismatch(&self) -> bool {
        matches!(self, Error::PasswordMismatch)
    }
}

impl From<Malformed> for Error {
    fn from(reason: Malformed) -> Self {
        Error::MalformedRecord(reason)
    }
}
