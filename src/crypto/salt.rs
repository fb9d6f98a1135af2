use getrandom::fill;

use crate::error::{Error, Result};

/// Symbols a salt byte can take.
pub const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Generate an alphanumeric salt of `len` bytes.
///
/// Every random byte is mapped to `ALPHABET[byte % 62]`. The mapping favours the
/// first `256 % 62 = 8` symbols slightly; existing records were produced this way.
pub fn generate_salt(len: usize) -> Result<Vec<u8>> {
    let mut salt = vec![0u8; len];
    fill(&mut salt).map_err(Error::Entropy)?;

    for byte in salt.iter_mut() {
        *byte = ALPHABET[usize::from(*byte) % ALPHABET.len()];
    }

    Ok(salt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salt_has_requested_length() {
        assert_eq!(generate_salt(16).unwrap().len(), 16);
        assert_eq!(generate_salt(1).unwrap().len(), 1);
        assert_eq!(generate_salt(256).unwrap().len(), 256);
    }

    #[test]
    fn salt_is_alphanumeric() {
        let salt = generate_salt(256).unwrap();
        assert!(salt.iter().all(|b| b.is_ascii_alphanumeric()));
    }

    #[test]
    fn salts_differ_between_calls() {
        let a = generate_salt(16).unwrap();
        let b = generate_salt(16).unwrap();
        assert_ne!(a, b);
    }
}
