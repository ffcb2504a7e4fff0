//! Fixed-length password framing.
//!
//! Every password is padded with NUL bytes to [`FRAME_LEN`] before
//! encryption, so all ciphertexts have the same size.  Passwords longer
//! than the frame or ending in NUL are rejected up front, which keeps
//! stripping the filler lossless.  A NUL anywhere else is kept as is.

use zeroize::{Zeroize, Zeroizing};

use crate::errors::{KeychainError, Result};

/// Padded plaintext length in bytes.
pub const FRAME_LEN: usize = 64;

/// Filler byte appended after the password.
pub const FILLER: u8 = 0x00;

/// Pad `password` to exactly [`FRAME_LEN`] bytes.
pub fn pad(password: &str) -> Result<Zeroizing<Vec<u8>>> {
    let bytes = password.as_bytes();
    if bytes.len() > FRAME_LEN {
        return Err(KeychainError::Validation(format!(
            "password cannot exceed {FRAME_LEN} bytes (got {})",
            bytes.len()
        )));
    }
    if bytes.last() == Some(&FILLER) {
        return Err(KeychainError::Validation(
            "password cannot end with a NUL character".into(),
        ));
    }

    let mut frame = Zeroizing::new(Vec::with_capacity(FRAME_LEN));
    frame.extend_from_slice(bytes);
    frame.resize(FRAME_LEN, FILLER);
    Ok(frame)
}

/// Strip trailing filler and decode the password.
///
/// Takes ownership of the decrypted buffer; it is wiped on every path.
pub fn unpad(mut frame: Vec<u8>) -> Result<Zeroizing<String>> {
    let end = frame
        .iter()
        .rposition(|&b| b != FILLER)
        .map_or(0, |i| i + 1);
    let trimmed = frame[..end].to_vec();
    frame.zeroize();

    String::from_utf8(trimmed).map(Zeroizing::new).map_err(|e| {
        let mut bad_bytes = e.into_bytes();
        bad_bytes.zeroize();
        KeychainError::Serialization("stored password is not valid UTF-8".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_to_fixed_length() {
        assert_eq!(pad("").unwrap().len(), FRAME_LEN);
        assert_eq!(pad("secret123").unwrap().len(), FRAME_LEN);
        assert_eq!(pad(&"x".repeat(FRAME_LEN)).unwrap().len(), FRAME_LEN);
    }

    #[test]
    fn unpad_reverses_pad() {
        for pw in ["", "secret123", "ends with space ", "ü-ñ-€"] {
            let frame = pad(pw).unwrap();
            assert_eq!(unpad(frame.to_vec()).unwrap().as_str(), pw);
        }
    }

    #[test]
    fn rejects_oversized_password() {
        let long = "a".repeat(FRAME_LEN + 1);
        assert!(matches!(pad(&long), Err(KeychainError::Validation(_))));
    }

    #[test]
    fn multibyte_length_counts_bytes() {
        // 22 three-byte characters = 66 bytes.
        let pw = "€".repeat(22);
        assert!(pad(&pw).is_err());
    }

    #[test]
    fn embedded_nul_survives_unpad() {
        for pw in ["a\0b", "\0lead", "mid\0\0dle"] {
            let frame = pad(pw).unwrap();
            assert_eq!(unpad(frame.to_vec()).unwrap().as_str(), pw);
        }
    }

    #[test]
    fn rejects_trailing_nul() {
        assert!(matches!(pad("ab\0"), Err(KeychainError::Validation(_))));
        assert!(matches!(pad("\0"), Err(KeychainError::Validation(_))));
    }

    #[test]
    fn unpad_rejects_invalid_utf8() {
        assert!(matches!(
            unpad(vec![0xff, 0xfe, 0x00]),
            Err(KeychainError::Serialization(_))
        ));
    }
}
