// File:    cipher.rs
// Author:  apezoo
// Date:    2025-08-25
//
// Description: Pure, stateless implementations of the Atbash, Caesar, and Vigenère substitution ciphers.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! This module contains the cipher transforms.
//!
//! Every function here is a pure mapping from input text to output text:
//! identical input always produces identical output, and nothing is stored.
//! Only ASCII letters are transformed; digits, punctuation, whitespace, and
//! any other character pass through unchanged at their original position.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Whether a transform encodes plaintext or decodes ciphertext.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Apply the cipher forward.
    Encode,
    /// Invert the cipher.
    Decode,
}

/// A cipher variant together with its parameters.
///
/// Dispatch happens in [`transform`], one case per variant, so a caller can
/// carry a cipher selection around as plain data.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum Cipher {
    /// Keyless mirror substitution (A↔Z, B↔Y, ...). Self-inverse.
    Atbash,
    /// Fixed-shift substitution. [`transform`] requires the shift to be in
    /// `[1, 25]`; [`caesar`] itself accepts any integer.
    Caesar {
        /// Positions each letter moves forward when encoding.
        shift: i32,
    },
    /// Polyalphabetic substitution keyed by a repeating alphabetic keyword.
    Vigenere {
        /// The keyword; letters only, case-insensitive.
        keyword: String,
    },
}

/// Errors raised by cipher parameter validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CipherError {
    /// The Vigenère keyword was empty or contained a non-letter.
    #[error("Keyword must contain only letters")]
    InvalidKeyword,
    /// The Caesar shift was outside `[1, 25]`.
    #[error("Shift must be between 1 and 25 (got {0})")]
    InvalidShift(i32),
}

/// Applies the Atbash mirror substitution.
///
/// Each letter is reflected within its own case's alphabet, so `A` becomes
/// `Z`, `b` becomes `y`, and so on. Applying the transform twice returns the
/// original text.
#[must_use]
pub fn atbash(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'A'..='Z' => (b'Z' - (c as u8 - b'A')) as char,
            'a'..='z' => (b'z' - (c as u8 - b'a')) as char,
            _ => c,
        })
        .collect()
}

/// Applies a Caesar shift.
///
/// Any integer shift is accepted and reduced modulo 26; decoding negates the
/// shift, so `caesar(caesar(t, s, Encode), s, Decode) == t`. Range
/// enforcement for user-supplied shifts belongs to [`transform`].
#[must_use]
pub fn caesar(text: &str, shift: i32, direction: Direction) -> String {
    let signed = match direction {
        Direction::Encode => shift,
        Direction::Decode => -shift,
    };
    let offset = signed.rem_euclid(26) as u8;
    text.chars()
        .map(|c| match c {
            'A'..='Z' => rotate(c, b'A', offset),
            'a'..='z' => rotate(c, b'a', offset),
            _ => c,
        })
        .collect()
}

/// Applies the Vigenère polyalphabetic substitution.
///
/// The keyword is case-normalized before use. A running keyword index
/// advances only when a letter of the input is consumed; non-letters are
/// copied through without consuming a keyword position. That rule determines
/// cipher alignment for mixed-content text and is what keeps encode and
/// decode symmetric.
///
/// # Errors
///
/// Returns [`CipherError::InvalidKeyword`] if the keyword is empty or
/// contains a non-alphabetic character.
pub fn vigenere(text: &str, keyword: &str, direction: Direction) -> Result<String, CipherError> {
    if keyword.is_empty() || !keyword.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(CipherError::InvalidKeyword);
    }
    let key: Vec<i32> = keyword
        .bytes()
        .map(|b| i32::from(b.to_ascii_uppercase() - b'A'))
        .collect();

    let mut index = 0usize;
    let out = text
        .chars()
        .map(|c| {
            let base = match c {
                'A'..='Z' => b'A',
                'a'..='z' => b'a',
                _ => return c,
            };
            let shift = key[index % key.len()];
            index += 1;
            let signed = match direction {
                Direction::Encode => shift,
                Direction::Decode => -shift,
            };
            rotate(c, base, signed.rem_euclid(26) as u8)
        })
        .collect();
    Ok(out)
}

/// Dispatches a transform request to the selected cipher.
///
/// Parameter validation happens here, exactly once, before any text is
/// transformed: the Caesar shift must lie in `[1, 25]` and the Vigenère
/// keyword must be non-empty and purely alphabetic.
///
/// # Errors
///
/// Returns [`CipherError::InvalidShift`] or [`CipherError::InvalidKeyword`]
/// when the parameters are rejected. No partial output is produced on
/// failure.
pub fn transform(cipher: &Cipher, text: &str, direction: Direction) -> Result<String, CipherError> {
    match cipher {
        Cipher::Atbash => Ok(atbash(text)),
        Cipher::Caesar { shift } => {
            if !(1..=25).contains(shift) {
                return Err(CipherError::InvalidShift(*shift));
            }
            Ok(caesar(text, *shift, direction))
        }
        Cipher::Vigenere { keyword } => vigenere(text, keyword, direction),
    }
}

/// Rotates an ASCII letter forward by `offset` positions within its alphabet.
fn rotate(c: char, base: u8, offset: u8) -> char {
    (base + (c as u8 - base + offset) % 26) as char
}
