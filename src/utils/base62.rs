//! Base62 encoding of numeric link ids into short codes.
//!
//! The alphabet is `0-9a-zA-Z` in that fixed order, assigning digit values
//! 0-61. Note: this ordering keeps visually similar characters (0/O, 1/l/I);
//! the ordering is the wire contract and must not be changed to "fix" that.

/// The 62-character digit alphabet, index = digit value.
const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

const BASE: u64 = 62;

/// Errors produced when decoding a short code.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Base62Error {
    #[error("Short code cannot be empty")]
    Empty,

    #[error("Invalid character in short code: {0}")]
    InvalidCharacter(char),

    #[error("Short code value exceeds the representable range")]
    Overflow,
}

/// Encodes a numeric id as a base62 string.
///
/// Repeated division by 62, collecting remainders least-significant-first,
/// then reversing. `encode(0)` yields `"0"`, never an empty string.
pub fn encode(id: u64) -> String {
    if id == 0 {
        return (ALPHABET[0] as char).to_string();
    }

    let mut buf = Vec::new();
    let mut num = id;

    while num > 0 {
        buf.push(ALPHABET[(num % BASE) as usize]);
        num /= BASE;
    }

    buf.reverse();
    // Alphabet bytes are ASCII, so the buffer is valid UTF-8.
    String::from_utf8(buf).expect("base62 alphabet is ASCII")
}

/// Decodes a base62 string back to its numeric id.
///
/// Left fold: `acc = acc * 62 + digit`. Fails on empty input, any character
/// outside the alphabet, or values that overflow `u64`.
pub fn decode(code: &str) -> Result<u64, Base62Error> {
    if code.is_empty() {
        return Err(Base62Error::Empty);
    }

    let mut id: u64 = 0;

    for c in code.chars() {
        let digit = digit_value(c).ok_or(Base62Error::InvalidCharacter(c))?;
        id = id
            .checked_mul(BASE)
            .and_then(|v| v.checked_add(digit))
            .ok_or(Base62Error::Overflow)?;
    }

    Ok(id)
}

/// Returns true if `code` is non-empty and every character is in the alphabet.
///
/// Used for fast pre-validation of custom aliases without raising an error.
pub fn is_valid(code: &str) -> bool {
    !code.is_empty() && code.chars().all(|c| digit_value(c).is_some())
}

fn digit_value(c: char) -> Option<u64> {
    match c {
        '0'..='9' => Some(c as u64 - '0' as u64),
        'a'..='z' => Some(c as u64 - 'a' as u64 + 10),
        'A'..='Z' => Some(c as u64 - 'A' as u64 + 36),
        _ => None,
    }
}
