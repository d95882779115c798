// Single-byte tests used by the matcher
// Handles quantifier detection, \d \s \S classes and escaped metacharacters

use crate::error::{Error, Result};

/// `*`, `+` or `?`.
#[inline(always)]
pub fn is_quantifier(c: u8) -> bool {
    matches!(c, b'*' | b'+' | b'?')
}

/// Whitespace as in the C locale: space, `\t`, `\n`, `\v`, `\f`, `\r`.
/// Unlike `u8::is_ascii_whitespace` this includes vertical tab.
#[inline(always)]
pub fn is_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// Metacharacters that may be escaped to match themselves literally.
#[inline(always)]
fn is_escapable(c: u8) -> bool {
    matches!(
        c,
        b'+' | b'?' | b'*' | b'\\' | b'(' | b')' | b'^' | b'$' | b'.' | b'[' | b']'
    )
}

/// Match subject byte `c` against the escape `\esc`.
///
/// `Ok(false)` means the byte did not satisfy the escape. An escape letter
/// with no meaning is an error, regardless of the subject.
pub fn match_escape(esc: u8, c: u8) -> Result<bool> {
    match esc {
        b'S' => Ok(!is_space(c)),
        b's' => Ok(is_space(c)),
        b'd' => Ok(c.is_ascii_digit()),
        _ if is_escapable(esc) => Ok(c == esc),
        _ => Err(Error::InvalidMetacharacter),
    }
}
