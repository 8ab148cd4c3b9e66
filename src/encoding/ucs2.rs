// ABOUTME: UCS-2 fallback encoding producing big-endian UTF-16 code units
// ABOUTME: Used for any message holding a character outside the GSM 7-bit alphabet

use bytes::{BufMut, Bytes, BytesMut};

/// Number of UTF-16 code units needed for `text`
pub fn code_units(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}

/// Returns true for the first half of a surrogate pair
pub fn is_high_surrogate(unit: u16) -> bool {
    (0xD800..=0xDBFF).contains(&unit)
}

/// Render code units as big-endian octets
pub fn encode_units(units: &[u16]) -> Bytes {
    let mut out = BytesMut::with_capacity(units.len() * 2);
    for &unit in units {
        out.put_u16(unit);
    }
    out.freeze()
}
