// ABOUTME: GSM 03.38 default alphabet lookup, escape-table handling, and septet packing
// ABOUTME: Decides whether text is representable in GSM 7-bit and packs septets into octets

use bytes::{BufMut, Bytes, BytesMut};

/// Escape septet that introduces a character from the extension table
pub const ESCAPE: u8 = 0x1B;

/// Carriage return, also used as the padding septet
pub const CR: u8 = 0x0D;

/// GSM 03.38 basic character set, indexed by septet value.
/// Slot 0x1B is the escape code and never matches a character.
#[rustfmt::skip]
const BASIC_TABLE: [char; 128] = [
    '@', '£', '$', '¥', 'è', 'é', 'ù', 'ì', 'ò', 'Ç', '\n', 'Ø', 'ø', '\r', 'Å', 'å',
    'Δ', '_', 'Φ', 'Γ', 'Λ', 'Ω', 'Π', 'Ψ', 'Σ', 'Θ', 'Ξ', '\u{1B}', 'Æ', 'æ', 'ß', 'É',
    ' ', '!', '"', '#', '¤', '%', '&', '\'', '(', ')', '*', '+', ',', '-', '.', '/',
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', ':', ';', '<', '=', '>', '?',
    '¡', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O',
    'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'Ä', 'Ö', 'Ñ', 'Ü', '§',
    '¿', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o',
    'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'ä', 'ö', 'ñ', 'ü', 'à',
];

/// Septet encoding of a single character
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Septets {
    /// Character from the basic table, one septet
    Single(u8),
    /// Character from the extension table, `ESCAPE` followed by this septet
    Escaped(u8),
}

impl Septets {
    /// Number of septets this character occupies
    pub fn len(self) -> usize {
        match self {
            Septets::Single(_) => 1,
            Septets::Escaped(_) => 2,
        }
    }

    /// Append the septets for this character to `out`
    pub fn push_into(self, out: &mut Vec<u8>) {
        match self {
            Septets::Single(s) => out.push(s),
            Septets::Escaped(s) => {
                out.push(ESCAPE);
                out.push(s);
            }
        }
    }
}

fn extension_septet(c: char) -> Option<u8> {
    let septet = match c {
        '\u{0C}' => 0x0A,
        '^' => 0x14,
        '{' => 0x28,
        '}' => 0x29,
        '\\' => 0x2F,
        '[' => 0x3C,
        '~' => 0x3D,
        ']' => 0x3E,
        '|' => 0x40,
        '€' => 0x65,
        _ => return None,
    };
    Some(septet)
}

fn basic_septet(c: char) -> Option<u8> {
    match c {
        'A'..='Z' | 'a'..='z' | '0'..='9' => Some(c as u8),
        '\u{1B}' => None,
        _ => BASIC_TABLE
            .iter()
            .position(|&entry| entry == c)
            .map(|index| index as u8),
    }
}

/// Look up the GSM 7-bit representation of `c`
///
/// Returns `None` when the character exists in neither the basic table nor
/// the extension table, which means the message has to go out as UCS-2.
pub fn septets_for(c: char) -> Option<Septets> {
    if let Some(s) = basic_septet(c) {
        return Some(Septets::Single(s));
    }
    extension_septet(c).map(Septets::Escaped)
}

/// Encode `text` into unpacked septets, or `None` on the first unmappable character
pub fn encode_septets(text: &str) -> Option<Vec<u8>> {
    let mut septets = Vec::with_capacity(text.len());
    for c in text.chars() {
        septets_for(c)?.push_into(&mut septets);
    }
    Some(septets)
}

/// Apply the CR padding rule of 3GPP TS 23.038 to a septet stream
///
/// `8n-1` septets leave seven zero bits in the last octet, which a receiver
/// would read as a trailing `@`; a CR fills them. A stream of `8n` septets
/// that already ends in CR gets a second CR so the wanted one is not taken
/// for padding.
pub fn pad_septets(septets: &mut Vec<u8>) {
    match septets.len() % 8 {
        7 => septets.push(CR),
        0 if septets.last() == Some(&CR) => septets.push(CR),
        _ => {}
    }
}

/// Pack septets into octets, least significant bit first
pub fn pack(septets: &[u8]) -> Bytes {
    let mut out = BytesMut::with_capacity((septets.len() * 7).div_ceil(8));
    let mut acc: u16 = 0;
    let mut bits = 0;

    for &septet in septets {
        acc |= u16::from(septet & 0x7F) << bits;
        bits += 7;
        while bits >= 8 {
            out.put_u8(acc as u8);
            acc >>= 8;
            bits -= 8;
        }
    }

    if bits > 0 {
        out.put_u8(acc as u8);
    }

    out.freeze()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_lookup() {
        assert_eq!(septets_for('@'), Some(Septets::Single(0x00)));
        assert_eq!(septets_for('A'), Some(Septets::Single(0x41)));
        assert_eq!(septets_for('¡'), Some(Septets::Single(0x40)));
        assert_eq!(septets_for('Ω'), Some(Septets::Single(0x15)));
        assert_eq!(septets_for('à'), Some(Septets::Single(0x7F)));
        assert_eq!(septets_for('\n'), Some(Septets::Single(0x0A)));
    }

    #[test]
    fn test_extension_lookup() {
        assert_eq!(septets_for('€'), Some(Septets::Escaped(0x65)));
        assert_eq!(septets_for('{'), Some(Septets::Escaped(0x28)));
        assert_eq!(septets_for('€').unwrap().len(), 2);
    }

    #[test]
    fn test_unmappable_characters() {
        assert_eq!(septets_for('П'), None);
        assert_eq!(septets_for('😀'), None);
        assert_eq!(septets_for('\u{1B}'), None);
        assert_eq!(septets_for('`'), None);
        assert_eq!(encode_septets("Hello `world`"), None);
        assert!(encode_septets("Hello [world]").is_some());
    }

    #[test]
    fn test_encode_septets_escapes() {
        assert_eq!(encode_septets("a€"), Some(vec![0x61, ESCAPE, 0x65]));
        assert_eq!(encode_septets("aП"), None);
    }

    #[test]
    fn test_pack_seven_characters_with_padding() {
        let mut septets = encode_septets("1234567").unwrap();
        pad_septets(&mut septets);
        assert_eq!(
            pack(&septets).as_ref(),
            &[0x31, 0xD9, 0x8C, 0x56, 0xB3, 0xDD, 0x1A]
        );
    }

    #[test]
    fn test_pack_eight_characters_no_padding() {
        let mut septets = encode_septets("12345678").unwrap();
        pad_septets(&mut septets);
        assert_eq!(septets.len(), 8);
        assert_eq!(pack(&septets).len(), 7);
    }

    #[test]
    fn test_trailing_cr_on_octet_boundary_gets_extra_cr() {
        let mut septets = encode_septets("1234567\r").unwrap();
        pad_septets(&mut septets);
        assert_eq!(septets.len(), 9);

        let packed = pack(&septets);
        assert_eq!(packed.len(), 8);
        assert_eq!(packed[7], CR);
    }

    #[test]
    fn test_pack_empty() {
        assert!(pack(&[]).is_empty());
    }
}
