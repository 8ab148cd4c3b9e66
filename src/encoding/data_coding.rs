// ABOUTME: Strongly-typed SMS data coding tag selected by the text encoder for each message
// ABOUTME: Maps the two gateway encodings to SMPP wire bytes, carrier names and segment limits

use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::fmt;

/// Plain (GSM 7-bit) single-segment limit in septets
pub const PLAIN_SINGLE_LENGTH: usize = 160;
/// Plain per-segment limit in septets once a message is split
pub const PLAIN_SEGMENT_LENGTH: usize = 153;
/// Unicode single-segment limit in UTF-16 code units
pub const UNICODE_SINGLE_LENGTH: usize = 70;
/// Unicode per-segment limit in UTF-16 code units once a message is split
pub const UNICODE_SEGMENT_LENGTH: usize = 67;
/// Hard ceiling on the number of segments of one logical message
pub const MAX_SEGMENTS: usize = 9;

/// Encoding chosen for a whole message
///
/// Selection is all-or-nothing: a single character outside the GSM 7-bit
/// alphabet moves the entire message to `Unicode`.
#[derive(TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum DataCoding {
    /// GSM 7-bit default alphabet (SMSC default, `0x00`)
    #[default]
    Plain = 0x00,
    /// UCS-2 / UTF-16 code units (`0x08`)
    Unicode = 0x08,
}

impl DataCoding {
    /// Returns the raw u8 value for the SMPP data_coding field
    pub fn to_byte(self) -> u8 {
        self.into()
    }

    /// Name used by the carrier API for this encoding
    pub fn as_str(&self) -> &'static str {
        match self {
            DataCoding::Plain => "plain",
            DataCoding::Unicode => "unicode",
        }
    }

    /// Length at or below which a message travels as a single segment
    pub fn max_single_sms_length(&self) -> usize {
        match self {
            DataCoding::Plain => PLAIN_SINGLE_LENGTH,
            DataCoding::Unicode => UNICODE_SINGLE_LENGTH,
        }
    }

    /// Per-segment budget once the UDH takes its share of the payload
    pub fn max_segment_length(&self) -> usize {
        match self {
            DataCoding::Plain => PLAIN_SEGMENT_LENGTH,
            DataCoding::Unicode => UNICODE_SEGMENT_LENGTH,
        }
    }
}

impl fmt::Display for DataCoding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_bytes() {
        assert_eq!(DataCoding::Plain.to_byte(), 0x00);
        assert_eq!(DataCoding::Unicode.to_byte(), 0x08);
        assert_eq!(DataCoding::try_from(0x08u8).unwrap(), DataCoding::Unicode);
        assert!(DataCoding::try_from(0x04u8).is_err());
    }

    #[test]
    fn test_carrier_names() {
        assert_eq!(DataCoding::Plain.as_str(), "plain");
        assert_eq!(DataCoding::Unicode.to_string(), "unicode");
        assert_eq!(DataCoding::default(), DataCoding::Plain);
    }

    #[test]
    fn test_limits() {
        assert_eq!(DataCoding::Plain.max_single_sms_length(), 160);
        assert_eq!(DataCoding::Plain.max_segment_length(), 153);
        assert_eq!(DataCoding::Unicode.max_single_sms_length(), 70);
        assert_eq!(DataCoding::Unicode.max_segment_length(), 67);
    }
}
