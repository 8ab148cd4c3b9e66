// ABOUTME: Concatenated-SMS user data header and the reference-ID cache backing it
// ABOUTME: Renders the 6-octet 8-bit-reference UDH and keeps reference IDs stable per message content

use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

/// Length of the user data header that follows the UDHL octet
const UDH_LENGTH: u8 = 0x05;
/// Information element: concatenated short messages, 8-bit reference
const IEI_CONCAT_8BIT: u8 = 0x00;
/// Length of the concatenation information element data
const IE_DATA_LENGTH: u8 = 0x03;

/// Concatenation header carried by every segment of a multi-part message
///
/// On the wire this is `05 00 03 <ref> <total> <index>`, and carriers take it
/// as 12 lower-case hex digits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConcatHeader {
    /// Reference shared by all segments of one logical message
    pub reference: u8,
    /// Total number of segments
    pub total: u8,
    /// 1-based index of this segment
    pub index: u8,
}

impl ConcatHeader {
    pub fn new(reference: u8, total: u8, index: u8) -> Self {
        Self {
            reference,
            total,
            index,
        }
    }

    /// Header octets as sent in front of the segment payload
    pub fn to_bytes(&self) -> [u8; 6] {
        [
            UDH_LENGTH,
            IEI_CONCAT_8BIT,
            IE_DATA_LENGTH,
            self.reference,
            self.total,
            self.index,
        ]
    }
}

impl fmt::Display for ConcatHeader {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for octet in self.to_bytes() {
            write!(f, "{:02x}", octet)?;
        }
        Ok(())
    }
}

/// Maps a content hash to the reference ID handed out for it
///
/// IDs start at 1 and grow with every unseen hash. The field is a single
/// octet, so after 255 the counter wraps back to 1 and the cache starts over.
#[derive(Debug, Default)]
pub struct ReferenceCache {
    last: u8,
    references: HashMap<u32, u8>,
}

impl ReferenceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the reference ID for `hash`, assigning the next one if unseen
    pub fn reference_for(&mut self, hash: u32) -> u8 {
        if let Some(&reference) = self.references.get(&hash) {
            return reference;
        }

        if self.last == u8::MAX {
            warn!(
                "UDH reference IDs exhausted, dropping {} cached references",
                self.references.len()
            );
            self.references.clear();
            self.last = 0;
        }

        self.last += 1;
        self.references.insert(hash, self.last);
        debug!("Assigned UDH reference {} to content hash {:08x}", self.last, hash);

        self.last
    }

    /// Number of content hashes currently remembered
    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }
}
