// ABOUTME: Text encoder that picks GSM 7-bit or UCS-2, splits messages into segments, and builds UDHs
// ABOUTME: Holds the reference-ID cache behind a mutex so concurrent submissions share it safely

use crate::encoding::data_coding::{DataCoding, MAX_SEGMENTS};
use crate::encoding::gsm7::{self, ESCAPE};
use crate::encoding::ucs2;
use crate::encoding::udh::{ConcatHeader, ReferenceCache};
use std::sync::{Mutex, PoisonError};

/// A message split by encoding and carrier length limits
///
/// `messages[i]` is part `i + 1` of the logical message; the order is never
/// changed downstream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Encoded {
    pub encoding: DataCoding,
    pub messages: Vec<String>,
}

impl Encoded {
    /// Number of segments
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Returns true when the segments need a concatenation header
    pub fn is_multipart(&self) -> bool {
        self.messages.len() > 1
    }
}

/// Text encoding and concatenation-header operations used by the gateway
///
/// Implementations must be shareable across tasks: every submission encodes
/// on its own task and `generate_udh` mutates shared reference state.
pub trait UdhEncoder: Send + Sync {
    /// Encode `text` to packed octets, split and hex-rendered per segment
    fn encode(&self, text: &str) -> Encoded;

    /// Split `text` into plain-text segments under carrier length limits
    fn split_text_message(&self, text: &str) -> Encoded;

    /// Build the concatenation header for segment `part` of `parts`
    ///
    /// The reference ID is looked up by `content_hash`, so every call for the
    /// same content renders the same reference.
    fn generate_udh(&self, part: u8, parts: u8, content_hash: u32) -> String;
}

/// Default encoder with an in-memory reference-ID cache
#[derive(Debug, Default)]
pub struct TextEncoder {
    references: Mutex<ReferenceCache>,
}

impl TextEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of content hashes that currently own a reference ID
    pub fn cached_references(&self) -> usize {
        self.references
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl UdhEncoder for TextEncoder {
    fn encode(&self, text: &str) -> Encoded {
        match gsm7::encode_septets(text) {
            Some(septets) => Encoded {
                encoding: DataCoding::Plain,
                messages: plain_binary_parts(&septets),
            },
            None => Encoded {
                encoding: DataCoding::Unicode,
                messages: unicode_binary_parts(text),
            },
        }
    }

    fn split_text_message(&self, text: &str) -> Encoded {
        let mut result = match split_plain(text) {
            Some(messages) => Encoded {
                encoding: DataCoding::Plain,
                messages,
            },
            None => Encoded {
                encoding: DataCoding::Unicode,
                messages: split_unicode(text),
            },
        };

        // Longer messages are cut, not rejected
        result.messages.truncate(MAX_SEGMENTS);
        result
    }

    fn generate_udh(&self, part: u8, parts: u8, content_hash: u32) -> String {
        let reference = self
            .references
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .reference_for(content_hash);

        ConcatHeader::new(reference, parts, part).to_string()
    }
}

fn plain_binary_parts(septets: &[u8]) -> Vec<String> {
    let single = DataCoding::Plain.max_single_sms_length();
    let segment = DataCoding::Plain.max_segment_length();

    let mut padded = septets.to_vec();
    gsm7::pad_septets(&mut padded);
    // the limit holds for the padded stream, so a trailing CR can push it over
    if padded.len() <= single {
        return vec![hex::encode(gsm7::pack(&padded))];
    }

    let mut parts = Vec::new();
    let mut start = 0;
    while start < septets.len() && parts.len() < MAX_SEGMENTS {
        let mut end = (start + segment).min(septets.len());
        // never leave an escape septet without its character
        if end < septets.len() && septets[end - 1] == ESCAPE {
            end -= 1;
        }
        let mut chunk = septets[start..end].to_vec();
        gsm7::pad_septets(&mut chunk);
        parts.push(hex::encode(gsm7::pack(&chunk)));
        start = end;
    }
    parts
}

fn unicode_binary_parts(text: &str) -> Vec<String> {
    let single = DataCoding::Unicode.max_single_sms_length();
    let segment = DataCoding::Unicode.max_segment_length();

    let units: Vec<u16> = text.encode_utf16().collect();
    if units.len() <= single {
        return vec![hex::encode(ucs2::encode_units(&units))];
    }

    let mut parts = Vec::new();
    let mut start = 0;
    while start < units.len() && parts.len() < MAX_SEGMENTS {
        let mut end = (start + segment).min(units.len());
        if end < units.len() && ucs2::is_high_surrogate(units[end - 1]) {
            end -= 1;
        }
        parts.push(hex::encode(ucs2::encode_units(&units[start..end])));
        start = end;
    }
    parts
}

/// Split on septet weight, or `None` if any character needs UCS-2
fn split_plain(text: &str) -> Option<Vec<String>> {
    let mut parts = Vec::new();
    let mut part = String::new();
    let mut weight = 0;
    let mut total = 0;

    for c in text.chars() {
        let len = gsm7::septets_for(c)?.len();

        if weight + len > DataCoding::Plain.max_segment_length() {
            parts.push(std::mem::take(&mut part));
            weight = 0;
        }

        weight += len;
        total += len;
        part.push(c);
    }
    parts.push(part);

    // Only marginally over one segment: it still fits unsplit
    if parts.len() == 2 && total <= DataCoding::Plain.max_single_sms_length() {
        return Some(vec![text.to_string()]);
    }

    Some(parts)
}

fn split_unicode(text: &str) -> Vec<String> {
    if ucs2::code_units(text) <= DataCoding::Unicode.max_single_sms_length() {
        return vec![text.to_string()];
    }

    let mut parts = Vec::new();
    let mut part = String::new();
    let mut weight = 0;

    for c in text.chars() {
        let len = c.len_utf16();
        if weight + len > DataCoding::Unicode.max_segment_length() {
            parts.push(std::mem::take(&mut part));
            weight = 0;
        }
        weight += len;
        part.push(c);
    }
    parts.push(part);

    parts
}
