// ABOUTME: Text and concatenation-header encoding for outbound SMS
// ABOUTME: Exports the encoder trait, its default implementation, and the GSM/UCS-2/UDH building blocks

//! SMS Text Encoding
//!
//! Turns a validated message body into wire-ready segments:
//!
//! * **Character-set selection** - GSM 7-bit when every character maps to the
//!   default alphabet or its extension table, UCS-2 otherwise
//! * **Splitting** - 160/153 septets or 70/67 code units per segment, at most 9 segments
//! * **Concatenation headers** - `050003` UDHs whose reference ID stays stable
//!   for the same content across resends
//!
//! ```rust
//! use smsgate::encoding::{DataCoding, TextEncoder, UdhEncoder};
//!
//! let encoder = TextEncoder::new();
//!
//! let encoded = encoder.split_text_message("Hello!");
//! assert_eq!(encoded.encoding, DataCoding::Plain);
//! assert_eq!(encoded.messages, vec!["Hello!"]);
//!
//! assert_eq!(encoder.generate_udh(1, 3, 0xCAFE), "050003010301");
//! ```

pub mod data_coding;
pub mod encoder;
pub mod gsm7;
pub mod ucs2;
pub mod udh;

pub use data_coding::{
    DataCoding, MAX_SEGMENTS, PLAIN_SEGMENT_LENGTH, PLAIN_SINGLE_LENGTH, UNICODE_SEGMENT_LENGTH,
    UNICODE_SINGLE_LENGTH,
};
pub use encoder::{Encoded, TextEncoder, UdhEncoder};
pub use udh::{ConcatHeader, ReferenceCache};
