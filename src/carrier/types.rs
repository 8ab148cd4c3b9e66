// ABOUTME: Request parameters and response types exchanged with the carrier API
// ABOUTME: Builds binary message parameters from a segment's data coding and concatenation header

use crate::encoding::DataCoding;
use std::collections::BTreeMap;

/// Message type sent to the carrier for every segment
pub const BINARY_MESSAGE_TYPE: &str = "binary";

/// Type-detail key carrying the concatenation header
pub const UDH_TYPE_DETAIL: &str = "udh";

/// Per-request parameters for a carrier send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageParams {
    /// Carrier message type, always `"binary"`
    pub message_type: &'static str,
    /// Encoding of the body
    pub data_coding: DataCoding,
    /// Extra binary details; holds `udh` for multi-part segments
    pub type_details: BTreeMap<String, String>,
}

impl MessageParams {
    /// Build parameters for a segment, attaching `udh` only when non-empty
    pub fn new(data_coding: DataCoding, udh: &str) -> Self {
        let mut type_details = BTreeMap::new();
        if !udh.is_empty() {
            type_details.insert(UDH_TYPE_DETAIL.to_string(), udh.to_string());
        }

        Self {
            message_type: BINARY_MESSAGE_TYPE,
            data_coding,
            type_details,
        }
    }

    /// Concatenation header, if one is attached
    pub fn udh(&self) -> Option<&str> {
        self.type_details.get(UDH_TYPE_DETAIL).map(String::as_str)
    }
}

/// Carrier acknowledgement of an accepted send
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarrierResponse {
    /// Carrier-assigned message identifier, when the carrier returns one
    pub id: Option<String>,
    /// Number of recipients the carrier accepted
    pub recipients: usize,
}

impl CarrierResponse {
    pub fn new(id: impl Into<String>, recipients: usize) -> Self {
        Self {
            id: Some(id.into()),
            recipients,
        }
    }
}
