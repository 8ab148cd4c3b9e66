// ABOUTME: Carrier error types reported by outbound messaging provider bindings
// ABOUTME: Every variant is treated as transient by the delivery queue, which requeues on failure

use thiserror::Error;

/// Error returned by a carrier send operation
///
/// The delivery queue does not inspect the variant; any error sends the
/// message back for another attempt on a later flush.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CarrierError {
    /// Carrier answered but refused the request
    #[error("Rejected by carrier: {0}")]
    Rejected(String),

    /// Network or protocol failure while talking to the carrier
    #[error("Transport error: {0}")]
    Transport(String),

    /// Carrier did not answer in time
    #[error("Carrier timeout")]
    Timeout,

    /// Request could not be built from the message
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Result type alias for carrier operations
pub type CarrierResult<T> = Result<T, CarrierError>;
