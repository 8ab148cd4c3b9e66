// ABOUTME: Error types for the outbound delivery queue and message merging
// ABOUTME: Covers closed ingestion channels and duplicate recipients rejected during merge

use thiserror::Error;

/// Error returned by queue operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueueError {
    /// The collector task is gone, nothing can be pushed anymore
    #[error("Delivery queue is closed")]
    Closed,
}

/// Result type alias for queue operations
pub type QueueResult<T> = Result<T, QueueError>;

/// Error returned when a recipient cannot join a queue message
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// The recipient is already part of the message
    #[error("Recipient {0} already added")]
    DuplicateRecipient(String),
}
