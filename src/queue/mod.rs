// ABOUTME: Outbound delivery queue module with batching, merging, prioritization, and retry
// ABOUTME: Exports queue messages, the queue itself, its configuration, triggers, and error types

//! Outbound Delivery Queue
//!
//! Segments pushed into the queue are buffered for one flush interval. Each
//! flush then:
//!
//! 1. merges messages with the same body and UDH into one multi-recipient message
//! 2. sorts the merged set by recipient count, largest first
//! 3. sends the first one through the [`Carrier`](crate::carrier::Carrier)
//! 4. pushes everything else, and a failed send, back for a later flush
//!
//! At most one carrier call is made per flush. The flush cadence comes from a
//! [`FlushTrigger`]: [`IntervalTrigger`] in production, [`ManualTrigger`]
//! when the caller wants to drive cycles itself.

pub mod batch;
pub mod config;
pub mod delivery;
pub mod error;
pub mod message;
pub mod trigger;

pub use batch::{MergedBatch, merge, prioritize};
pub use config::QueueConfig;
pub use delivery::{DeliveryQueue, MessageQueue};
pub use error::{MergeError, QueueError, QueueResult};
pub use message::{OutboundMessage, QueueMessage};
pub use trigger::{FlushHandle, FlushTrigger, IntervalTrigger, ManualTrigger, manual};
