// ABOUTME: Carrier-send capability the delivery queue dispatches through
// ABOUTME: Uses return-position impl Future so dispatch futures can run on spawned tasks

use crate::carrier::error::CarrierResult;
use crate::carrier::types::{CarrierResponse, MessageParams};
use std::future::Future;

/// Outbound messaging provider
///
/// A thin binding to a third-party SMS API. Implementations must be usable
/// from any task; the queue calls `send_message` from a task spawned per
/// flush cycle.
pub trait Carrier: Send + Sync + 'static {
    /// Submit one segment to all `recipients`
    ///
    /// Any error is treated as transient by the caller.
    fn send_message(
        &self,
        originator: &str,
        recipients: &[String],
        body: &str,
        params: &MessageParams,
    ) -> impl Future<Output = CarrierResult<CarrierResponse>> + Send;
}
