pub mod carrier;
pub mod encoding;
pub mod gateway;
pub mod queue;


// Re-export the main gateway API for easy access
pub use carrier::{Carrier, CarrierError, CarrierResponse, CarrierResult, MessageParams};
pub use encoding::{DataCoding, Encoded, TextEncoder, UdhEncoder};
pub use gateway::{Gateway, content_hash};
pub use queue::{
    DeliveryQueue, MessageQueue, OutboundMessage, QueueConfig, QueueError, QueueMessage,
    QueueResult,
};

/// Error returned by most functions.
///
/// The library itself reports failures through [`CarrierError`] and
/// [`QueueError`]; this boxed form is for applications wiring the gateway
/// together, where any of them may surface.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// A specialized `Result` type for gateway wiring.
///
/// # Examples
///
/// ## Submitting a message
///
/// The encoder splits the body and stamps concatenation headers, the queue
/// batches segments and hands them to the carrier once per flush interval.
///
/// ```rust,no_run
/// use smsgate::carrier::{Carrier, CarrierResponse, CarrierResult, MessageParams};
/// use smsgate::{DeliveryQueue, Gateway, OutboundMessage, QueueConfig, TextEncoder};
/// use std::sync::Arc;
///
/// struct PrintCarrier;
///
/// impl Carrier for PrintCarrier {
///     async fn send_message(
///         &self,
///         originator: &str,
///         recipients: &[String],
///         body: &str,
///         params: &MessageParams,
///     ) -> CarrierResult<CarrierResponse> {
///         println!("{} -> {:?} [{:?}]: {}", originator, recipients, params.udh(), body);
///         Ok(CarrierResponse::new("printed", recipients.len()))
///     }
/// }
///
/// #[tokio::main]
/// async fn main() -> smsgate::Result<()> {
///     let queue = DeliveryQueue::start(PrintCarrier, QueueConfig::default());
///     let gateway = Gateway::new(Arc::new(TextEncoder::new()), queue);
///
///     let segments = gateway
///         .submit_now(OutboundMessage::new("Gateway", "31612345678", "Hello, World!"))
///         .await?;
///     println!("Queued {} segments", segments);
///
///     Ok(())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;
