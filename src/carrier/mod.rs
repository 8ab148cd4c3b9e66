// ABOUTME: Carrier-facing contract for handing SMS segments to an outbound provider
// ABOUTME: Exports the send trait, request parameters, response, and error types

//! Carrier Interface
//!
//! The delivery queue never talks to a provider directly. It builds
//! [`MessageParams`] from a segment's data coding and UDH and calls
//! [`Carrier::send_message`] with the originator and every merged recipient.
//!
//! ```rust
//! use smsgate::carrier::{Carrier, CarrierResponse, CarrierResult, MessageParams};
//!
//! struct EchoCarrier;
//!
//! impl Carrier for EchoCarrier {
//!     async fn send_message(
//!         &self,
//!         originator: &str,
//!         recipients: &[String],
//!         body: &str,
//!         _params: &MessageParams,
//!     ) -> CarrierResult<CarrierResponse> {
//!         println!("{} -> {:?}: {}", originator, recipients, body);
//!         Ok(CarrierResponse::new("echo", recipients.len()))
//!     }
//! }
//! ```

pub mod error;
pub mod traits;
pub mod types;

pub use error::{CarrierError, CarrierResult};
pub use traits::Carrier;
pub use types::{CarrierResponse, MessageParams};
