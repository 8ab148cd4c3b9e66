// ABOUTME: Outbound delivery queue that batches pushed segments and dispatches them to a carrier
// ABOUTME: Runs a collector task, a flush loop, and one dispatch task per non-empty flush cycle

use crate::carrier::Carrier;
use crate::queue::batch::{self, MergedBatch};
use crate::queue::config::QueueConfig;
use crate::queue::error::{QueueError, QueueResult};
use crate::queue::message::QueueMessage;
use crate::queue::trigger::{FlushTrigger, IntervalTrigger};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Producer-facing side of the queue
///
/// Success means the messages were accepted for delivery, not delivered.
pub trait MessageQueue: Send + Sync {
    /// Hand messages to the queue, waiting for room in the ingestion channel
    fn push(&self, messages: Vec<QueueMessage>) -> impl Future<Output = QueueResult<()>> + Send;
}

type Cart = Arc<Mutex<Vec<QueueMessage>>>;

fn lock(cart: &Mutex<Vec<QueueMessage>>) -> MutexGuard<'_, Vec<QueueMessage>> {
    // a Vec cannot be left half-updated by a panicking push
    cart.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Batching delivery queue
///
/// Pushed messages collect in a buffer (the cart). On every flush the cart
/// is swapped for an empty one and the batch is merged, prioritized and
/// handed to a dispatch task, which sends the single highest fan-out
/// message and pushes everything else back. Failed sends are pushed back
/// too, so an accepted message is retried until the carrier takes it.
///
/// The queue lives for as long as its flush trigger keeps ticking; there is
/// no shutdown path.
///
/// # Example
///
/// ```rust,no_run
/// use smsgate::carrier::{Carrier, CarrierResponse, CarrierResult, MessageParams};
/// use smsgate::encoding::DataCoding;
/// use smsgate::queue::{DeliveryQueue, MessageQueue, OutboundMessage, QueueConfig, QueueMessage};
/// use std::sync::Arc;
///
/// struct NullCarrier;
///
/// impl Carrier for NullCarrier {
///     async fn send_message(
///         &self,
///         _originator: &str,
///         recipients: &[String],
///         _body: &str,
///         _params: &MessageParams,
///     ) -> CarrierResult<CarrierResponse> {
///         Ok(CarrierResponse::new("null", recipients.len()))
///     }
/// }
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let queue = DeliveryQueue::start(NullCarrier, QueueConfig::default());
///
/// let original = Arc::new(OutboundMessage::new("Gateway", "31612345678", "Hello"));
/// let message = QueueMessage::new("Hello", DataCoding::Plain, original, "");
/// queue.push(vec![message]).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DeliveryQueue {
    sender: mpsc::Sender<QueueMessage>,
    cart: Cart,
}

impl DeliveryQueue {
    /// Start a queue flushing on the configured wall-clock interval
    ///
    /// Must be called inside a tokio runtime.
    pub fn start<C: Carrier>(carrier: C, config: QueueConfig) -> Self {
        let trigger = IntervalTrigger::new(config.flush_interval);
        Self::with_trigger(carrier, trigger, config.channel_capacity)
    }

    /// Start a queue that flushes whenever `trigger` ticks
    ///
    /// `channel_capacity` is raised to 1 if lower.
    pub fn with_trigger<C: Carrier, T: FlushTrigger>(
        carrier: C,
        trigger: T,
        channel_capacity: usize,
    ) -> Self {
        let (sender, receiver) = mpsc::channel(channel_capacity.max(1));
        let cart: Cart = Arc::new(Mutex::new(Vec::new()));

        tokio::spawn(collect(receiver, Arc::clone(&cart)));
        tokio::spawn(flush_loop(
            trigger,
            Arc::clone(&cart),
            sender.clone(),
            Arc::new(carrier),
        ));

        Self { sender, cart }
    }

    /// Number of messages waiting in the cart for the next flush
    ///
    /// Messages still sitting in the ingestion channel are not counted.
    pub fn pending(&self) -> usize {
        lock(&self.cart).len()
    }
}

impl MessageQueue for DeliveryQueue {
    async fn push(&self, messages: Vec<QueueMessage>) -> QueueResult<()> {
        for message in messages {
            self.sender.send(message).await.map_err(|_| {
                error!("Delivery queue closed, message not accepted");
                QueueError::Closed
            })?;
        }
        Ok(())
    }
}

/// Drain the ingestion channel into the cart
async fn collect(mut receiver: mpsc::Receiver<QueueMessage>, cart: Cart) {
    while let Some(message) = receiver.recv().await {
        lock(&cart).push(message);
    }
    debug!("Ingestion channel closed, collector stopped");
}

async fn flush_loop<C: Carrier, T: FlushTrigger>(
    mut trigger: T,
    cart: Cart,
    sender: mpsc::Sender<QueueMessage>,
    carrier: Arc<C>,
) {
    while trigger.tick().await {
        if lock(&cart).is_empty() {
            continue;
        }

        // swap under the lock, process outside it
        let batch = std::mem::take(&mut *lock(&cart));
        debug!("Flushing {} queued messages", batch.len());

        tokio::spawn(dispatch(batch, sender.clone(), Arc::clone(&carrier)));
    }
    debug!("Flush trigger stopped, flush loop exiting");
}

/// Merge, prioritize, send the top message and requeue the rest
async fn dispatch<C: Carrier>(
    batch: Vec<QueueMessage>,
    sender: mpsc::Sender<QueueMessage>,
    carrier: Arc<C>,
) {
    let MergedBatch {
        mut merged,
        duplicates,
    } = batch::merge(batch);

    requeue(&sender, duplicates).await;

    batch::prioritize(&mut merged);
    let mut merged = merged.into_iter();
    let Some(top) = merged.next() else {
        return;
    };
    requeue(&sender, merged.collect()).await;

    let params = top.params();
    debug!(
        "Dispatching segment to {} recipients (data coding: {})",
        top.recipient_count(),
        params.data_coding
    );

    match carrier
        .send_message(top.originator(), top.recipients(), top.body(), &params)
        .await
    {
        Ok(response) => {
            info!(
                "Carrier accepted message {} for {} recipients",
                response.id.as_deref().unwrap_or("-"),
                top.recipient_count()
            );
        }
        Err(err) => {
            warn!("Carrier send failed, requeueing: {}", err);
            requeue(&sender, vec![top]).await;
        }
    }
}

async fn requeue(sender: &mpsc::Sender<QueueMessage>, messages: Vec<QueueMessage>) {
    if messages.is_empty() {
        return;
    }
    debug!("Requeueing {} messages", messages.len());

    for message in messages {
        if sender.send(message).await.is_err() {
            error!("Delivery queue closed, dropping requeued message");
            return;
        }
    }
}
