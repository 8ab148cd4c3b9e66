// ABOUTME: Submission path that turns one validated message into queued, UDH-tagged segments
// ABOUTME: Splits the body, derives a content hash for stable UDH references, and pushes every part

use crate::encoding::UdhEncoder;
use crate::queue::{MessageQueue, OutboundMessage, QueueMessage, QueueResult};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// Content hash used to key UDH reference IDs
///
/// First four bytes of the SHA-256 digest of the body, big-endian. The same
/// body always yields the same hash, so resends reuse the same reference.
pub fn content_hash(body: &str) -> u32 {
    let digest = Sha256::digest(body.as_bytes());
    u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]])
}

/// Connects the text encoder to a delivery queue
///
/// Cheap to clone; clones share the encoder and the queue.
#[derive(Debug)]
pub struct Gateway<E, Q> {
    encoder: Arc<E>,
    queue: Q,
}

impl<E, Q: Clone> Clone for Gateway<E, Q> {
    fn clone(&self) -> Self {
        Self {
            encoder: Arc::clone(&self.encoder),
            queue: self.queue.clone(),
        }
    }
}

impl<E, Q> Gateway<E, Q>
where
    E: UdhEncoder + 'static,
    Q: MessageQueue + Clone + 'static,
{
    pub fn new(encoder: Arc<E>, queue: Q) -> Self {
        Self { encoder, queue }
    }

    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    pub fn queue(&self) -> &Q {
        &self.queue
    }

    /// Split `message` into queue messages, one per segment, in order
    ///
    /// Multi-part messages get a UDH on every segment; a single segment
    /// goes out without one.
    pub fn segment(&self, message: OutboundMessage) -> Vec<QueueMessage> {
        let encoded = self.encoder.split_text_message(message.body());
        let original = Arc::new(message);

        if !encoded.is_multipart() {
            return encoded
                .messages
                .into_iter()
                .map(|body| QueueMessage::new(body, encoded.encoding, Arc::clone(&original), ""))
                .collect();
        }

        let hash = content_hash(original.body());
        // at most MAX_SEGMENTS parts, always fits
        let total = encoded.len() as u8;

        encoded
            .messages
            .into_iter()
            .zip(1..=total)
            .map(|(body, part)| {
                let udh = self.encoder.generate_udh(part, total, hash);
                QueueMessage::new(body, encoded.encoding, Arc::clone(&original), udh)
            })
            .collect()
    }

    /// Encode `message` and push its segments, returning how many were queued
    pub async fn submit_now(&self, message: OutboundMessage) -> QueueResult<usize> {
        let segments = self.segment(message);
        let count = segments.len();

        debug!("Queueing message as {} segments", count);
        self.queue.push(segments).await?;

        Ok(count)
    }

    /// Encode and push `message` on its own task
    ///
    /// The caller is not held up by queue backpressure; push failures are
    /// logged and reported through the join handle.
    pub fn submit(&self, message: OutboundMessage) -> JoinHandle<QueueResult<usize>> {
        let gateway = self.clone();
        tokio::spawn(async move {
            let result = gateway.submit_now(message).await;
            if let Err(err) = &result {
                error!("Failed to queue message: {}", err);
            }
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::{DataCoding, PLAIN_SEGMENT_LENGTH, TextEncoder};
    use crate::queue::QueueError;
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct RecordingQueue {
        pushed: Arc<Mutex<Vec<QueueMessage>>>,
        closed: bool,
    }

    impl MessageQueue for RecordingQueue {
        async fn push(&self, messages: Vec<QueueMessage>) -> QueueResult<()> {
            if self.closed {
                return Err(QueueError::Closed);
            }
            self.pushed.lock().unwrap().extend(messages);
            Ok(())
        }
    }

    fn gateway() -> Gateway<TextEncoder, RecordingQueue> {
        Gateway::new(Arc::new(TextEncoder::new()), RecordingQueue::default())
    }

    #[test]
    fn test_content_hash_is_stable() {
        assert_eq!(content_hash("hello"), content_hash("hello"));
        assert_ne!(content_hash("hello"), content_hash("hello!"));
        // sha256("") starts with e3 b0 c4 42
        assert_eq!(content_hash(""), 0xe3b0c442);
    }

    #[test]
    fn test_single_segment_has_no_udh() {
        let segments = gateway().segment(OutboundMessage::new("Gateway", "31612345678", "Hi"));

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].body(), "Hi");
        assert_eq!(segments[0].udh(), "");
        assert_eq!(segments[0].data_coding(), DataCoding::Plain);
        assert_eq!(segments[0].recipients(), ["31612345678"]);
    }

    #[test]
    fn test_multipart_segments_share_reference() {
        let body = "a".repeat(PLAIN_SEGMENT_LENGTH * 2 + 10);
        let segments = gateway().segment(OutboundMessage::new("Gateway", "31612345678", &*body));

        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].udh(), "050003010301");
        assert_eq!(segments[1].udh(), "050003010302");
        assert_eq!(segments[2].udh(), "050003010303");
        let rebuilt: String = segments.iter().map(|s| s.body()).collect();
        assert_eq!(rebuilt, body);
    }

    #[test]
    fn test_resend_reuses_reference_and_new_content_gets_next() {
        let gateway = gateway();
        let first = "a".repeat(200);
        let second = "b".repeat(200);

        let a = gateway.segment(OutboundMessage::new("Gateway", "1", &*first));
        let b = gateway.segment(OutboundMessage::new("Gateway", "2", &*second));
        let again = gateway.segment(OutboundMessage::new("Gateway", "3", &*first));

        assert_eq!(a[0].udh(), "050003010201");
        assert_eq!(b[0].udh(), "050003020201");
        assert_eq!(again[1].udh(), "050003010202");
    }

    #[tokio::test]
    async fn test_submit_now_pushes_every_segment() {
        let gateway = gateway();
        let count = gateway
            .submit_now(OutboundMessage::new("Gateway", "1", "x".repeat(400)))
            .await
            .unwrap();

        assert_eq!(count, 3);
        let pushed = gateway.queue().pushed.lock().unwrap();
        assert_eq!(pushed.len(), 3);
        assert!(pushed.iter().all(|m| m.originator() == "Gateway"));
    }

    #[tokio::test]
    async fn test_submit_reports_closed_queue() {
        let gateway = Gateway::new(
            Arc::new(TextEncoder::new()),
            RecordingQueue {
                closed: true,
                ..Default::default()
            },
        );

        let result = gateway
            .submit(OutboundMessage::new("Gateway", "1", "hello"))
            .await
            .unwrap();
        assert_eq!(result, Err(QueueError::Closed));
    }
}
