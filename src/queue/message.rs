// ABOUTME: Validated outbound message and the per-segment queue message moved through delivery
// ABOUTME: Queue messages carry one segment plus an ordered, duplicate-free recipient set grown by merges

use crate::carrier::MessageParams;
use crate::encoding::DataCoding;
use crate::queue::error::MergeError;
use std::sync::Arc;

/// A validated message as handed over by the request layer
///
/// The originator is an alphanumeric sender ID or an MSISDN, the recipient an
/// MSISDN. Validation happens before this type is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    originator: String,
    recipient: String,
    body: String,
}

impl OutboundMessage {
    pub fn new(
        originator: impl Into<String>,
        recipient: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            originator: originator.into(),
            recipient: recipient.into(),
            body: body.into(),
        }
    }

    pub fn originator(&self) -> &str {
        &self.originator
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// One physical segment waiting for delivery
///
/// Starts with exactly the original recipient. Recipients are only ever added
/// by merging and are kept unique and in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueMessage {
    body: String,
    data_coding: DataCoding,
    udh: String,
    original: Arc<OutboundMessage>,
    recipients: Vec<String>,
}

impl QueueMessage {
    /// Create a queue message for one segment of `original`
    ///
    /// `udh` is empty for single-segment messages.
    pub fn new(
        body: impl Into<String>,
        data_coding: DataCoding,
        original: Arc<OutboundMessage>,
        udh: impl Into<String>,
    ) -> Self {
        let recipients = vec![original.recipient().to_string()];
        Self {
            body: body.into(),
            data_coding,
            udh: udh.into(),
            original,
            recipients,
        }
    }

    /// Segment text
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn data_coding(&self) -> DataCoding {
        self.data_coding
    }

    /// Concatenation header, empty if the message has one segment
    pub fn udh(&self) -> &str {
        &self.udh
    }

    pub fn original(&self) -> &OutboundMessage {
        &self.original
    }

    pub fn originator(&self) -> &str {
        self.original.originator()
    }

    pub fn recipients(&self) -> &[String] {
        &self.recipients
    }

    pub fn recipient_count(&self) -> usize {
        self.recipients.len()
    }

    pub fn has_recipient(&self, recipient: &str) -> bool {
        self.recipients.iter().any(|r| r == recipient)
    }

    /// Add a recipient, refusing one that is already present
    pub fn add_recipient(&mut self, recipient: impl Into<String>) -> Result<(), MergeError> {
        let recipient = recipient.into();
        if self.has_recipient(&recipient) {
            return Err(MergeError::DuplicateRecipient(recipient));
        }
        self.recipients.push(recipient);
        Ok(())
    }

    /// Take over every recipient of `other`
    ///
    /// All or nothing: on the first recipient already present the message is
    /// left as it was and `other` is handed back untouched, so it can be sent
    /// on its own later.
    pub fn absorb(&mut self, other: QueueMessage) -> Result<(), (MergeError, QueueMessage)> {
        let before = self.recipients.len();
        let added = other
            .recipients
            .iter()
            .try_for_each(|recipient| self.add_recipient(recipient.as_str()));

        added.map_err(|error| {
            self.recipients.truncate(before);
            (error, other)
        })
    }

    /// Carrier parameters for this segment
    pub fn params(&self) -> MessageParams {
        MessageParams::new(self.data_coding, &self.udh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn original(recipient: &str) -> Arc<OutboundMessage> {
        Arc::new(OutboundMessage::new("Gateway", recipient, "body"))
    }

    #[test]
    fn test_new_queue_message_keeps_fields() {
        let om = original("31612345678");
        let message = QueueMessage::new("body", DataCoding::Unicode, Arc::clone(&om), "udh");

        assert_eq!(message.body(), "body");
        assert_eq!(message.data_coding(), DataCoding::Unicode);
        assert_eq!(message.udh(), "udh");
        assert_eq!(message.original(), om.as_ref());
        assert_eq!(message.originator(), "Gateway");
        assert_eq!(message.recipients(), ["31612345678"]);
        assert_eq!(message.recipient_count(), 1);
    }

    #[test]
    fn test_add_recipient_rejects_duplicates() {
        let mut message = QueueMessage::new("body", DataCoding::Plain, original("1"), "");

        assert!(message.add_recipient("2").is_ok());
        assert_eq!(
            message.add_recipient("1"),
            Err(MergeError::DuplicateRecipient("1".to_string()))
        );
        assert_eq!(
            message.add_recipient("2"),
            Err(MergeError::DuplicateRecipient("2".to_string()))
        );
        assert_eq!(message.recipients(), ["1", "2"]);
    }

    #[test]
    fn test_absorb_disjoint_recipients() {
        let mut first = QueueMessage::new("m", DataCoding::Plain, original("1"), "");
        let mut second = QueueMessage::new("m", DataCoding::Plain, original("2"), "");
        second.add_recipient("3").unwrap();

        assert!(first.absorb(second).is_ok());
        assert_eq!(first.recipients(), ["1", "2", "3"]);
    }

    #[test]
    fn test_absorb_overlap_returns_message() {
        let mut first = QueueMessage::new("m", DataCoding::Plain, original("1"), "");
        let mut second = QueueMessage::new("m", DataCoding::Plain, original("2"), "");
        second.add_recipient("1").unwrap();

        let (error, rejected) = first.absorb(second.clone()).unwrap_err();
        assert_eq!(error, MergeError::DuplicateRecipient("1".to_string()));
        assert_eq!(rejected, second);
        assert_eq!(first.recipients(), ["1"]);
    }

    #[test]
    fn test_absorb_partial_overlap_leaves_message_unchanged() {
        let mut first = QueueMessage::new("m", DataCoding::Plain, original("1"), "");
        first.add_recipient("4").unwrap();
        let mut second = QueueMessage::new("m", DataCoding::Plain, original("2"), "");
        second.add_recipient("3").unwrap();
        second.add_recipient("4").unwrap();

        let (error, rejected) = first.absorb(second).unwrap_err();
        assert_eq!(error, MergeError::DuplicateRecipient("4".to_string()));
        assert_eq!(rejected.recipients(), ["2", "3", "4"]);
        assert_eq!(first.recipients(), ["1", "4"]);
    }

    #[test]
    fn test_params_attach_udh() {
        let single = QueueMessage::new("m", DataCoding::Plain, original("1"), "");
        assert_eq!(single.params().udh(), None);

        let part = QueueMessage::new("m", DataCoding::Unicode, original("1"), "050003010201");
        let params = part.params();
        assert_eq!(params.udh(), Some("050003010201"));
        assert_eq!(params.data_coding, DataCoding::Unicode);
    }
}
