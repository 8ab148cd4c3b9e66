// ABOUTME: Merge and prioritize steps applied to each batch drained from the accumulation buffer
// ABOUTME: Folds same-content segments into multi-recipient messages and orders them by fan-out

use crate::queue::message::QueueMessage;
use std::collections::HashMap;
use tracing::debug;

/// Outcome of merging one drained batch
#[derive(Debug, Default)]
pub struct MergedBatch {
    /// One message per distinct (body, UDH), in first-seen order
    pub merged: Vec<QueueMessage>,
    /// Messages whose recipients were already present; they go back to the queue
    pub duplicates: Vec<QueueMessage>,
}

/// Group messages by (body, UDH) and fold their recipients together
///
/// The first message seen for a key collects the others. A message sharing
/// a recipient with it stays separate, so a genuine resend of the same text
/// to the same number is still sent twice. The originator is not part of the
/// key; same-content messages from different originators go out under the
/// first one seen.
pub fn merge(batch: Vec<QueueMessage>) -> MergedBatch {
    let mut result = MergedBatch::default();
    let mut index: HashMap<(String, String), usize> = HashMap::with_capacity(batch.len());

    for message in batch {
        let key = (message.body().to_string(), message.udh().to_string());

        match index.get(&key) {
            Some(&position) => {
                let target = &mut result.merged[position];
                if let Err((error, duplicate)) = target.absorb(message) {
                    debug!("{error} for queued segment, requeueing");
                    result.duplicates.push(duplicate);
                }
            }
            None => {
                index.insert(key, result.merged.len());
                result.merged.push(message);
            }
        }
    }

    result
}

/// Order messages by recipient count, largest first; ties keep their order
pub fn prioritize(messages: &mut [QueueMessage]) {
    messages.sort_by(|a, b| b.recipient_count().cmp(&a.recipient_count()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::DataCoding;
    use crate::queue::message::OutboundMessage;
    use std::sync::Arc;

    fn message(body: &str, udh: &str, recipient: &str) -> QueueMessage {
        let original = Arc::new(OutboundMessage::new("Gateway", recipient, body));
        QueueMessage::new(body, DataCoding::Plain, original, udh)
    }

    #[test]
    fn test_merge_distinct_recipients() {
        let result = merge(vec![message("m1", "", "m1-r1"), message("m1", "", "m1-r2")]);

        assert_eq!(result.merged.len(), 1);
        assert!(result.duplicates.is_empty());
        assert_eq!(result.merged[0].recipients(), ["m1-r1", "m1-r2"]);
    }

    #[test]
    fn test_merge_keeps_duplicate_separate() {
        let result = merge(vec![message("m1", "", "r1"), message("m1", "", "r1")]);

        assert_eq!(result.merged.len(), 1);
        assert_eq!(result.duplicates.len(), 1);
        assert_eq!(result.merged[0].recipients(), ["r1"]);
        assert_eq!(result.duplicates[0].recipients(), ["r1"]);
    }

    #[test]
    fn test_merge_key_includes_udh() {
        let result = merge(vec![
            message("part", "050003010201", "r1"),
            message("part", "050003020201", "r2"),
            message("part", "050003010201", "r3"),
        ]);

        assert_eq!(result.merged.len(), 2);
        assert_eq!(result.merged[0].recipients(), ["r1", "r3"]);
        assert_eq!(result.merged[1].recipients(), ["r2"]);
    }

    #[test]
    fn test_merge_ignores_originator() {
        let first = QueueMessage::new(
            "hi",
            DataCoding::Plain,
            Arc::new(OutboundMessage::new("A", "1", "hi")),
            "",
        );
        let second = QueueMessage::new(
            "hi",
            DataCoding::Plain,
            Arc::new(OutboundMessage::new("B", "2", "hi")),
            "",
        );

        let result = merge(vec![first, second]);
        assert_eq!(result.merged.len(), 1);
        assert_eq!(result.merged[0].originator(), "A");
        assert_eq!(result.merged[0].recipients(), ["1", "2"]);
    }

    #[test]
    fn test_merge_absorbs_previously_merged_message() {
        let mut merged = message("m", "", "r2");
        merged.add_recipient("r3").unwrap();

        let result = merge(vec![message("m", "", "r1"), merged]);

        assert_eq!(result.merged.len(), 1);
        assert_eq!(result.merged[0].recipients(), ["r1", "r2", "r3"]);
    }

    #[test]
    fn test_prioritize_by_recipient_count() {
        let result = merge(vec![
            message("m1", "1", "a"),
            message("m2", "2", "b"),
            message("m2", "2", "c"),
            message("m3", "3", "d"),
        ]);
        let mut merged = result.merged;
        prioritize(&mut merged);

        assert_eq!(merged[0].body(), "m2");
        assert_eq!(merged[0].recipient_count(), 2);
        // equal counts keep first-seen order
        assert_eq!(merged[1].body(), "m1");
        assert_eq!(merged[2].body(), "m3");
    }

    #[test]
    fn test_merge_empty_batch() {
        let result = merge(Vec::new());
        assert!(result.merged.is_empty());
        assert!(result.duplicates.is_empty());
    }
}
