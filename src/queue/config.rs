// ABOUTME: Configuration for the outbound delivery queue's flush cadence and ingestion channel
// ABOUTME: Builder-style settings with defaults of a one-second flush and a single-slot channel

use std::time::Duration;

/// Configuration for the delivery queue
///
/// # Example
///
/// ```rust
/// use smsgate::queue::QueueConfig;
/// use std::time::Duration;
///
/// // Default configuration (1s flush interval, channel capacity 1)
/// let config = QueueConfig::default();
///
/// // Custom configuration
/// let config = QueueConfig::new(Duration::from_millis(500))
///     .with_channel_capacity(64);
/// assert_eq!(config.channel_capacity, 64);
/// ```
#[derive(Debug, Clone)]
pub struct QueueConfig {
    /// Time between flushes of the accumulation buffer (default: 1 second)
    ///
    /// At most one carrier call is made per flush, so this is also the
    /// global send-rate ceiling.
    pub flush_interval: Duration,

    /// Capacity of the ingestion channel (default: 1)
    ///
    /// With a capacity of 1, `push` waits for the collector almost as if the
    /// channel were unbuffered, which gives producers backpressure.
    pub channel_capacity: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            flush_interval: Duration::from_secs(1),
            channel_capacity: 1,
        }
    }
}

impl QueueConfig {
    /// Create a configuration with a custom flush interval
    pub fn new(flush_interval: Duration) -> Self {
        Self {
            flush_interval,
            ..Default::default()
        }
    }

    /// Set the ingestion channel capacity; values below 1 are raised to 1
    pub fn with_channel_capacity(mut self, channel_capacity: usize) -> Self {
        self.channel_capacity = channel_capacity.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_config_defaults() {
        let config = QueueConfig::default();
        assert_eq!(config.flush_interval, Duration::from_secs(1));
        assert_eq!(config.channel_capacity, 1);
    }

    #[test]
    fn test_queue_config_builder() {
        let config = QueueConfig::new(Duration::from_millis(250)).with_channel_capacity(0);
        assert_eq!(config.flush_interval, Duration::from_millis(250));
        assert_eq!(config.channel_capacity, 1);
    }
}
