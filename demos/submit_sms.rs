// ABOUTME: Example application submitting SMS messages through the encoder and delivery queue
// ABOUTME: Wires a logging carrier that can fail on demand to show merging, prioritization, and retries

use argh::FromArgs;
use smsgate::carrier::{Carrier, CarrierError, CarrierResponse, CarrierResult, MessageParams};
use smsgate::{DeliveryQueue, Gateway, OutboundMessage, QueueConfig, TextEncoder};
use std::error::Error;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

/// Example application that queues one message for several recipients
#[derive(FromArgs)]
struct CliArgs {
    /// whether or not to enable debugging
    #[argh(switch, short = 'd')]
    debugging: bool,

    /// the message to send
    #[argh(option, short = 'm')]
    message: String,

    /// a recipient telephone number, may be repeated
    #[argh(option, short = 't')]
    to: Vec<String>,

    /// the originator, alphanumeric or a telephone number
    #[argh(option, short = 'f')]
    from: String,

    /// flush interval in milliseconds (default: 1000)
    #[argh(option)]
    flush_interval: Option<u64>,

    /// number of carrier calls to fail before succeeding (default: 0)
    #[argh(option)]
    failures: Option<u32>,

    /// how long to keep running in seconds (default: 10)
    #[argh(option)]
    run_duration: Option<u64>,
}

/// Carrier that logs every request instead of calling a provider
struct LoggingCarrier {
    failures_left: AtomicU32,
    sent: AtomicU32,
}

impl Carrier for LoggingCarrier {
    async fn send_message(
        &self,
        originator: &str,
        recipients: &[String],
        body: &str,
        params: &MessageParams,
    ) -> CarrierResult<CarrierResponse> {
        let failing = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(CarrierError::Transport("simulated outage".to_string()));
        }

        let id = self.sent.fetch_add(1, Ordering::SeqCst) + 1;
        info!(
            "SEND #{id} from={originator} to={recipients:?} coding={} (0x{:02x}) udh={} body={body:?}",
            params.data_coding,
            params.data_coding.to_byte(),
            params.udh().unwrap_or("-")
        );

        Ok(CarrierResponse::new(format!("demo-{id}"), recipients.len()))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli_args: CliArgs = argh::from_env();

    let level = if cli_args.debugging {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if cli_args.to.is_empty() {
        return Err("at least one recipient (-t) is required".into());
    }

    let flush_interval = Duration::from_millis(cli_args.flush_interval.unwrap_or(1000));
    let run_duration = Duration::from_secs(cli_args.run_duration.unwrap_or(10));

    let carrier = LoggingCarrier {
        failures_left: AtomicU32::new(cli_args.failures.unwrap_or(0)),
        sent: AtomicU32::new(0),
    };
    let queue = DeliveryQueue::start(carrier, QueueConfig::new(flush_interval));
    let gateway = Gateway::new(Arc::new(TextEncoder::new()), queue);

    // one task per submission, like independent requests
    let submissions: Vec<_> = cli_args
        .to
        .iter()
        .map(|to| {
            gateway.submit(OutboundMessage::new(
                cli_args.from.as_str(),
                to.as_str(),
                cli_args.message.as_str(),
            ))
        })
        .collect();

    for submission in submissions {
        let segments = submission.await??;
        info!("Queued {segments} segments");
    }

    tokio::time::sleep(run_duration).await;
    info!("Done, {} messages still waiting", gateway.queue().pending());

    Ok(())
}
