use crate::relay::decode::{DecodeError, decode_line};
use crate::relay::sender::{SendError, ValueMetric, ValueMetricSender};
use crate::relay::stats::MessageStatistics;
use crate::relay::units::UnitTable;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

/// Cadence of the statistics report.
pub const REPORT_INTERVAL: Duration = Duration::from_secs(30);

pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone)]
pub struct ForwarderOptions {
    pub report_interval: Duration,
    /// Deadline for a single send; `None` waits for the sender indefinitely.
    pub send_timeout: Option<Duration>,
    pub queue_capacity: usize,
}

impl Default for ForwarderOptions {
    fn default() -> Self {
        Self {
            report_interval: REPORT_INTERVAL,
            send_timeout: Some(DEFAULT_SEND_TIMEOUT),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

/// Single worker that decodes, classifies and forwards monitoring lines.
///
/// The worker is the only owner of its [`MessageStatistics`]; nothing else
/// reads or writes them while it runs.
pub struct MessageForwarder<S> {
    sender: S,
    units: Arc<UnitTable>,
    send_timeout: Option<Duration>,
    stats: MessageStatistics,
}

impl<S: ValueMetricSender> MessageForwarder<S> {
    pub fn new(sender: S, units: Arc<UnitTable>, send_timeout: Option<Duration>) -> Self {
        Self {
            sender,
            units,
            send_timeout,
            stats: MessageStatistics::default(),
        }
    }

    #[cfg(test)]
    pub(crate) fn statistics(&self) -> MessageStatistics {
        self.stats
    }

    /// Decode one raw line and forward it.
    ///
    /// Rejected lines leave the statistics untouched. Every decoded sample
    /// counts exactly once, as sent or as an error.
    pub async fn process_line(&mut self, line: &str) {
        let sample = match decode_line(line) {
            Ok(sample) => sample,
            Err(e @ DecodeError::TooFewTokens { .. }) => {
                tracing::debug!(error = %e, line, "skipping malformed line");
                return;
            }
            Err(e) => {
                tracing::warn!(error = %e, line, "cannot parse message");
                return;
            }
        };

        let (unit, known) = self.units.lookup(&sample.event_name);
        if !known {
            tracing::debug!(
                event_name = %sample.event_name,
                "event name has no known conversion to a unit"
            );
        }

        let metric = ValueMetric {
            deployment: sample.deployment(),
            job: sample.job(),
            index: sample.index(),
            name: &sample.event_name,
            timestamp: sample.timestamp,
            value: sample.value,
            unit,
        };

        match self.send(&metric).await {
            Ok(()) => self.stats.record_sent(),
            Err(e) => {
                self.stats.record_error();
                tracing::warn!(
                    error = %e,
                    event_name = metric.name,
                    "failed to send value metric"
                );
            }
        }
    }

    async fn send(&self, metric: &ValueMetric<'_>) -> Result<(), SendError> {
        match self.send_timeout {
            Some(limit) => tokio::time::timeout(limit, self.sender.send_value_metric(metric))
                .await
                .unwrap_or_else(|_| Err(SendError::Timeout(limit))),
            None => self.sender.send_value_metric(metric).await,
        }
    }

    /// Log the counters and reset the per-interval deltas.
    pub fn report(&mut self) -> MessageStatistics {
        let report = self.stats.take_report();

        tracing::info!(
            total_sent = report.total_sent,
            delta_sent = report.delta_sent,
            total_errors = report.total_errors,
            delta_errors = report.delta_errors,
            "message statistics"
        );

        report
    }

    /// Run until every producer handle for `lines` has been dropped.
    ///
    /// Lines and report ticks are served in the order they become ready, so a
    /// report covers exactly the lines processed before it.
    pub async fn run(
        mut self,
        mut lines: mpsc::Receiver<String>,
        report_interval: Duration,
    ) -> MessageStatistics {
        let mut ticker = interval_at(Instant::now() + report_interval, report_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                line = lines.recv() => match line {
                    Some(line) => self.process_line(&line).await,
                    None => {
                        tracing::info!("input channel closed, message forwarder stopping");
                        break;
                    }
                },
                _ = ticker.tick() => {
                    self.report();
                }
            }
        }

        self.stats
    }
}

/// Spawn the forwarder worker on the current runtime.
///
/// Returns the producer half of its input queue and the worker's handle,
/// which resolves to the final statistics once all producers are gone.
pub fn start_message_forwarder<S>(
    sender: S,
    units: Arc<UnitTable>,
    options: ForwarderOptions,
) -> (mpsc::Sender<String>, JoinHandle<MessageStatistics>)
where
    S: ValueMetricSender + 'static,
{
    let (lines_tx, lines_rx) = mpsc::channel(options.queue_capacity);
    let forwarder = MessageForwarder::new(sender, units, options.send_timeout);

    let handle = tokio::spawn(forwarder.run(lines_rx, options.report_interval));

    (lines_tx, handle)
}
