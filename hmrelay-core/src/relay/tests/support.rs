use crate::relay::{MessageStatistics, SendError, ValueMetric, ValueMetricSender};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::field::{Field, Visit};
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// Owned copy of a send attempt.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct SentMetric {
    pub deployment: String,
    pub job: String,
    pub index: String,
    pub name: String,
    pub timestamp: i64,
    pub value: f64,
    pub unit: String,
}

impl SentMetric {
    pub fn new(
        (deployment, job, index): (&str, &str, &str),
        name: &str,
        timestamp: i64,
        value: f64,
        unit: &str,
    ) -> Self {
        Self {
            deployment: deployment.into(),
            job: job.into(),
            index: index.into(),
            name: name.into(),
            timestamp,
            value,
            unit: unit.into(),
        }
    }
}

impl From<&ValueMetric<'_>> for SentMetric {
    fn from(m: &ValueMetric<'_>) -> Self {
        Self::new(
            (m.deployment, m.job, m.index),
            m.name,
            m.timestamp,
            m.value,
            m.unit,
        )
    }
}

/// Records every attempt; fails those whose name starts with `fail_prefix`.
#[derive(Clone, Default)]
pub(super) struct RecordingSender {
    pub attempts: Arc<Mutex<Vec<SentMetric>>>,
    pub fail_prefix: Option<&'static str>,
    pub delay: Option<Duration>,
}

impl RecordingSender {
    pub fn failing_on(prefix: &'static str) -> Self {
        Self {
            fail_prefix: Some(prefix),
            ..Self::default()
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn attempts(&self) -> Vec<SentMetric> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ValueMetricSender for RecordingSender {
    async fn send_value_metric(&self, metric: &ValueMetric<'_>) -> Result<(), SendError> {
        self.attempts.lock().unwrap().push(SentMetric::from(metric));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match self.fail_prefix {
            Some(prefix) if metric.name.starts_with(prefix) => {
                Err(SendError::Rejected(format!("refusing {}", metric.name)))
            }
            _ => Ok(()),
        }
    }
}

/// Collects the counters of every `message statistics` event.
#[derive(Clone, Default)]
pub(super) struct ReportLog {
    reports: Arc<Mutex<Vec<MessageStatistics>>>,
}

impl ReportLog {
    /// Capture events on this thread until the guard is dropped.
    pub fn install(&self) -> DefaultGuard {
        tracing::subscriber::set_default(tracing_subscriber::registry().with(self.clone()))
    }

    pub fn reports(&self) -> Vec<MessageStatistics> {
        self.reports.lock().unwrap().clone()
    }
}

impl<S: Subscriber> Layer<S> for ReportLog {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut counters = CounterVisitor::default();
        event.record(&mut counters);

        if counters.message.as_deref() == Some("message statistics") {
            self.reports.lock().unwrap().push(counters.stats);
        }
    }
}

#[derive(Default)]
struct CounterVisitor {
    message: Option<String>,
    stats: MessageStatistics,
}

impl Visit for CounterVisitor {
    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "total_sent" => self.stats.total_sent = value,
            "delta_sent" => self.stats.delta_sent = value,
            "total_errors" => self.stats.total_errors = value,
            "delta_errors" => self.stats.delta_errors = value,
            _ => {}
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }
}
