use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// A single value metric ready to be shipped to the metrics backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueMetric<'a> {
    pub deployment: &'a str,
    pub job: &'a str,
    pub index: &'a str,
    pub name: &'a str,
    /// Seconds since the unix epoch.
    pub timestamp: i64,
    pub value: f64,
    pub unit: &'a str,
}

#[derive(Debug, Error)]
pub enum SendError {
    #[error("i/o error sending value metric: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode value metric: {0}")]
    Encode(#[from] prost::EncodeError),

    #[error("send did not complete within {0:?}")]
    Timeout(Duration),

    #[error("value metric rejected: {0}")]
    Rejected(String),
}

/// Outbound capability the forwarder depends on.
///
/// The forwarder counts any `Err` as a failed delivery and never retries.
#[async_trait]
pub trait ValueMetricSender: Send + Sync {
    async fn send_value_metric(&self, metric: &ValueMetric<'_>) -> Result<(), SendError>;
}
