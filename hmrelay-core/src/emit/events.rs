//! Dropsonde event envelope, limited to what a value metric needs.
//!
//! Field numbers match the `events` protobuf package understood by Metron
//! agents, so the encoded bytes are wire compatible with them.

use crate::relay;

const NANOS_PER_SECOND: i64 = 1_000_000_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum EventType {
    HttpStartStop = 4,
    LogMessage = 5,
    ValueMetric = 6,
    CounterEvent = 7,
    Error = 8,
    ContainerMetric = 9,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Envelope {
    #[prost(string, required, tag = "1")]
    pub origin: String,
    #[prost(enumeration = "EventType", required, tag = "2")]
    pub event_type: i32,
    #[prost(message, optional, tag = "5")]
    pub value_metric: Option<ValueMetric>,
    /// Nanoseconds since the unix epoch.
    #[prost(int64, optional, tag = "6")]
    pub timestamp: Option<i64>,
    #[prost(string, optional, tag = "13")]
    pub deployment: Option<String>,
    #[prost(string, optional, tag = "14")]
    pub job: Option<String>,
    #[prost(string, optional, tag = "15")]
    pub index: Option<String>,
    #[prost(string, optional, tag = "16")]
    pub ip: Option<String>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ValueMetric {
    #[prost(string, required, tag = "1")]
    pub name: String,
    #[prost(double, required, tag = "2")]
    pub value: f64,
    #[prost(string, required, tag = "3")]
    pub unit: String,
}

impl Envelope {
    pub fn from_value_metric(origin: &str, metric: &relay::ValueMetric<'_>) -> Self {
        Self {
            origin: origin.to_string(),
            event_type: EventType::ValueMetric as i32,
            value_metric: Some(ValueMetric {
                name: metric.name.to_string(),
                value: metric.value,
                unit: metric.unit.to_string(),
            }),
            timestamp: Some(metric.timestamp.saturating_mul(NANOS_PER_SECOND)),
            deployment: Some(metric.deployment.to_string()),
            job: Some(metric.job.to_string()),
            index: Some(metric.index.to_string()),
            ip: Some(String::new()),
        }
    }
}
