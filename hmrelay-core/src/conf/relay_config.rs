use crate::relay::{DEFAULT_QUEUE_CAPACITY, ForwarderOptions, REPORT_INTERVAL};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_INCOMING_PORT: u16 = 4000;
pub const DEFAULT_INCOMING_HOST: &str = "0.0.0.0";
pub const DEFAULT_SEND_TIMEOUT_MS: u64 = 1000;

/// Resolved relay configuration.
///
/// The PascalCase aliases accept bosh-hm-forwarder style configuration
/// files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RelayConfig {
    /// UDP port of the local Metron agent. Required.
    #[serde(default, alias = "MetronPort")]
    pub metron_port: u16,

    #[serde(default = "default_incoming_port", alias = "IncomingPort")]
    pub incoming_port: u16,

    #[serde(default = "default_incoming_host")]
    pub incoming_host: String,

    /// `0` disables the info endpoint.
    #[serde(default, alias = "InfoPort")]
    pub info_port: u16,

    /// Values `<= 0` disable the debug endpoint.
    #[serde(default, alias = "DebugPort")]
    pub debug_port: i32,

    /// `0` disables the per-send deadline.
    #[serde(default = "default_send_timeout_ms")]
    pub send_timeout_ms: u64,

    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

impl RelayConfig {
    pub fn info_port(&self) -> Option<u16> {
        (self.info_port != 0).then_some(self.info_port)
    }

    pub fn debug_port(&self) -> Option<u16> {
        u16::try_from(self.debug_port).ok().filter(|port| *port != 0)
    }

    pub fn send_timeout(&self) -> Option<Duration> {
        (self.send_timeout_ms != 0).then(|| Duration::from_millis(self.send_timeout_ms))
    }

    pub fn forwarder_options(&self) -> ForwarderOptions {
        ForwarderOptions {
            report_interval: REPORT_INTERVAL,
            send_timeout: self.send_timeout(),
            queue_capacity: self.queue_capacity,
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            metron_port: 0,
            incoming_port: DEFAULT_INCOMING_PORT,
            incoming_host: DEFAULT_INCOMING_HOST.to_string(),
            info_port: 0,
            debug_port: 0,
            send_timeout_ms: DEFAULT_SEND_TIMEOUT_MS,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

fn default_incoming_port() -> u16 {
    DEFAULT_INCOMING_PORT
}

fn default_incoming_host() -> String {
    DEFAULT_INCOMING_HOST.to_string()
}

fn default_send_timeout_ms() -> u64 {
    DEFAULT_SEND_TIMEOUT_MS
}

fn default_queue_capacity() -> usize {
    DEFAULT_QUEUE_CAPACITY
}
