/// Running delivery counters owned by the forwarder worker.
///
/// `total_*` counters only grow; `delta_*` counters cover the interval since
/// the last report.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MessageStatistics {
    pub total_sent: u64,
    pub delta_sent: u64,
    pub total_errors: u64,
    pub delta_errors: u64,
}

impl MessageStatistics {
    pub fn record_sent(&mut self) {
        self.total_sent += 1;
        self.delta_sent += 1;
    }

    pub fn record_error(&mut self) {
        self.total_errors += 1;
        self.delta_errors += 1;
    }

    /// Snapshot the counters and start a new reporting interval.
    pub fn take_report(&mut self) -> MessageStatistics {
        let report = *self;
        self.delta_sent = 0;
        self.delta_errors = 0;
        report
    }
}
