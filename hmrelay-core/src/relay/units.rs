use std::collections::HashMap;

/// Unit reported for event names with no registered mapping.
pub const UNKNOWN_UNIT: &str = "Unknown";

const SYSTEM_UNITS: &[(&str, &str)] = &[
    ("system.healthy", "b"),
    ("system.load.1m", "Load"),
    ("system.cpu.user", "Load"),
    ("system.cpu.sys", "Load"),
    ("system.cpu.wait", "Load"),
    ("system.disk.system.percent", "Percent"),
    ("system.disk.system.inode_percent", "Percent"),
    ("system.mem.percent", "Percent"),
    ("system.swap.percent", "Percent"),
    ("system.disk.ephemeral.percent", "Percent"),
    ("system.disk.ephemeral.inode_percent", "Percent"),
    ("system.disk.persistent.percent", "Percent"),
    ("system.disk.persistent.inode_percent", "Percent"),
    ("system.mem.kb", "Kb"),
    ("system.swap.kb", "Kb"),
];

/// Immutable event name -> unit lookup.
///
/// Built once at startup and shared read-only (behind an `Arc`) with the
/// forwarder.
#[derive(Debug, Clone)]
pub struct UnitTable {
    units: HashMap<&'static str, &'static str>,
}

impl UnitTable {
    /// Table of the system metrics emitted by the health monitor agent.
    pub fn system_defaults() -> Self {
        Self {
            units: SYSTEM_UNITS.iter().copied().collect(),
        }
    }

    /// Returns the unit for `event_name` and whether it was found.
    ///
    /// Unknown names resolve to [`UNKNOWN_UNIT`] with `false`.
    pub fn lookup(&self, event_name: &str) -> (&'static str, bool) {
        match self.units.get(event_name) {
            Some(unit) => (*unit, true),
            None => (UNKNOWN_UNIT, false),
        }
    }
}

impl Default for UnitTable {
    fn default() -> Self {
        Self::system_defaults()
    }
}
