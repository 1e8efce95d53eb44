use crate::relay::{UNKNOWN_UNIT, UnitTable};

#[test]
fn known_system_metrics_resolve_to_their_unit() {
    let table = UnitTable::system_defaults();

    assert_eq!(table.lookup("system.mem.kb"), ("Kb", true));
    assert_eq!(table.lookup("system.swap.kb"), ("Kb", true));
    assert_eq!(table.lookup("system.load.1m"), ("Load", true));
    assert_eq!(table.lookup("system.cpu.wait"), ("Load", true));
    assert_eq!(table.lookup("system.healthy"), ("b", true));
    assert_eq!(
        table.lookup("system.disk.persistent.inode_percent"),
        ("Percent", true)
    );
}

#[test]
fn unknown_metric_resolves_to_sentinel() {
    let table = UnitTable::system_defaults();

    assert_eq!(table.lookup("totally.unknown.metric"), ("Unknown", false));
    assert_eq!(table.lookup(""), (UNKNOWN_UNIT, false));
}

#[test]
fn lookup_is_case_sensitive() {
    let table = UnitTable::default();

    assert_eq!(table.lookup("SYSTEM.MEM.KB"), (UNKNOWN_UNIT, false));
}

#[test]
fn default_table_covers_every_system_metric() {
    let table = UnitTable::default();
    let names = [
        "system.healthy",
        "system.load.1m",
        "system.cpu.user",
        "system.cpu.sys",
        "system.cpu.wait",
        "system.disk.system.percent",
        "system.disk.system.inode_percent",
        "system.mem.percent",
        "system.swap.percent",
        "system.disk.ephemeral.percent",
        "system.disk.ephemeral.inode_percent",
        "system.disk.persistent.percent",
        "system.disk.persistent.inode_percent",
        "system.mem.kb",
        "system.swap.kb",
    ];

    for name in names {
        assert!(table.lookup(name).1, "{name} should have a unit");
    }
}
