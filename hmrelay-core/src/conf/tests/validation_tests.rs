use crate::conf::{ConfigError, RelayConfig, validate_config};
use std::time::Duration;

fn valid() -> RelayConfig {
    RelayConfig {
        metron_port: 3457,
        ..RelayConfig::default()
    }
}

#[test]
fn default_with_metron_port_is_valid() {
    assert!(validate_config(&valid()).is_ok());
}

#[test]
fn zero_metron_port_is_missing() {
    let cfg = RelayConfig::default();

    assert!(matches!(
        validate_config(&cfg),
        Err(ConfigError::MissingMetronPort)
    ));
}

#[test]
fn debug_port_out_of_range_is_rejected() {
    let cfg = RelayConfig {
        debug_port: 70_000,
        ..valid()
    };

    assert!(matches!(
        validate_config(&cfg),
        Err(ConfigError::InvalidPort {
            field: "debug_port",
            value: 70_000
        })
    ));
}

#[test]
fn negative_debug_port_disables_endpoint() {
    let cfg = RelayConfig {
        debug_port: -1,
        ..valid()
    };

    assert!(validate_config(&cfg).is_ok());
    assert_eq!(cfg.debug_port(), None);
}

#[test]
fn listeners_may_not_share_a_port() {
    let cfg = RelayConfig {
        incoming_port: 8080,
        info_port: 8080,
        ..valid()
    };

    assert!(matches!(
        validate_config(&cfg),
        Err(ConfigError::PortConflict {
            first: "incoming_port",
            second: "info_port",
            port: 8080
        })
    ));
}

#[test]
fn ephemeral_ports_never_conflict() {
    let cfg = RelayConfig {
        incoming_port: 0,
        info_port: 0,
        ..valid()
    };

    assert!(validate_config(&cfg).is_ok());
}

#[test]
fn zero_queue_capacity_is_rejected() {
    let cfg = RelayConfig {
        queue_capacity: 0,
        ..valid()
    };

    assert!(matches!(validate_config(&cfg), Err(ConfigError::EmptyQueue)));
}

#[test]
fn forwarder_options_follow_config() {
    let cfg = RelayConfig {
        send_timeout_ms: 250,
        queue_capacity: 8,
        ..valid()
    };

    let options = cfg.forwarder_options();

    assert_eq!(options.send_timeout, Some(Duration::from_millis(250)));
    assert_eq!(options.queue_capacity, 8);
    assert_eq!(options.report_interval, Duration::from_secs(30));
}
