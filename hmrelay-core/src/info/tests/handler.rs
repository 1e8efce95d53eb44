use crate::conf::RelayConfig;
use crate::info::{InfoEndpoint, InfoHandler};

#[test]
fn parses_info_path_only() {
    assert_eq!("/info".parse::<InfoEndpoint>(), Ok(InfoEndpoint::Info));
    assert!("/info/".parse::<InfoEndpoint>().is_err());
    assert!("/".parse::<InfoEndpoint>().is_err());
    assert!("/admin/stats".parse::<InfoEndpoint>().is_err());
}

#[test]
fn info_reports_identity_and_ports() {
    // Arrange
    let cfg = RelayConfig {
        metron_port: 3457,
        incoming_port: 4001,
        ..RelayConfig::default()
    };
    let handler = InfoHandler::new(&cfg);

    // Act
    let info = handler.info();

    // Assert
    assert_eq!(info.name, "hmrelay");
    assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
    assert_eq!(info.incoming_port, 4001);
    assert_eq!(info.metron_port, 3457);
    assert!(info.uptime_seconds < 5);
}

#[test]
fn info_serializes_as_flat_json() {
    let handler = InfoHandler::new(&RelayConfig::default());

    let json = serde_json::to_value(handler.info()).unwrap();

    assert!(json.get("uptime_seconds").is_some());
    assert_eq!(json["name"], "hmrelay");
}
