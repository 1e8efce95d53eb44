use crate::conf::error::ConfigError;
use crate::conf::relay_config::RelayConfig;

pub fn validate_config(config: &RelayConfig) -> Result<(), ConfigError> {
    if config.metron_port == 0 {
        return Err(ConfigError::MissingMetronPort);
    }

    if config.debug_port > i32::from(u16::MAX) {
        return Err(ConfigError::InvalidPort {
            field: "debug_port",
            value: i64::from(config.debug_port),
        });
    }

    if config.queue_capacity == 0 {
        return Err(ConfigError::EmptyQueue);
    }

    let listeners = [
        ("incoming_port", Some(config.incoming_port).filter(|p| *p != 0)),
        ("info_port", config.info_port()),
        ("debug_port", config.debug_port()),
    ];

    for (i, &(first, a)) in listeners.iter().enumerate() {
        for &(second, b) in &listeners[i + 1..] {
            match (a, b) {
                (Some(port), Some(other)) if port == other => {
                    return Err(ConfigError::PortConflict {
                        first,
                        second,
                        port,
                    });
                }
                _ => {}
            }
        }
    }

    Ok(())
}
