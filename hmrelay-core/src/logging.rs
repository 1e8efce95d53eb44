use std::net::{Ipv4Addr, SocketAddr};
use tracing::Subscriber;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Initialize the logging system with JSON formatting and environment-based filtering
///
/// This function sets up the logging infrastructure using tracing-subscriber:
/// - Uses environment variables for log level filtering (defaults to "info" if not set)
/// - Configures JSON output format for structured logging
/// - Flattens event fields for cleaner log output
pub fn init_normal_logging() {
    fmt()
        .with_env_filter(default_filter())
        .json()
        .flatten_event(true)
        .init();
}

/// Install logging, optionally serving tokio-console on `debug_port`.
pub fn init_logging(debug_port: Option<u16>) {
    match debug_port {
        Some(port) => init_debug_logging(port),
        // If tokio-console is enabled, DO NOT install the normal subscriber
        None if std::env::var("TOKIO_CONSOLE").is_ok() => init_console_logging(),
        None => init_normal_logging(),
    }
}

fn init_console_logging() {
    console_subscriber::init();
}

fn init_debug_logging(port: u16) {
    debug_subscriber(port).init();

    if cfg!(tokio_unstable) {
        tracing::info!(port, "tokio-console debug endpoint enabled");
    } else {
        tracing::warn!(
            port,
            "built without --cfg tokio_unstable, tokio-console will list no tasks"
        );
    }
}

/// JSON logs plus a tokio-console server bound to `127.0.0.1:<port>`.
///
/// The console server runs on its own thread and starts listening as soon
/// as this returns.
fn debug_subscriber(port: u16) -> impl Subscriber + Send + Sync {
    let console = console_subscriber::ConsoleLayer::builder()
        .server_addr(SocketAddr::from((Ipv4Addr::LOCALHOST, port)))
        .spawn();

    let json = fmt::layer()
        .json()
        .flatten_event(true)
        .with_filter(default_filter());

    tracing_subscriber::registry().with(console).with(json)
}

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}
