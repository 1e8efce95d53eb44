use crate::conf::RelayConfig;
use crate::info::{InfoGateway, InfoHandler};
use crate::server::relay::start_relay;
use anyhow::{Context, Result};
use pingora::prelude::*;
use pingora::server::Server;

/// Run the relay, and the info server when an info port is configured.
///
/// Blocks for the life of the process.
pub fn run(config: RelayConfig) -> Result<()> {
    use tokio::runtime::Builder;

    // Relay runtime (ingestion + forwarding)
    let relay_rt = Builder::new_multi_thread()
        .thread_name("hmrelay")
        .enable_all()
        .build()
        .context("failed to build relay Tokio runtime")?;

    let relay = relay_rt.block_on(start_relay(&config))?;

    match config.info_port() {
        Some(port) => {
            // Pingora owns its own runtimes.
            let server = build_info_server(&config, port)?;

            // IMPORTANT:
            // - relay_rt must stay in scope so its worker threads live
            // - run_forever blocks the main thread as intended
            server.run_forever();
        }
        None => {
            relay_rt
                .block_on(tokio::signal::ctrl_c())
                .context("failed to listen for shutdown signal")?;

            tracing::info!("shutdown requested");
            relay.abort();
            Ok(())
        }
    }
}

/// Build the Pingora server answering the info endpoint on `port`.
pub fn build_info_server(config: &RelayConfig, port: u16) -> Result<Server> {
    // "None" is required here to truly tell Pingora to use its default settings.
    let mut server = Server::new(None)?;
    server.bootstrap();

    let gateway = InfoGateway::new(InfoHandler::new(config));

    let mut svc = http_proxy_service(&server.configuration, gateway);
    svc.add_tcp(&format!("0.0.0.0:{port}"));

    server.add_service(svc);
    tracing::info!(port, "starting info server");

    Ok(server)
}
