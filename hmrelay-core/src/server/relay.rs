use crate::conf::RelayConfig;
use crate::emit::MetronSender;
use crate::ingest::{bind_listener, run_accept_loop};
use crate::relay::{MessageStatistics, UnitTable, ValueMetricSender, start_message_forwarder};
use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Handle to a running relay (ingestion listener plus forwarder worker).
pub struct RelayHandle {
    ingest_addr: SocketAddr,
    accept: JoinHandle<()>,
    forwarder: JoinHandle<MessageStatistics>,
}

impl RelayHandle {
    /// Address the ingestion listener is bound to.
    pub fn ingest_addr(&self) -> SocketAddr {
        self.ingest_addr
    }

    pub fn abort(&self) {
        self.accept.abort();
        self.forwarder.abort();
    }
}

/// Start the relay, emitting to the Metron agent on `config.metron_port`.
///
/// Must be called from within a Tokio runtime; the tasks it spawns keep
/// running on that runtime.
pub async fn start_relay(config: &RelayConfig) -> Result<RelayHandle> {
    let sender = MetronSender::connect(config.metron_port)
        .await
        .with_context(|| format!("failed to open metron emitter on port {}", config.metron_port))?;

    start_relay_with_sender(config, sender).await
}

/// Start the relay with an arbitrary outbound sender.
pub async fn start_relay_with_sender<S>(config: &RelayConfig, sender: S) -> Result<RelayHandle>
where
    S: ValueMetricSender + 'static,
{
    let listener = bind_listener(&config.incoming_host, config.incoming_port)
        .await
        .with_context(|| {
            format!(
                "could not open the TCP port {}:{}",
                config.incoming_host, config.incoming_port
            )
        })?;
    let ingest_addr = listener.local_addr()?;

    // Unit table is built once and shared read-only.
    let units = Arc::new(UnitTable::system_defaults());
    let (lines, forwarder) = start_message_forwarder(sender, units, config.forwarder_options());
    let accept = tokio::spawn(run_accept_loop(listener, lines));

    tracing::info!(
        %ingest_addr,
        metron_port = config.metron_port,
        "hmrelay initialized"
    );

    Ok(RelayHandle {
        ingest_addr,
        accept,
        forwarder,
    })
}
