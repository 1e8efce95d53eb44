use crate::emit::events::Envelope;
use crate::relay::{SendError, ValueMetric, ValueMetricSender};
use async_trait::async_trait;
use prost::Message;
use std::io;
use std::net::{Ipv4Addr, SocketAddr};
use tokio::net::UdpSocket;

/// Origin stamped on every envelope.
pub const FORWARDER_ORIGIN: &str = "bosh-hm-forwarder";

/// Ships value metrics to a local Metron agent, one envelope per datagram.
#[derive(Debug)]
pub struct MetronSender {
    socket: UdpSocket,
}

impl MetronSender {
    /// Emit to the agent listening on `127.0.0.1:<port>`.
    pub async fn connect(port: u16) -> io::Result<Self> {
        Self::connect_to(SocketAddr::from((Ipv4Addr::LOCALHOST, port))).await
    }

    pub async fn connect_to(target: SocketAddr) -> io::Result<Self> {
        let bind_addr: SocketAddr = if target.is_ipv4() {
            (Ipv4Addr::LOCALHOST, 0).into()
        } else {
            (std::net::Ipv6Addr::LOCALHOST, 0).into()
        };

        let socket = UdpSocket::bind(bind_addr).await?;
        socket.connect(target).await?;

        tracing::info!(%target, origin = FORWARDER_ORIGIN, "metron emitter ready");

        Ok(Self { socket })
    }
}

#[async_trait]
impl ValueMetricSender for MetronSender {
    async fn send_value_metric(&self, metric: &ValueMetric<'_>) -> Result<(), SendError> {
        let envelope = Envelope::from_value_metric(FORWARDER_ORIGIN, metric);

        let mut buf = Vec::with_capacity(envelope.encoded_len());
        envelope.encode(&mut buf)?;

        self.socket.send(&buf).await?;
        Ok(())
    }
}
