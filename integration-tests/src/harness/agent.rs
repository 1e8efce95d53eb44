use hmrelay_core::emit::events::Envelope;
use prost::Message;
use std::net::UdpSocket;
use std::time::Duration;

/// Stand-in for the local Metron agent: a UDP socket decoding envelopes.
pub struct MetronAgent {
    socket: UdpSocket,
}

impl MetronAgent {
    pub fn bind() -> Self {
        let socket = UdpSocket::bind("127.0.0.1:0").expect("failed to bind agent socket");
        socket
            .set_read_timeout(Some(Duration::from_secs(2)))
            .expect("failed to set agent read timeout");
        Self { socket }
    }

    pub fn port(&self) -> u16 {
        self.socket.local_addr().unwrap().port()
    }

    /// Next envelope, or `None` when nothing arrives before the read timeout.
    pub fn recv_envelope(&self) -> Option<Envelope> {
        let mut buf = [0u8; 4096];
        let len = self.socket.recv(&mut buf).ok()?;
        Some(Envelope::decode(&buf[..len]).expect("agent received an undecodable envelope"))
    }
}
