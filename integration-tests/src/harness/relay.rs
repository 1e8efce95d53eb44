use crate::harness::agent::MetronAgent;
use crate::harness::{CapturedEvent, LogCapture};
use hmrelay_core::conf::RelayConfig;
use hmrelay_core::emit::events::Envelope;
use hmrelay_core::server::{RelayHandle, build_info_server, start_relay};
use reqwest::blocking::{Client, RequestBuilder};
use std::io::Write;
use std::net::TcpStream;
use std::thread;
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;

/// Handle to a running hmrelay test instance.
pub struct TestRelay {
    agent: MetronAgent,
    relay: RelayHandle,
    info_url: Option<String>,
    client: Client,
    // Keeps the relay tasks alive for the life of the test.
    _runtime: Runtime,
}

impl TestRelay {
    /// Start a relay emitting to a fresh fake agent; no info endpoint.
    pub fn start() -> Self {
        Self::start_inner(false)
    }

    /// Start a relay with the info endpoint on a free port.
    pub fn start_with_info() -> Self {
        Self::start_inner(true)
    }

    fn start_inner(with_info: bool) -> Self {
        // Capture must be installed before the relay logs anything.
        LogCapture::global();

        let agent = MetronAgent::bind();
        let info_port = if with_info { free_port() } else { 0 };

        let cfg = RelayConfig {
            metron_port: agent.port(),
            incoming_host: "127.0.0.1".to_string(),
            incoming_port: 0,
            info_port,
            ..RelayConfig::default()
        };

        let runtime = Runtime::new().expect("failed to build test runtime");
        let relay = runtime
            .block_on(start_relay(&cfg))
            .expect("failed to start relay");

        let info_url = cfg.info_port().map(|port| {
            let server = build_info_server(&cfg, port).expect("failed to build info server");

            // Run Pingora in the background
            thread::spawn(move || {
                server.run_forever();
            });

            let addr = format!("127.0.0.1:{port}");
            wait_for_server(&addr);
            format!("http://{addr}")
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(2))
            .build()
            .expect("failed to build client");

        Self {
            agent,
            relay,
            info_url,
            client,
            _runtime: runtime,
        }
    }

    /// Open one monitor connection and write `lines`, newline terminated.
    pub fn send_lines(&self, lines: &[&str]) {
        let mut stream =
            TcpStream::connect(self.relay.ingest_addr()).expect("failed to connect to relay");
        for line in lines {
            stream.write_all(line.as_bytes()).unwrap();
            stream.write_all(b"\n").unwrap();
        }
        stream.flush().unwrap();
    }

    pub fn recv_envelope(&self) -> Option<Envelope> {
        self.agent.recv_envelope()
    }

    /// Convenience helper for GET requests against the info endpoint.
    pub fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(format!("{}{}", self.info_url(), path))
    }

    pub fn post(&self, path: &str) -> RequestBuilder {
        self.client.post(format!("{}{}", self.info_url(), path))
    }

    pub fn events(&self) -> Vec<CapturedEvent> {
        LogCapture::global().events()
    }

    fn info_url(&self) -> &str {
        self.info_url
            .as_deref()
            .expect("relay was started without an info endpoint")
    }
}

/// Poll until the server accepts connections (or panic).
fn wait_for_server(addr: &str) {
    let deadline = Instant::now() + Duration::from_secs(2);

    loop {
        match TcpStream::connect(addr) {
            Ok(_) => return,
            Err(_) => {
                if Instant::now() > deadline {
                    panic!("server failed to start at {}", addr);
                }
                thread::sleep(Duration::from_millis(25));
            }
        }
    }
}

/// Allocate a free port on localhost.
/// This is required to avoid port collisions when running tests in parallel.
fn free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}
