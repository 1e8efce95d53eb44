use crate::ingest::{bind_listener, forward_lines, run_accept_loop};
use pretty_assertions::assert_eq;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::sync::mpsc;

async fn collect(mut rx: mpsc::Receiver<String>) -> Vec<String> {
    let mut out = Vec::new();
    while let Some(line) = rx.recv().await {
        out.push(line);
    }
    out
}

#[tokio::test]
async fn splits_stream_into_lines_in_order() {
    // Arrange
    let (tx, rx) = mpsc::channel(16);
    let input: &[u8] = b"o a 1 1\r\no b 2 2\n\no c 3 3";

    // Act
    let delivered = forward_lines(input, &tx).await.unwrap();
    drop(tx);

    // Assert
    assert_eq!(delivered, 4);
    assert_eq!(collect(rx).await, vec!["o a 1 1", "o b 2 2", "", "o c 3 3"]);
}

#[tokio::test]
async fn invalid_utf8_is_replaced_not_dropped() {
    let (tx, rx) = mpsc::channel(4);
    let input: &[u8] = b"o \xff 1 1\n";

    forward_lines(input, &tx).await.unwrap();
    drop(tx);

    assert_eq!(collect(rx).await, vec!["o \u{FFFD} 1 1"]);
}

#[tokio::test]
async fn long_lines_are_delivered_whole() {
    let (tx, rx) = mpsc::channel(4);
    let tags = "job=api ".repeat(64 * 1024);
    let input = format!("o m 1 1 {tags}\no n 2 2\n");

    forward_lines(input.as_bytes(), &tx).await.unwrap();
    drop(tx);

    let lines = collect(rx).await;
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].len(), "o m 1 1 ".len() + tags.len());
    assert_eq!(lines[1], "o n 2 2");
}

#[tokio::test]
async fn stops_when_pipeline_is_gone() {
    let (tx, rx) = mpsc::channel(4);
    drop(rx);
    let input: &[u8] = b"o a 1 1\no b 2 2\n";

    let delivered = forward_lines(input, &tx).await.unwrap();

    assert_eq!(delivered, 0);
}

#[tokio::test]
async fn accepted_connections_deliver_lines() {
    // Arrange
    let listener = bind_listener("127.0.0.1", 0).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, mut rx) = mpsc::channel(16);
    let accept = tokio::spawn(run_accept_loop(listener, tx));

    // Act
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(b"o system.mem.kb 1 2048 job=api\no system.healthy 2 1\n")
        .await
        .unwrap();
    stream.shutdown().await.unwrap();

    // Assert
    assert_eq!(rx.recv().await.unwrap(), "o system.mem.kb 1 2048 job=api");
    assert_eq!(rx.recv().await.unwrap(), "o system.healthy 2 1");

    drop(rx);
    accept.await.unwrap();
}
