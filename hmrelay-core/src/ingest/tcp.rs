use std::io;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

/// Pause after a failed accept so fd exhaustion does not spin the loop.
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// Bind the TCP listener the health monitor connects to.
///
/// # Errors
/// Returns error if binding fails
pub async fn bind_listener(host: &str, port: u16) -> io::Result<TcpListener> {
    let listen_addr = format!("{host}:{port}");
    let listener = TcpListener::bind(&listen_addr).await?;

    tracing::info!(addr = %listener.local_addr()?, "listening for monitor lines");

    Ok(listener)
}

/// Accept connections and feed each one's lines into `lines`.
///
/// Every connection gets its own reader task, so lines keep their order
/// within a connection but may interleave across connections. Returns once
/// the consumer side of `lines` has gone away.
pub async fn run_accept_loop(listener: TcpListener, lines: mpsc::Sender<String>) {
    loop {
        tokio::select! {
            _ = lines.closed() => {
                tracing::info!("pipeline input closed, stopping accept loop");
                return;
            }

            accept_result = listener.accept() => match accept_result {
                Ok((stream, peer)) => {
                    tracing::debug!(%peer, "monitor connected");
                    let lines = lines.clone();

                    tokio::spawn(async move {
                        match forward_lines(stream, &lines).await {
                            Ok(count) => tracing::debug!(%peer, lines = count, "monitor disconnected"),
                            Err(e) => tracing::warn!(%peer, error = %e, "failed reading from monitor"),
                        }
                    });
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to accept connection");
                    tokio::time::sleep(ACCEPT_ERROR_BACKOFF).await;
                }
            }
        }
    }
}

/// Split `reader` on `\n` and push every line, in order, into `lines`.
///
/// A trailing `\r` is dropped and invalid UTF-8 is replaced rather than
/// rejected. Line length is not capped: a line is buffered until its `\n`
/// or end of stream. Returns the number of lines delivered.
pub async fn forward_lines<R>(reader: R, lines: &mpsc::Sender<String>) -> io::Result<u64>
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::with_capacity(256);
    let mut delivered = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            return Ok(delivered);
        }

        if lines.send(line_text(&buf)).await.is_err() {
            tracing::debug!("pipeline input closed, dropping connection");
            return Ok(delivered);
        }
        delivered += 1;
    }
}

fn line_text(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}
