use std::io;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

const CHUNK_SIZE: usize = 1024;

#[derive(Debug)]
pub enum ReceiveOutcome {
    /// Zero-length read.
    Disconnected,
    Failed(io::Error),
    Cancelled,
    /// The output sink stopped accepting status lines.
    OutputFailed(io::Error),
}

/// Drains `reader` and writes one status line per event to `out` until the
/// peer closes, a read fails or `stop` is cancelled.
pub async fn receive_loop<R, W>(reader: &mut R, out: &mut W, stop: &CancellationToken) -> ReceiveOutcome
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buffer = [0; CHUNK_SIZE];

    loop {
        let read = tokio::select! {
            _ = stop.cancelled() => {
                debug!("receiver cancelled");
                return ReceiveOutcome::Cancelled;
            }
            read = reader.read(&mut buffer) => read,
        };

        let (line, outcome) = match read {
            Ok(0) => ("Server disconnected".to_string(), Some(ReceiveOutcome::Disconnected)),
            Ok(n) => (format!("Received: {}", buffer[..n].escape_ascii()), None),
            Err(e) => (format!("Error receiving data: {}", e), Some(ReceiveOutcome::Failed(e))),
        };

        if let Err(e) = emit(out, &line).await {
            warn!("failed to print received data; err = {:?}", e);
            return ReceiveOutcome::OutputFailed(e);
        }

        if let Some(outcome) = outcome {
            return outcome;
        }
    }
}

async fn emit<W: AsyncWrite + Unpin>(out: &mut W, line: &str) -> io::Result<()> {
    out.write_all(line.as_bytes()).await?;
    out.write_all(b"\n").await?;
    out.flush().await
}
