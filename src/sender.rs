use std::io;

use futures::{Stream, StreamExt};
use tokio::io::{AsyncWrite, AsyncWriteExt};

#[derive(Debug)]
pub enum SendOutcome {
    InputClosed,
    InputFailed(io::Error),
    WriteFailed(io::Error),
}

/// Writes every line from `lines` to `writer` as UTF-8, without a terminator.
pub async fn send_loop<S, W>(lines: &mut S, writer: &mut W) -> SendOutcome
where
    S: Stream<Item = io::Result<String>> + Unpin,
    W: AsyncWrite + Unpin,
{
    while let Some(line) = lines.next().await {
        let line = match line {
            Ok(line) => line,
            Err(e) => return SendOutcome::InputFailed(e),
        };

        if let Err(e) = send_line(writer, &line).await {
            return SendOutcome::WriteFailed(e);
        }
    }

    SendOutcome::InputClosed
}

async fn send_line<W: AsyncWrite + Unpin>(writer: &mut W, line: &str) -> io::Result<()> {
    // write_all retries short writes until the whole line is out
    writer.write_all(line.as_bytes()).await?;
    writer.flush().await
}
