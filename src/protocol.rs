//! The message protocol answered by the companion server.
//!
//! After accepting a connection the server sends [`GREETING`]. A `^` opens a
//! message and a `$` closes it; every byte inside a message is sent back
//! plus one. Bytes outside a message are dropped.

use std::io;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

pub const GREETING: &[u8] = b"*";

const MSG_START: u8 = b'^';
const MSG_END: u8 = b'$';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum State {
    #[default]
    WaitForMsg,
    InMsg,
}

/// Per-connection protocol state. Messages may span any number of reads.
#[derive(Debug, Default)]
pub struct Processor {
    state: State,
}

impl Processor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes one chunk and returns the bytes to send back.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<u8> {
        let mut reply = Vec::new();

        for &byte in chunk {
            match self.state {
                State::WaitForMsg => {
                    if byte == MSG_START {
                        self.state = State::InMsg;
                    }
                }
                State::InMsg => {
                    if byte == MSG_END {
                        self.state = State::WaitForMsg;
                    } else {
                        reply.push(byte.wrapping_add(1));
                    }
                }
            }
        }

        reply
    }

    pub fn in_message(&self) -> bool {
        self.state == State::InMsg
    }
}

/// Runs the protocol on one connection until the peer closes it.
pub async fn serve<S>(mut stream: S) -> io::Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    stream.write_all(GREETING).await?;

    let mut processor = Processor::new();
    let mut buffer = [0; 1024];

    loop {
        let n = stream.read(&mut buffer).await?;
        if n == 0 {
            return Ok(());
        }

        let reply = processor.feed(&buffer[..n]);
        if !reply.is_empty() {
            stream.write_all(&reply).await?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_inside_a_message_are_incremented() {
        let mut p = Processor::new();
        assert_eq!(p.feed(b"^abc$"), b"bcd");
        assert!(!p.in_message());
    }

    #[test]
    fn bytes_outside_a_message_are_ignored() {
        let mut p = Processor::new();
        assert_eq!(p.feed(b"hello$world"), b"");
        assert_eq!(p.feed(b"xx^1$yy"), b"2");
    }

    #[test]
    fn state_carries_across_chunks() {
        let mut p = Processor::new();
        assert_eq!(p.feed(b"ab^c"), b"d");
        assert!(p.in_message());
        assert_eq!(p.feed(b"de"), b"ef");
        assert_eq!(p.feed(b"f$g"), b"g");
        assert!(!p.in_message());
    }

    #[test]
    fn caret_inside_a_message_is_data() {
        let mut p = Processor::new();
        assert_eq!(p.feed(b"^^$"), b"_");
    }

    #[tokio::test]
    async fn serve_greets_then_answers() {
        let (client, server) = tokio::io::duplex(64);
        let server = tokio::spawn(serve(server));

        let (mut rd, mut wr) = tokio::io::split(client);
        wr.write_all(b"x^hi$").await.unwrap();
        wr.shutdown().await.unwrap();

        let mut reply = Vec::new();
        rd.read_to_end(&mut reply).await.unwrap();
        assert_eq!(reply, b"*ij");
        server.await.unwrap().unwrap();
    }

    #[test]
    fn increment_wraps() {
        let mut p = Processor::new();
        assert_eq!(p.feed(&[MSG_START, 0xff, MSG_END]), [0x00]);
    }
}
