use std::io;

use tokio::io::AsyncWriteExt;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tracing::debug;

/// One established stream to a remote host/port pair.
pub struct Connection {
    peer: String,
    stream: TcpStream,
}

impl Connection {
    /// Resolves `host` and connects once. No retry, no timeout.
    pub async fn open(host: &str, port: u16) -> io::Result<Connection> {
        let stream = TcpStream::connect((host, port)).await?;
        debug!(local = ?stream.local_addr().ok(), "connected to {}:{}", host, port);

        Ok(Self {
            peer: format!("{}:{}", host, port),
            stream,
        })
    }

    /// `<host>:<port>` as given on the command line.
    pub fn peer(&self) -> &str {
        &self.peer
    }

    pub fn into_split(self) -> (OwnedReadHalf, OwnedWriteHalf) {
        self.stream.into_split()
    }
}

/// Releases the socket. Taking both halves by value means this runs at most
/// once per connection; a failed shutdown (peer already gone) is not an error.
pub async fn close(read: Option<OwnedReadHalf>, mut write: OwnedWriteHalf) {
    if let Err(e) = write.shutdown().await {
        debug!("shutdown: {}", e);
    }

    match read {
        Some(read) => match read.reunite(write) {
            Ok(stream) => drop(stream),
            Err(e) => debug!("halves did not match: {}", e),
        },
        None => drop(write),
    }
}
