use std::future::Future;
use std::io;

use futures::Stream;
use tokio::io::AsyncWrite;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::connection::{self, Connection};
use crate::receiver::{receive_loop, ReceiveOutcome};
use crate::sender::{send_loop, SendOutcome};

/// How the sender side of a session ended.
#[derive(Debug)]
pub enum Exit {
    Interrupted,
    InputClosed,
    InputFailed(io::Error),
    SendFailed(io::Error),
}

impl From<SendOutcome> for Exit {
    fn from(outcome: SendOutcome) -> Self {
        match outcome {
            SendOutcome::InputClosed => Exit::InputClosed,
            SendOutcome::InputFailed(e) => Exit::InputFailed(e),
            SendOutcome::WriteFailed(e) => Exit::SendFailed(e),
        }
    }
}

/// What the receiver task hands back when it stops.
struct Received<W> {
    outcome: ReceiveOutcome,
    read: OwnedReadHalf,
    out: W,
}

/// The receiver task's final report, available once the session is closed.
#[derive(Debug)]
pub struct Closed<W> {
    /// `None` if the receiver task panicked.
    pub outcome: Option<ReceiveOutcome>,
    pub out: Option<W>,
}

/// A connected stream whose read half is drained by a background task and
/// whose write half stays with the caller.
pub struct Session<W> {
    writer: OwnedWriteHalf,
    receiver: JoinHandle<Received<W>>,
    stop: CancellationToken,
}

impl<W> Session<W>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    /// Spawns the receiver loop; received data and its status lines go to `out`.
    pub fn start(conn: Connection, mut out: W) -> Self {
        let (mut read, writer) = conn.into_split();
        let stop = CancellationToken::new();

        let token = stop.clone();
        let receiver = tokio::spawn(async move {
            let outcome = receive_loop(&mut read, &mut out, &token).await;
            debug!(?outcome, "receiver stopped");
            Received { outcome, read, out }
        });

        Self {
            writer,
            receiver,
            stop,
        }
    }

    /// Sends `lines` until they run out, a write fails, or `interrupt` completes.
    pub async fn relay<S, F>(&mut self, mut lines: S, interrupt: F) -> Exit
    where
        S: Stream<Item = io::Result<String>> + Unpin,
        F: Future<Output = ()>,
    {
        tokio::select! {
            outcome = send_loop(&mut lines, &mut self.writer) => outcome.into(),
            _ = interrupt => Exit::Interrupted,
        }
    }

    /// Stops the receiver and releases the socket. Consumes the session, so
    /// the socket is released exactly once whichever way `relay` ended.
    pub async fn close(self) -> Closed<W> {
        self.stop.cancel();

        match self.receiver.await {
            Ok(Received { outcome, read, out }) => {
                connection::close(Some(read), self.writer).await;
                Closed {
                    outcome: Some(outcome),
                    out: Some(out),
                }
            }
            Err(e) => {
                warn!("receiver task failed; err = {:?}", e);
                connection::close(None, self.writer).await;
                Closed {
                    outcome: None,
                    out: None,
                }
            }
        }
    }
}
