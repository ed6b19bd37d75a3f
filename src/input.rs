use std::io::{self, BufRead};
use std::thread;

use futures::Stream;
use tokio::sync::mpsc;

type Tx = mpsc::UnboundedSender<io::Result<String>>;

/// Lines of standard input with their terminators stripped.
///
/// Reading happens on a dedicated OS thread, since a blocking terminal read
/// cannot be cancelled and would otherwise hold up runtime shutdown. The
/// thread is left behind when the process exits.
pub fn stdin_lines() -> impl Stream<Item = io::Result<String>> + Unpin + Send {
    let (tx, rx) = mpsc::unbounded_channel();

    thread::spawn(move || forward_lines(io::stdin().lock(), tx));

    lines_from(rx)
}

fn forward_lines<R: BufRead>(input: R, tx: Tx) {
    for line in input.lines() {
        let failed = line.is_err();
        if tx.send(line).is_err() || failed {
            break;
        }
    }
}

fn lines_from(
    mut rx: mpsc::UnboundedReceiver<io::Result<String>>,
) -> impl Stream<Item = io::Result<String>> + Unpin + Send {
    futures::stream::poll_fn(move |cx| rx.poll_recv(cx))
}
