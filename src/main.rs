use std::error::Error;

use clap::Parser;
use tokio::signal;
use tracing::warn;

use simple_client::cli::Args;
use simple_client::connection::Connection;
use simple_client::input::stdin_lines;
use simple_client::session::{Exit, Session};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    simple_client::init_logging()?;

    let args = Args::parse();

    let conn = match Connection::open(&args.host, args.port).await {
        Ok(conn) => conn,
        Err(e) => {
            println!("Error: {}", e);
            return Ok(());
        }
    };

    println!("Connected to {}", conn.peer());

    let mut session = Session::start(conn, tokio::io::stdout());

    println!("Enter text to send (Ctrl+C to exit):");

    match session.relay(stdin_lines(), interrupted()).await {
        Exit::Interrupted => println!("\nExiting..."),
        Exit::InputClosed => println!("Error: end of input"),
        Exit::InputFailed(e) | Exit::SendFailed(e) => println!("Error: {}", e),
    }

    session.close().await;

    Ok(())
}

async fn interrupted() {
    if let Err(e) = signal::ctrl_c().await {
        warn!("cannot listen for Ctrl+C; err = {:?}", e);
        std::future::pending::<()>().await;
    }
}
