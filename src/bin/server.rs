use std::error::Error;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::warn;

use simple_client::cli::ServerArgs;
use simple_client::protocol::serve;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    simple_client::init_logging()?;

    let args = ServerArgs::parse();

    let listener = TcpListener::bind(("0.0.0.0", args.port)).await?;

    println!("Serving on port {}", args.port);

    loop {
        let (stream, addr) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!("failed to accept connection; err = {:?}", e);
                continue;
            }
        };

        tokio::spawn(async move {
            println!("peer {} connected", addr);
            if let Err(e) = serve(stream).await {
                warn!("failed to process connection {}; err = {:?}", addr, e);
            }
            println!("peer {} done", addr);
        });
    }
}
