use clap::Parser;

/// Interactive TCP client: prints what the server sends, sends what you type
#[derive(Parser, Debug)]
#[command(name = "simple-client")]
pub struct Args {
    /// Server host name or address
    pub host: String,

    /// Server port
    pub port: u16,
}

/// Server that answers the `^...$` message protocol
#[derive(Parser, Debug)]
#[command(name = "server")]
pub struct ServerArgs {
    /// Port to listen on
    #[arg(default_value_t = 9090)]
    pub port: u16,
}
