pub mod cli;
pub mod connection;
pub mod input;
pub mod protocol;
pub mod receiver;
pub mod sender;
pub mod session;

/// Installs the stderr diagnostics subscriber shared by both binaries.
pub fn init_logging() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::WARN)
        .try_init()
}
