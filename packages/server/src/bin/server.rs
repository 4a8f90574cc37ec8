//! Sketchroom relay server.
//!
//! Forwards drawing events between WebSocket clients that joined the same room.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin sketchroom-server -- --port 5000
//! ```

use clap::Parser;
use sketchroom_server::ServerConfig;
use sketchroom_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &config.log_level);

    // Run the server
    if let Err(e) = sketchroom_server::run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
