//! Tracing subscriber setup for the Sketchroom binaries.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence when set. Otherwise the binary's own crate and
/// `tower_http` are logged at `default_level`.
///
/// # Arguments
///
/// * `bin_name` - The binary name (typically `env!("CARGO_BIN_NAME")`)
/// * `default_level` - Level used when `RUST_LOG` is not set (e.g. `"debug"`)
pub fn setup_logger(bin_name: &str, default_level: &str) {
    let crate_target = bin_name.replace('-', "_");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "{crate_target}={default_level},sketchroom_server={default_level},sketchroom_client={default_level},tower_http={default_level}"
        )
        .into()
    });

    // try_init: tests may install a subscriber more than once
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init();
}
