//! SableChess - interactive console entry point
//!
//! Runs the text front-end against the engine core. Set RUST_LOG (e.g.
//! RUST_LOG=sable_chess=debug) for search telemetry.

use sable_chess::cli::Console;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    Console::new().run();
}
