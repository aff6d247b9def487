//! Logging setup
//!
//! The engine only emits `tracing` events; binaries decide where they go.
//! `RUST_LOG` overrides the default filter, e.g.
//! `RUST_LOG=fps_rig_engine::physics=trace`.
//!
//! Levels used across the engine:
//! - `info`: jumps, landings, door and keycard events, streamed geometry
//! - `debug`: config loading, index construction, ground transitions
//! - `trace`: per-tick pose and per-contact resolution
//! - `warn`: dropped input samples and skipped ticks

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a global fmt subscriber.
///
/// `default_level` is used when `RUST_LOG` is unset or invalid. Returns
/// `false` if a global subscriber was already installed.
pub fn init_logging(default_level: &str) -> bool {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .try_init()
        .is_ok()
}
