//! # Logging
//!
//! Structured logs with `tracing`, filtered by `RUST_LOG`.
//!
//! ```bash
//! ocean-eats                                     # info (default)
//! RUST_LOG=debug ocean-eats "/track?order=OE-42" # every poll and cart request
//! RUST_LOG=ocean_eats::tracker=debug ocean-eats "/track?order=OE-42"
//! ```
//!
//! With `RUST_LOG=debug` a tracking session looks like:
//!
//! ```text
//! INFO Tracking order order=OE-42 interval=6s
//! INFO Poll task started task="order-tracker" interval=6s
//! DEBUG Tick task="order-tracker" cycle=1
//! WARN Poll failed, keeping last good state order=OE-42 error=...
//! DEBUG Tick task="order-tracker" cycle=2
//! INFO Poll task stopped task="order-tracker" cycles=2
//! INFO Tracker torn down
//! ```

use tracing_subscriber::EnvFilter;

/// Installs a compact fmt subscriber. Defaults to `info` when `RUST_LOG` is unset.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
