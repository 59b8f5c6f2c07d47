//! Diagnostic logging
//!
//! Diagnostics (skipped files, git invocations) go through `tracing` to stderr.
//! User-facing progress stays on stdout via `println!`. `RUST_LOG` overrides the
//! default level, which is `warn`, or `debug` with `--verbose`.

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Default level for the crate's own diagnostics
pub fn default_level(verbose: bool) -> Level {
  if verbose { Level::DEBUG } else { Level::WARN }
}

/// Install the global subscriber; later calls are ignored
pub fn init_logging(verbose: bool) {
  INIT.call_once(|| {
    let level = default_level(verbose);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str().to_ascii_lowercase()));

    let fmt_layer = fmt::layer()
      .with_writer(std::io::stderr)
      .with_target(verbose)
      .without_time();

    // A subscriber may already be set (tests); that is fine.
    let _ = tracing_subscriber::registry().with(filter).with(fmt_layer).try_init();
  });
}
