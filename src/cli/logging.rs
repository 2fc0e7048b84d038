//! Tracing initialization.

use std::{io, sync::Once};

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static INIT: Once = Once::new();

/// Environment variable holding the log filter, e.g. `GTAA_LOG=gtaa=debug`.
pub const LOG_ENV: &str = "GTAA_LOG";

/// Install the stderr subscriber.
///
/// `GTAA_LOG` wins when set and valid; otherwise `gtaa=warn`, or
/// `gtaa=debug` with `verbose`. Safe to call more than once.
pub fn init_tracing(verbose: bool) {
    INIT.call_once(|| {
        let fallback = if verbose { "gtaa=debug" } else { "gtaa=warn" };
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(io::stderr)
                    .with_target(true),
            )
            .with(filter)
            .init();
    });
}
