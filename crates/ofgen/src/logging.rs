//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEBUG_DIRECTIVES: &str = "ofgen=debug,ofgen_typegen=debug,ofgen_manifest=debug";

/// Filter directives: `RUST_LOG` wins, then `--debug`, then warnings only.
pub fn filter(debug: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug {
            EnvFilter::new(DEBUG_DIRECTIVES)
        } else {
            EnvFilter::new("warn")
        }
    })
}

/// Install the global subscriber, logging to stderr.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init(debug: bool) {
    let _ = tracing_subscriber::registry()
        .with(filter(debug))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(debug)
                .compact(),
        )
        .try_init();
}
