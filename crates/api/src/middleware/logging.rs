//! Tracing subscriber setup.
//!
//! The output format is config-driven: `json` for machine-ingested logs in
//! deployment, anything else falls back to a human-readable pretty format
//! for local runs. Request completion lines come from the trace-id
//! middleware, so no span-close events are emitted here.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` overrides the configured level when set. Calling this more
/// than once is a no-op, which lets tests initialize logging freely.
pub fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.format == "json" {
        let _ = registry
            .with(fmt::layer().json().with_target(true).with_current_span(true))
            .try_init();
    } else {
        let _ = registry.with(fmt::layer().pretty().with_target(true)).try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_tolerates_repeat_calls() {
        let config = LoggingConfig::default();
        init_logging(&config);
        init_logging(&config);

        let mut pretty = LoggingConfig::default();
        pretty.format = "pretty".to_string();
        init_logging(&pretty);
    }
}
