use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Diagnostics to stderr. `RUST_LOG` wins over the configured level.
pub fn init_standard_tracing(crate_name: &str, level: &str) {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{crate_name}={level}").into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(false)
                .with_line_number(false),
        )
        .try_init();
}
