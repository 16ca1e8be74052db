use tracing_subscriber::EnvFilter;

/// Initialize tracing for the crate at `level` (`warn`, `info`, `debug`, ...).
///
/// `RUST_LOG` overrides it if set.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("villa_booking={level}")));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
