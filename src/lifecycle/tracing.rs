/// Initializes structured logging for the application.
///
/// Filtering is controlled via the `RUST_LOG` environment variable:
/// - `RUST_LOG=info` - normal operation
/// - `RUST_LOG=laundry_flow=debug` - debug this crate only
///
/// Core modules log through the `tracing` facade exclusively; this is the
/// only place a concrete subscriber is chosen, so embedders can skip this
/// call and install their own sink instead.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}
