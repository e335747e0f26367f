//! Tracing bootstrap for hosts embedding `gantt-rs`.
//!
//! The engine only emits `tracing` events; it never installs a subscriber on
//! its own. Hosts either call `init_default_tracing` or bring their own
//! subscriber and filters (e.g. `RUST_LOG=gantt_rs=trace`).

/// Installs a compact `tracing` subscriber when the `telemetry` feature is enabled.
///
/// The filter is read from `RUST_LOG` and falls back to `gantt_rs=info`.
/// Returns `false` when the feature is disabled or a global subscriber is
/// already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("gantt_rs=info"));

        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
