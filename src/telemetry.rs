//! Opt-in `tracing` setup for hosts embedding the timeline engine.
//!
//! Layout code only emits events (`debug!` for record and track sizes,
//! `warn!` for skipped tracks); nothing is printed until a subscriber exists.

/// Filter used when `RUST_LOG` is unset: engine events at `info` and above,
/// everything else silent.
pub const DEFAULT_FILTER: &str = "clinical_timeline=info";

/// Installs a compact fmt subscriber filtered by `RUST_LOG` or
/// [`DEFAULT_FILTER`].
///
/// Returns `false` without the `telemetry` feature, or when the host already
/// installed a global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter(DEFAULT_FILTER)
}

/// Like [`init_default_tracing`] with a caller-chosen fallback filter, e.g.
/// `"clinical_timeline::tracks=debug"` while investigating a skipped track.
///
/// `RUST_LOG` still wins when set. A malformed fallback returns `false`.
#[must_use]
pub fn init_tracing_with_filter(fallback_filter: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => match EnvFilter::try_new(fallback_filter) {
                Ok(filter) => filter,
                Err(_) => return false,
            },
        };

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_filter;
        false
    }
}
