//! Log filter and subscriber setup for the binary.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Directives used when `RUST_LOG` is unset, empty or malformed.
pub const DEFAULT_FILTER: &str = "cruise=info,cruise_core=info";

/// Builds the filter from a raw `RUST_LOG` value. Directives given there are
/// used as is; the defaults only apply when nothing usable was given.
pub fn env_filter(raw: Option<&str>) -> EnvFilter {
    raw.map(str::trim)
        .filter(|directives| !directives.is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

pub fn init() {
    let raw = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(env_filter(raw.as_deref()))
        .init();
}
