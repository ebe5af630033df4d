use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "DentalScheduler";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Overrides the database file location.
pub const DB_PATH_ENV: &str = "DENTAL_SCHEDULER_DB";
/// Overrides the HTTP listen address, e.g. `0.0.0.0:8080`.
pub const BIND_ADDR_ENV: &str = "DENTAL_SCHEDULER_ADDR";

pub const DEFAULT_PORT: u16 = 8080;

/// Get the application data directory
/// ~/DentalScheduler/ on all platforms; the working directory when no
/// home directory can be determined.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// SQLite file holding the appointment book.
pub fn database_path() -> PathBuf {
    match std::env::var_os(DB_PATH_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => app_data_dir().join("appointments.db"),
    }
}

/// Listen address for the HTTP API. Loopback unless overridden.
pub fn bind_addr() -> SocketAddr {
    parse_bind_addr(std::env::var(BIND_ADDR_ENV).ok().as_deref())
}

fn parse_bind_addr(raw: Option<&str>) -> SocketAddr {
    let fallback = SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT));
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => fallback,
        Some(s) => s.parse().unwrap_or_else(|_| {
            tracing::warn!(value = s, "Invalid {BIND_ADDR_ENV}, using {fallback}");
            fallback
        }),
    }
}

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "info,dental_scheduler_lib=debug"
}
