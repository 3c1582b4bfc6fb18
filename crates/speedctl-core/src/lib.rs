//! Domain layer between `speedctl-api` and the CLI.
//!
//! This crate turns flat parameter rows into structured router state:
//!
//! - **[`Router`]** — Facade owning one `QueryClient`. Runs the multi-stage
//!   retrievals ([`wifi_interfaces()`](Router::wifi_interfaces),
//!   [`interface_with_clients()`](Router::interface_with_clients),
//!   [`external_addresses()`](Router::external_addresses),
//!   [`log_entries()`](Router::log_entries)) and dispatches a [`Command`].
//!
//! - **Entity joins** ([`join`]) — Pure functions that build the path list
//!   for each query stage and fold the returned rows into records keyed by
//!   the id at a fixed path segment.
//!
//! - **Log classification** ([`log`]) — Decodes the message-type token of
//!   each device log line into one of twelve [`LogCategory`] values, flags
//!   alert codes, and applies include/exclude filters.
//!
//! - **Watch mode** ([`watch`]) — Cooperative poll loop with a two-second
//!   floor and an external shutdown future.

pub mod command;
pub mod config;
pub mod error;
pub mod join;
pub mod log;
pub mod model;
pub mod router;
pub mod watch;

// ── Primary re-exports ──────────────────────────────────────────────
pub use command::{Command, CommandOutput};
pub use config::{MIN_REFRESH_INTERVAL, RouterConfig, TlsVerification, refresh_interval};
pub use error::CoreError;
pub use log::{LogCategory, LogEntry, LogFilter, Severity};
pub use router::Router;
pub use watch::{WatchExit, watch_interface};

pub use model::{ExternalAddress, MacAddress, Numeric, WifiClient, WifiInterface};
pub use speedctl_api::DEFAULT_HOST;
