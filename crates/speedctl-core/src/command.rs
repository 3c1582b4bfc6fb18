// ── Command contract ──
//
// The closed set of read operations a front end can ask for. Each variant
// maps to one `Router` retrieval and yields the matching `CommandOutput`.

use serde::Serialize;

use crate::log::{LogEntry, LogFilter};
use crate::model::{ExternalAddress, WifiInterface};

/// A read request against the router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// All WiFi interfaces with their radio details.
    ShowInterfaces,
    /// One interface plus its active clients.
    ShowInterfaceDetail(u32),
    /// Addresses of the upstream IP interfaces.
    ShowExternalIp,
    /// Newest-first device log, bounded by `count` (negative = all).
    ShowLog { count: i64, filter: LogFilter },
}

/// Result of a [`Command`].
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CommandOutput {
    Interfaces(Vec<WifiInterface>),
    InterfaceDetail(WifiInterface),
    ExternalAddresses(Vec<ExternalAddress>),
    Log(Vec<LogEntry>),
}

