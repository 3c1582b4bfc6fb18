// ── Device log ──
//
// The router's system log (`Device.DeviceInfo.X_T-ONLINE-DE_DeviceLog`)
// arrives as one text blob. Each line carries a message-type token such
// as `W005` or `VPN010`; the prefix picks one of twelve categories and a
// few specific codes are escalated to alerts.

pub mod classify;
pub mod filter;

use std::str::FromStr;

use serde::Serialize;
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::error::CoreError;

pub use classify::{MessageType, TYPE_TOKEN_WINDOW, classify};
pub use filter::{LogFilter, select};

/// Parameter holding the log text.
pub const DEVICE_LOG_PATH: &str = "Device.DeviceInfo.X_T-ONLINE-DE_DeviceLog";

/// Classification bucket of a log line.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, Serialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum LogCategory {
    Mail,
    WebSession,
    Time,
    Voice,
    DynamicDns,
    LteSim,
    Dsl,
    Igmp,
    Wifi,
    Vpn,
    Dhcp,
    Unclassified,
}

impl LogCategory {
    /// Short key used in filter specs (`-lf in w`, `--exclude dh,wui`).
    pub fn key(self) -> &'static str {
        match self {
            Self::Mail => "e",
            Self::WebSession => "wui",
            Self::Time => "t",
            Self::Voice => "v",
            Self::DynamicDns => "dd",
            Self::LteSim => "l",
            Self::Dsl => "d",
            Self::Igmp => "i",
            Self::Wifi => "w",
            Self::Vpn => "vpn",
            Self::Dhcp => "dh",
            Self::Unclassified => "u",
        }
    }

    /// Human description for help output.
    pub fn description(self) -> &'static str {
        match self {
            Self::Mail => "E-Mail notifications",
            Self::WebSession => "Logins and session timeouts in the web interface",
            Self::Time => "Time synchronisation",
            Self::Voice => "Voice, telephony",
            Self::DynamicDns => "Dynamic DNS",
            Self::LteSim => "LTE and SIM card",
            Self::Dsl => "DSL line and configuration service",
            Self::Igmp => "IGMP",
            Self::Wifi => "WiFi",
            Self::Vpn => "VPN",
            Self::Dhcp => "DHCP",
            Self::Unclassified => "Unclassified",
        }
    }

    /// All twelve categories, in presentation order.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }
}

impl FromStr for LogCategory {
    type Err = CoreError;

    /// Accepts the short key or the full kebab-case name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::iter()
            .find(|c| c.key() == wanted || c.to_string() == wanted)
            .ok_or_else(|| CoreError::ValidationFailed {
                message: format!(
                    "unknown log category '{s}' (expected one of: {})",
                    Self::iter().map(Self::key).collect::<Vec<_>>().join(", ")
                ),
            })
    }
}

/// Whether a line is a routine message or one worth flagging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Normal,
    Alert,
}

/// One classified log line. Recomputed on every render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub line: String,
    pub category: LogCategory,
    pub severity: Severity,
}
