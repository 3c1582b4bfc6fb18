//! Message-type decoding.
//!
//! The device writes a fixed-width timestamp before every message, so the
//! type token always sits in the same character window. The window is an
//! external, unversioned contract; it is kept as a constant and never
//! derived from the line.

use std::ops::Range;

use super::{LogCategory, LogEntry, Severity};

/// Character window holding the message-type token (`W005)`, `VPN010`).
pub const TYPE_TOKEN_WINDOW: Range<usize> = 22..28;

/// Codes that escalate a line to [`Severity::Alert`].
const ALERT_CODES: &[(LogCategory, &[&str])] = &[
    // failed device authentication
    (LogCategory::Wifi, &["005"]),
    // no prefix, PPPoE timeout, lost sync
    (LogCategory::Dsl, &["004", "009", "013", "020"]),
    // time not available, sync failed
    (LogCategory::Time, &["000", "102"]),
    // SIM missing, hybrid server unreachable via DSL
    (LogCategory::LteSim, &["001", "002", "210", "213"]),
    (LogCategory::DynamicDns, &["001"]),
    (LogCategory::Voice, &["006"]),
];

/// Decoded message-type token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageType {
    pub prefix: String,
    pub code: String,
}

impl MessageType {
    /// Decode the token window of a raw log line.
    ///
    /// Returns `None` when the line doesn't reach the window.
    pub fn from_line(line: &str) -> Option<Self> {
        let token: String = line
            .chars()
            .skip(TYPE_TOKEN_WINDOW.start)
            .take(TYPE_TOKEN_WINDOW.len())
            .collect();
        Self::from_token(&token)
    }

    /// Decode a bare token: strip the count marker, then split the prefix
    /// off by token length.
    pub fn from_token(token: &str) -> Option<Self> {
        let mut chars: Vec<char> = token.chars().collect();
        if chars.is_empty() {
            return None;
        }

        if chars.last() == Some(&')') {
            chars.pop();
        } else if chars.len() >= 2 && chars[chars.len() - 2] == ')' {
            chars.truncate(chars.len() - 2);
        }

        let prefix_len = match chars.len() {
            4 => 1,
            5 => 2,
            _ => 3,
        }
        .min(chars.len());

        Some(Self {
            prefix: chars[..prefix_len].iter().collect(),
            code: chars[prefix_len..].iter().collect(),
        })
    }

    pub fn category(&self) -> LogCategory {
        match self.prefix.as_str() {
            "EP" => LogCategory::Mail,
            "G" => LogCategory::WebSession,
            "T" | "NT" => LogCategory::Time,
            "V" => LogCategory::Voice,
            "D" => LogCategory::DynamicDns,
            "HA" | "HYB" | "LT" | "SI" => LogCategory::LteSim,
            "R" | "A" | "P" => LogCategory::Dsl,
            "IG" => LogCategory::Igmp,
            "W" => LogCategory::Wifi,
            "VPN" => LogCategory::Vpn,
            "DH" => LogCategory::Dhcp,
            _ => LogCategory::Unclassified,
        }
    }

    pub fn severity(&self) -> Severity {
        let category = self.category();
        let alert = ALERT_CODES
            .iter()
            .any(|(c, codes)| *c == category && codes.contains(&self.code.as_str()));
        if alert { Severity::Alert } else { Severity::Normal }
    }
}

/// Classify one raw log line.
pub fn classify(line: &str) -> LogEntry {
    let (category, severity) = MessageType::from_line(line)
        .map_or((LogCategory::Unclassified, Severity::Normal), |t| {
            (t.category(), t.severity())
        });

    LogEntry {
        line: line.to_owned(),
        category,
        severity,
    }
}
