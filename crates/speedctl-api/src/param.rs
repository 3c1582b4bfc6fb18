// ── Parameter identity types ──
//
// Every query is keyed by a dot-delimited parameter path and answered
// with a value that may be absent. These two types carry that contract
// from the wire up into the joiners.

use std::fmt;

use serde::{Serialize, Serializer};

/// Rendering of an absent value.
pub const NOT_AVAILABLE: &str = "NA";

// ── ParameterPath ───────────────────────────────────────────────────

/// Dot-delimited device attribute, e.g. `Device.WiFi.SSID.3.BSSID`.
///
/// The device echoes the exact path it was asked for, so the path is
/// both the request key and the response correlation key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ParameterPath(String);

impl ParameterPath {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The dot-separated segment at `index`, if present.
    pub fn segment(&self, index: usize) -> Option<&str> {
        self.0.split('.').nth(index)
    }

    /// The segment at `index` parsed as a numeric entity id.
    pub fn id_at(&self, index: usize) -> Option<u32> {
        self.segment(index)?.parse().ok()
    }
}

impl fmt::Display for ParameterPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ParameterPath {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ParameterPath {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ── ParameterValue ──────────────────────────────────────────────────

/// Value returned for one parameter.
///
/// `Absent` is what the device sends as an empty or self-closing
/// `<Value/>` node. It is a regular answer, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ParameterValue {
    Text(String),
    #[default]
    Absent,
}

impl ParameterValue {
    /// The text, if the device sent any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Absent => None,
        }
    }

    /// The text, or [`NOT_AVAILABLE`] when absent.
    pub fn text_or_na(&self) -> &str {
        self.as_text().unwrap_or(NOT_AVAILABLE)
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text_or_na())
    }
}

impl Serialize for ParameterValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(s) => serializer.serialize_str(s),
            Self::Absent => serializer.serialize_none(),
        }
    }
}

/// One decoded `ParameterValueStruct`.
pub type ParameterRow = (ParameterPath, ParameterValue);
