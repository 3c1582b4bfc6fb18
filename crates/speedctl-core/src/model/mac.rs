// ── MAC address ──
//
// Client records are joined against the host table by MAC. The device
// isn't consistent about case between the two tables, so both sides are
// normalized before comparing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// MAC address, normalized to lowercase colon-separated format (aa:bb:cc:dd:ee:ff).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct MacAddress(String);

impl MacAddress {
    /// Create a normalized MAC address from any common format.
    /// Accepts colon-separated or dash-separated hex, any case.
    pub fn new(raw: impl AsRef<str>) -> Self {
        let normalized = raw.as_ref().trim().to_lowercase().replace('-', ":");
        Self(normalized)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MacAddress {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn mac_address_normalizes_dashes() {
        let mac = MacAddress::new("AA-BB-CC-DD-EE-FF");
        assert_eq!(mac.as_str(), "aa:bb:cc:dd:ee:ff");
    }

    #[test]
    fn mac_address_normalizes_case() {
        assert_eq!(
            MacAddress::new("AA:BB:CC:DD:EE:FF"),
            MacAddress::new("aa:bb:cc:dd:ee:ff")
        );
    }

    #[test]
    fn mac_address_from_str() {
        let mac: MacAddress = " AA-BB-CC-DD-EE-FF ".parse().unwrap();
        assert_eq!(mac.to_string(), "aa:bb:cc:dd:ee:ff");
    }

    #[test]
    fn default_is_empty() {
        assert!(MacAddress::default().is_empty());
    }
}
