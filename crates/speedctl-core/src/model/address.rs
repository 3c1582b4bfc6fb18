// ── External address ──

use serde::Serialize;

use speedctl_api::ParameterValue;

/// Alias of the bonded uplink whose address is the one the internet sees.
pub const PUBLIC_ALIAS: &str = "BOND";

/// IPv4 address of one upstream IP interface (`Device.IP.Interface.<id>`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalAddress {
    pub interface_id: u32,
    pub alias: String,
    pub ipv4: ParameterValue,
}

impl ExternalAddress {
    /// Whether this is the address websites will see.
    pub fn is_public(&self) -> bool {
        self.alias == PUBLIC_ALIAS && !self.ipv4.is_absent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bond_with_address_is_public() {
        let mut addr = ExternalAddress {
            interface_id: 2,
            alias: "BOND".into(),
            ipv4: ParameterValue::Text("203.0.113.7".into()),
        };
        assert!(addr.is_public());
        addr.ipv4 = ParameterValue::Absent;
        assert!(!addr.is_public());
    }
}
