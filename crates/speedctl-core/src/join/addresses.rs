//! External IPv4 address join.
//!
//! Alias and address of each upstream IP interface are requested together
//! and paired by the interface id in segment 3.

use speedctl_api::{ParameterPath, ParameterRow, ParameterValue};

use super::{entity_id, field_name, text};
use crate::error::CoreError;
use crate::model::ExternalAddress;

/// Upstream IP interfaces (1 is the LAN bridge).
pub const UPSTREAM_IDS: std::ops::RangeInclusive<u32> = 2..=5;

const ID_SEGMENT: usize = 3;
const FIELD_SEGMENT: usize = 4;

/// Alias and first IPv4 address of every upstream interface.
pub fn address_paths() -> Vec<ParameterPath> {
    UPSTREAM_IDS
        .flat_map(|id| {
            [
                ParameterPath::new(format!("Device.IP.Interface.{id}.Alias")),
                ParameterPath::new(format!("Device.IP.Interface.{id}.IPv4Address.1.IPAddress")),
            ]
        })
        .collect()
}

/// Pair alias and address rows by interface id, first sighting order.
pub fn from_rows(rows: &[ParameterRow]) -> Result<Vec<ExternalAddress>, CoreError> {
    let mut addresses: Vec<ExternalAddress> = Vec::new();

    for (path, value) in rows {
        let id = entity_id(path, ID_SEGMENT)?;
        let index = match addresses.iter().position(|a| a.interface_id == id) {
            Some(index) => index,
            None => {
                addresses.push(ExternalAddress {
                    interface_id: id,
                    alias: String::new(),
                    ipv4: ParameterValue::Absent,
                });
                addresses.len() - 1
            }
        };
        let entry = &mut addresses[index];

        match field_name(path, FIELD_SEGMENT) {
            "Alias" => entry.alias = text(value),
            "IPv4Address" => entry.ipv4 = value.clone(),
            _ => {}
        }
    }

    Ok(addresses)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn row(path: &str, value: Option<&str>) -> ParameterRow {
        let value = value.map_or(ParameterValue::Absent, |v| ParameterValue::Text(v.into()));
        (ParameterPath::from(path), value)
    }

    #[test]
    fn paths_pair_alias_with_address() {
        let paths = address_paths();
        assert_eq!(paths.len(), 8);
        assert_eq!(paths[0].as_str(), "Device.IP.Interface.2.Alias");
        assert_eq!(
            paths[1].as_str(),
            "Device.IP.Interface.2.IPv4Address.1.IPAddress"
        );
        assert_eq!(
            paths[7].as_str(),
            "Device.IP.Interface.5.IPv4Address.1.IPAddress"
        );
    }

    #[test]
    fn rows_pair_by_id_not_position() {
        let addresses = from_rows(&[
            row("Device.IP.Interface.3.IPv4Address.1.IPAddress", None),
            row("Device.IP.Interface.2.Alias", Some("BOND")),
            row("Device.IP.Interface.3.Alias", Some("LTE")),
            row("Device.IP.Interface.2.IPv4Address.1.IPAddress", Some("203.0.113.7")),
        ])
        .unwrap();

        assert_eq!(addresses.len(), 2);
        assert_eq!(addresses[0].interface_id, 3);
        assert_eq!(addresses[0].alias, "LTE");
        assert!(addresses[0].ipv4.is_absent());
        assert_eq!(addresses[1].alias, "BOND");
        assert!(addresses[1].is_public());
    }
}
