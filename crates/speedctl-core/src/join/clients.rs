//! Client join for one interface.
//!
//! Stage one reads the interface's association table and creates a client
//! per association index. Stage two walks the global host table: a
//! `PhysAddress` row claims every still-unresolved client with that MAC
//! for its host id, and later rows of that host fill in IP, hostname and
//! the active flag. Rows are applied in the order the device sends them.

use speedctl_api::{ParameterPath, ParameterRow};
use tracing::trace;

use super::{entity_id, field_name, number, text};
use crate::error::CoreError;
use crate::model::{MacAddress, WifiClient};

/// Segments in `Device.WiFi.AccessPoint.<n>.AssociatedDevice.<id>.<field>`.
const ASSOC_ID_SEGMENT: usize = 5;
const ASSOC_FIELD_SEGMENT: usize = 6;

/// Segments in `Device.Hosts.Host.<id>.<field>`.
const HOST_ID_SEGMENT: usize = 3;
const HOST_FIELD_SEGMENT: usize = 4;

/// Host table subtree.
pub const HOST_TABLE: &str = "Device.Hosts.Host.";

/// Stage one: the association subtree of `interface_id`.
pub fn association_paths(interface_id: u32) -> Vec<ParameterPath> {
    vec![ParameterPath::new(format!(
        "Device.WiFi.AccessPoint.{interface_id}.AssociatedDevice."
    ))]
}

/// Build client records from association rows, first sighting order.
pub fn from_associations(rows: &[ParameterRow]) -> Result<Vec<WifiClient>, CoreError> {
    let mut clients: Vec<WifiClient> = Vec::new();

    for (path, value) in rows {
        let id = entity_id(path, ASSOC_ID_SEGMENT)?;
        let index = match clients.iter().position(|c| c.id == id) {
            Some(index) => index,
            None => {
                clients.push(WifiClient::new(id));
                clients.len() - 1
            }
        };
        let client = &mut clients[index];

        match field_name(path, ASSOC_FIELD_SEGMENT) {
            "MACAddress" => client.mac = MacAddress::new(value.text_or_na()),
            "LastDataDownlinkRate" => client.downlink_rate = number(value),
            "LastDataUplinkRate" => client.uplink_rate = number(value),
            "SignalStrength" => client.signal_strength = number(value),
            other => trace!(field = other, %path, "ignoring association field"),
        }
    }

    Ok(clients)
}

/// Stage two: the global host table.
pub fn host_paths() -> Vec<ParameterPath> {
    vec![ParameterPath::from(HOST_TABLE)]
}

/// Fold host-table rows into `clients`.
///
/// A client's `host_list_number` is set on the first MAC match and never
/// reassigned, even if another host row carries the same MAC.
pub fn apply_hosts(clients: &mut [WifiClient], rows: &[ParameterRow]) -> Result<(), CoreError> {
    for (path, value) in rows {
        let host_id = entity_id(path, HOST_ID_SEGMENT)?;

        match field_name(path, HOST_FIELD_SEGMENT) {
            "PhysAddress" => {
                let Some(raw) = value.as_text() else { continue };
                let mac = MacAddress::new(raw);
                for client in clients
                    .iter_mut()
                    .filter(|c| c.host_list_number.is_none() && c.mac == mac)
                {
                    client.host_list_number = Some(host_id);
                }
            }
            "IPAddress" => {
                for client in resolved_to(clients, host_id) {
                    client.ip_address = Some(text(value));
                }
            }
            "HostName" => {
                for client in resolved_to(clients, host_id) {
                    client.host_name = Some(text(value));
                }
            }
            "Active" => {
                for client in resolved_to(clients, host_id) {
                    client.active = value.as_text() == Some("true");
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn resolved_to(clients: &mut [WifiClient], host_id: u32) -> impl Iterator<Item = &mut WifiClient> {
    clients
        .iter_mut()
        .filter(move |c| c.host_list_number == Some(host_id))
}
