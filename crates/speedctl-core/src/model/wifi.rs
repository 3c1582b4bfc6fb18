// ── WiFi domain types ──

use serde::Serialize;

use super::mac::MacAddress;
use super::numeric::Numeric;

/// Signal strength below which a client counts as weak.
pub const WEAK_SIGNAL_DBM: i32 = -70;

/// One router-side WiFi interface (`Device.WiFi.SSID.<id>`).
///
/// Radio and security fields stay `None` while the interface is down;
/// the device doesn't expose them and they are never requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WifiInterface {
    /// Router-assigned interface number (1..7).
    pub id: u32,
    pub up: bool,
    pub ssid: String,
    pub bssid: String,
    pub frequency_band: Option<String>,
    pub channel: Option<Numeric<u32>>,
    /// Transmit power in percent; `-1` means automatic.
    pub transmit_power: Option<Numeric<i32>>,
    /// Maximum data rate in Mbit/s.
    pub max_bit_rate: Option<Numeric<u32>>,
    pub encryption: Option<String>,
    /// Associated clients. Empty unless explicitly fetched.
    pub clients: Vec<WifiClient>,
}

impl WifiInterface {
    pub fn new(id: u32, up: bool) -> Self {
        Self {
            id,
            up,
            ssid: String::new(),
            bssid: String::new(),
            frequency_band: None,
            channel: None,
            transmit_power: None,
            max_bit_rate: None,
            encryption: None,
            clients: Vec::new(),
        }
    }

    /// Clients the host table reports as active.
    pub fn active_clients(&self) -> impl Iterator<Item = &WifiClient> {
        self.clients.iter().filter(|c| c.active)
    }
}

/// A station associated with one interface
/// (`Device.WiFi.AccessPoint.<n>.AssociatedDevice.<id>`).
///
/// Identity fields come from a second join against `Device.Hosts.Host`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WifiClient {
    /// Association index within the interface.
    pub id: u32,
    pub mac: MacAddress,
    /// Signal strength in dBm (negative).
    pub signal_strength: Option<i32>,
    /// Last downlink rate in kbit/s.
    pub downlink_rate: Option<u32>,
    /// Last uplink rate in kbit/s.
    pub uplink_rate: Option<u32>,
    /// Row number in the host table. Assigned at most once.
    pub host_list_number: Option<u32>,
    pub ip_address: Option<String>,
    pub host_name: Option<String>,
    pub active: bool,
}

impl WifiClient {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            mac: MacAddress::default(),
            signal_strength: None,
            downlink_rate: None,
            uplink_rate: None,
            host_list_number: None,
            ip_address: None,
            host_name: None,
            active: false,
        }
    }

    pub fn has_weak_signal(&self) -> bool {
        self.signal_strength.is_some_and(|dbm| dbm < WEAK_SIGNAL_DBM)
    }
}
