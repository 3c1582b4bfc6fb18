//! Two-phase WiFi interface join.
//!
//! Phase one asks every slot for its status. Phase two asks for SSID and
//! BSSID everywhere, and for radio and security details only where the
//! interface is up. Detail rows are merged back by the id in segment 3.

use speedctl_api::{ParameterPath, ParameterRow};
use tracing::trace;

use super::{entity_id, field_name, reading, text};
use crate::error::CoreError;
use crate::model::WifiInterface;

/// Interface slots the router exposes.
pub const INTERFACE_IDS: std::ops::RangeInclusive<u32> = 1..=7;

/// Segment holding the interface id in every path used here.
const ID_SEGMENT: usize = 3;
/// Segment holding the field name.
const FIELD_SEGMENT: usize = 4;

/// Status text of an active interface.
const STATUS_UP: &str = "Up";

/// Phase one: the status of every interface slot.
pub fn status_paths() -> Vec<ParameterPath> {
    INTERFACE_IDS
        .map(|id| ParameterPath::new(format!("Device.WiFi.SSID.{id}.Status")))
        .collect()
}

/// Create one record per status row, in response order.
pub fn from_status(rows: &[ParameterRow]) -> Result<Vec<WifiInterface>, CoreError> {
    rows.iter()
        .map(|(path, value)| {
            let id = entity_id(path, ID_SEGMENT)?;
            Ok(WifiInterface::new(id, value.as_text() == Some(STATUS_UP)))
        })
        .collect()
}

/// Phase two: identity for every interface, radio details for up ones.
pub fn detail_paths(interfaces: &[WifiInterface]) -> Vec<ParameterPath> {
    let mut paths = Vec::new();
    for iface in interfaces {
        let id = iface.id;
        paths.push(format!("Device.WiFi.SSID.{id}.SSID"));
        paths.push(format!("Device.WiFi.SSID.{id}.BSSID"));

        if iface.up {
            paths.push(format!("Device.WiFi.Radio.{id}.SupportedFrequencyBands"));
            paths.push(format!("Device.WiFi.Radio.{id}.Channel"));
            paths.push(format!("Device.WiFi.Radio.{id}.TransmitPower"));
            paths.push(format!("Device.WiFi.Radio.{id}.MaxBitRate"));
            paths.push(format!("Device.WiFi.AccessPoint.{id}.Security.ModeEnabled"));
        }
    }
    paths.into_iter().map(ParameterPath::new).collect()
}

/// Merge phase-two rows into the records built from phase one.
///
/// A row whose id has no record is a device contract violation and fails
/// the whole join.
pub fn apply_details(
    interfaces: &mut [WifiInterface],
    rows: &[ParameterRow],
) -> Result<(), CoreError> {
    for (path, value) in rows {
        let id = entity_id(path, ID_SEGMENT)?;
        let iface = interfaces
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| CoreError::consistency(format!("interface {id} not in list ({path})")))?;

        match field_name(path, FIELD_SEGMENT) {
            "SSID" => iface.ssid = text(value),
            "BSSID" => iface.bssid = text(value),
            "SupportedFrequencyBands" => iface.frequency_band = Some(text(value)),
            "Channel" => iface.channel = reading(value),
            "TransmitPower" => iface.transmit_power = reading(value),
            "MaxBitRate" => iface.max_bit_rate = reading(value),
            "Security" => iface.encryption = Some(text(value)),
            other => trace!(field = other, %path, "ignoring interface field"),
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use speedctl_api::ParameterValue;

    use super::*;
    use crate::model::Numeric;

    fn row(path: &str, value: &str) -> ParameterRow {
        (ParameterPath::from(path), ParameterValue::Text(value.into()))
    }

    fn absent(path: &str) -> ParameterRow {
        (ParameterPath::from(path), ParameterValue::Absent)
    }

    #[test]
    fn status_covers_seven_slots() {
        let paths = status_paths();
        assert_eq!(paths.len(), 7);
        assert_eq!(paths[0].as_str(), "Device.WiFi.SSID.1.Status");
        assert_eq!(paths[6].as_str(), "Device.WiFi.SSID.7.Status");
    }

    #[test]
    fn status_rows_become_records_in_response_order() {
        let rows = vec![
            row("Device.WiFi.SSID.2.Status", "Down"),
            row("Device.WiFi.SSID.1.Status", "Up"),
            absent("Device.WiFi.SSID.5.Status"),
        ];
        let interfaces = from_status(&rows).unwrap();
        let summary: Vec<(u32, bool)> = interfaces.iter().map(|i| (i.id, i.up)).collect();
        assert_eq!(summary, vec![(2, false), (1, true), (5, false)]);
    }

    #[test]
    fn detail_paths_skip_radio_for_down_interfaces() {
        let interfaces = from_status(&[
            row("Device.WiFi.SSID.1.Status", "Up"),
            row("Device.WiFi.SSID.2.Status", "Down"),
        ])
        .unwrap();

        let paths: Vec<String> = detail_paths(&interfaces)
            .into_iter()
            .map(|p| p.as_str().to_owned())
            .collect();

        assert_eq!(
            paths,
            vec![
                "Device.WiFi.SSID.1.SSID",
                "Device.WiFi.SSID.1.BSSID",
                "Device.WiFi.Radio.1.SupportedFrequencyBands",
                "Device.WiFi.Radio.1.Channel",
                "Device.WiFi.Radio.1.TransmitPower",
                "Device.WiFi.Radio.1.MaxBitRate",
                "Device.WiFi.AccessPoint.1.Security.ModeEnabled",
                "Device.WiFi.SSID.2.SSID",
                "Device.WiFi.SSID.2.BSSID",
            ]
        );
    }

    #[test]
    fn details_merge_by_id() {
        let mut interfaces = from_status(&[
            row("Device.WiFi.SSID.1.Status", "Up"),
            row("Device.WiFi.SSID.2.Status", "Down"),
        ])
        .unwrap();

        apply_details(
            &mut interfaces,
            &[
                row("Device.WiFi.SSID.2.SSID", "guest"),
                absent("Device.WiFi.SSID.2.BSSID"),
                row("Device.WiFi.SSID.1.SSID", "home"),
                row("Device.WiFi.SSID.1.BSSID", "AA:BB:CC:00:11:22"),
                row("Device.WiFi.Radio.1.SupportedFrequencyBands", "2.4GHz"),
                row("Device.WiFi.Radio.1.Channel", "11"),
                row("Device.WiFi.Radio.1.TransmitPower", "100"),
                row("Device.WiFi.Radio.1.MaxBitRate", "600"),
                row("Device.WiFi.AccessPoint.1.Security.ModeEnabled", "WPA2-Personal"),
            ],
        )
        .unwrap();

        let home = &interfaces[0];
        assert_eq!(home.ssid, "home");
        assert_eq!(home.bssid, "AA:BB:CC:00:11:22");
        assert_eq!(home.frequency_band.as_deref(), Some("2.4GHz"));
        assert_eq!(home.channel, Some(Numeric::Parsed(11)));
        assert_eq!(home.transmit_power, Some(Numeric::Parsed(100)));
        assert_eq!(home.max_bit_rate, Some(Numeric::Parsed(600)));
        assert_eq!(home.encryption.as_deref(), Some("WPA2-Personal"));

        let guest = &interfaces[1];
        assert_eq!(guest.ssid, "guest");
        assert_eq!(guest.bssid, "NA");
        assert_eq!(guest.channel, None);
        assert_eq!(guest.encryption, None);
    }

    #[test]
    fn automatic_radio_settings_keep_device_text() {
        let mut interfaces = from_status(&[row("Device.WiFi.SSID.1.Status", "Up")]).unwrap();
        apply_details(
            &mut interfaces,
            &[
                row("Device.WiFi.Radio.1.Channel", "Auto"),
                row("Device.WiFi.Radio.1.TransmitPower", "-1"),
                row("Device.WiFi.Radio.1.MaxBitRate", "Auto"),
            ],
        )
        .unwrap();

        let iface = &interfaces[0];
        assert_eq!(iface.channel, Some(Numeric::Raw("Auto".into())));
        assert_eq!(iface.transmit_power, Some(Numeric::Parsed(-1)));
        assert_eq!(iface.max_bit_rate.as_ref().map(ToString::to_string).as_deref(), Some("Auto"));
    }

    #[test]
    fn unknown_interface_id_is_consistency_error() {
        let mut interfaces = from_status(&[row("Device.WiFi.SSID.1.Status", "Up")]).unwrap();
        let err = apply_details(&mut interfaces, &[row("Device.WiFi.SSID.4.SSID", "x")]).unwrap_err();
        assert!(matches!(err, CoreError::Consistency { .. }), "got {err:?}");
    }
}
