//! WiFi interface list.

use tabled::Tabled;

use speedctl_core::{Command as CoreCommand, CommandOutput, Router, WifiInterface};

use crate::cli::GlobalOpts;
use crate::config::Settings;
use crate::error::CliError;
use crate::output::{self, Painter};

use super::{or_na, unexpected_output};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct InterfaceRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "SSID")]
    ssid: String,
    #[tabled(rename = "BSSID")]
    bssid: String,
    #[tabled(rename = "Band")]
    band: String,
    #[tabled(rename = "Channel")]
    channel: String,
    #[tabled(rename = "Power %")]
    power: String,
    #[tabled(rename = "Max Mbit/s")]
    max_rate: String,
    #[tabled(rename = "Encryption")]
    encryption: String,
}

fn row(iface: &WifiInterface, painter: Painter) -> InterfaceRow {
    InterfaceRow {
        id: iface.id,
        status: painter.up_down(iface.up),
        ssid: iface.ssid.clone(),
        bssid: iface.bssid.clone(),
        band: or_na(iface.frequency_band.as_deref()),
        channel: or_na(iface.channel.as_ref()),
        power: or_na(iface.transmit_power.as_ref()),
        max_rate: or_na(iface.max_bit_rate.as_ref()),
        encryption: or_na(iface.encryption.as_deref()),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    router: &Router,
    settings: &Settings,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let CommandOutput::Interfaces(interfaces) = router.execute(&CoreCommand::ShowInterfaces).await?
    else {
        return Err(unexpected_output());
    };

    let painter = Painter::new(settings.color);
    let out = output::render_list(
        settings.output,
        &interfaces,
        |i| row(i, painter),
        |i| format!("{}\t{}\t{}", i.id, if i.up { "up" } else { "down" }, i.ssid),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
