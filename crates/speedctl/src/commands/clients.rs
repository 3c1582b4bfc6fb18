//! Interface detail with its active clients, optionally re-rendered in a
//! watch loop.

use std::fmt::Write as _;

use tabled::Tabled;

use speedctl_core::{
    Command as CoreCommand, CommandOutput, Router, WatchExit, WifiClient, WifiInterface,
    watch_interface,
};

use crate::cli::{ClientsArgs, GlobalOpts, OutputFormat};
use crate::config::Settings;
use crate::error::CliError;
use crate::output::{self, Painter};

use super::{or_na, unexpected_output};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ClientRow {
    #[tabled(rename = "Host #")]
    host: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Signal dBm")]
    signal: String,
    #[tabled(rename = "Down kbit/s")]
    down: String,
    #[tabled(rename = "Up kbit/s")]
    up: String,
}

fn row(c: &WifiClient, painter: Painter) -> ClientRow {
    let signal = or_na(c.signal_strength);
    ClientRow {
        host: or_na(c.host_list_number),
        name: or_na(c.host_name.as_deref()),
        ip: or_na(c.ip_address.as_deref()),
        mac: c.mac.to_string(),
        signal: if c.has_weak_signal() {
            painter.warn(&signal)
        } else {
            signal
        },
        down: or_na(c.downlink_rate),
        up: or_na(c.uplink_rate),
    }
}

fn detail(iface: &WifiInterface, painter: Painter) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Interface {}: {} ({})",
        iface.id,
        iface.ssid,
        painter.up_down(iface.up)
    );
    let _ = writeln!(out, "BSSID:      {}", iface.bssid);
    let _ = writeln!(out, "Band:       {}", or_na(iface.frequency_band.as_deref()));
    let _ = writeln!(out, "Channel:    {}", or_na(iface.channel.as_ref()));
    let _ = writeln!(out, "Power:      {} %", or_na(iface.transmit_power.as_ref()));
    let _ = writeln!(out, "Max rate:   {} Mbit/s", or_na(iface.max_bit_rate.as_ref()));
    let _ = writeln!(out, "Encryption: {}", or_na(iface.encryption.as_deref()));

    let rows: Vec<ClientRow> = iface.active_clients().map(|c| row(c, painter)).collect();
    if rows.is_empty() {
        out.push_str("\nNo active clients.");
    } else {
        let _ = write!(out, "\n{}", output::render_table(&rows));
    }
    out
}

fn plain(iface: &WifiInterface) -> String {
    iface
        .active_clients()
        .map(|c| {
            format!(
                "{}\t{}\t{}",
                c.mac,
                or_na(c.ip_address.as_deref()),
                or_na(c.host_name.as_deref())
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render(iface: &WifiInterface, format: OutputFormat, painter: Painter) -> String {
    output::render_single(format, iface, |i| detail(i, painter), plain)
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    router: &Router,
    args: ClientsArgs,
    settings: &Settings,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let painter = Painter::new(settings.color);

    if !global.watch {
        let command = CoreCommand::ShowInterfaceDetail(args.interface);
        let CommandOutput::InterfaceDetail(iface) = router.execute(&command).await? else {
            return Err(unexpected_output());
        };
        output::print_output(&render(&iface, settings.output, painter), global.quiet);
        return Ok(());
    }

    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
    };
    let exit = watch_interface(router, args.interface, settings.interval, shutdown, |iface| {
        output::clear_screen();
        output::print_output(&render(iface, settings.output, painter), global.quiet);
    })
    .await?;

    match exit {
        WatchExit::Interrupted => eprintln!("Aborted by user"),
        WatchExit::InterfaceDown { id } => eprintln!("Interface {id} went down, stopping."),
    }
    Ok(())
}
