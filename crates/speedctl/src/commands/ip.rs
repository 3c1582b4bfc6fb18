//! External IPv4 addresses.

use tabled::Tabled;

use speedctl_core::{Command as CoreCommand, CommandOutput, ExternalAddress, Router};

use crate::cli::GlobalOpts;
use crate::config::Settings;
use crate::error::CliError;
use crate::output::{self, Painter};

use super::unexpected_output;

#[derive(Tabled)]
struct AddressRow {
    #[tabled(rename = "Interface")]
    alias: String,
    #[tabled(rename = "IPv4")]
    ipv4: String,
    #[tabled(rename = "Note")]
    note: String,
}

fn row(addr: &ExternalAddress, painter: Painter) -> AddressRow {
    let ipv4 = addr.ipv4.to_string();
    AddressRow {
        alias: if addr.ipv4.is_absent() {
            painter.warn(&addr.alias)
        } else {
            addr.alias.clone()
        },
        ipv4,
        note: if addr.is_public() {
            "address websites will see".into()
        } else {
            String::new()
        },
    }
}

pub async fn handle(
    router: &Router,
    settings: &Settings,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let CommandOutput::ExternalAddresses(addresses) =
        router.execute(&CoreCommand::ShowExternalIp).await?
    else {
        return Err(unexpected_output());
    };

    let painter = Painter::new(settings.color);
    let out = output::render_list(
        settings.output,
        &addresses,
        |a| row(a, painter),
        |a| format!("{}\t{}", a.alias, a.ipv4),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
