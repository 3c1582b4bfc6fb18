//! Command dispatch: bridges CLI args -> core Commands -> output formatting.

pub mod clients;
pub mod config_cmd;
pub mod ip;
pub mod log;
pub mod wifi;

use speedctl_core::Router;

use crate::cli::{Command, GlobalOpts};
use crate::config::Settings;
use crate::error::CliError;

/// Placeholder for fields the router didn't report.
pub(crate) const NA: &str = "NA";

pub(crate) fn or_na<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| NA.to_owned(), |v| v.to_string())
}

/// Map a `CommandOutput` variant the handler didn't ask for.
pub(crate) fn unexpected_output() -> CliError {
    CliError::Protocol {
        message: "command returned an unexpected result kind".into(),
    }
}

/// Dispatch a router-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    router: &Router,
    settings: &Settings,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if global.watch && !matches!(cmd, Command::Clients(_)) && !global.quiet {
        eprintln!("note: --watch only applies to `clients`; showing a single snapshot");
    }

    match cmd {
        Command::Wifi => wifi::handle(router, settings, global).await,
        Command::Clients(args) => clients::handle(router, args, settings, global).await,
        Command::Ip => ip::handle(router, settings, global).await,
        Command::Log(args) => log::handle(router, args, settings, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
