mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use speedctl_core::Router;

use crate::cli::{Cli, Command};
use crate::error::CliError;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose, cli.global.quiet);

    // Requests are strictly sequential, one thread is plenty
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => fail(CliError::Io(err)),
    };

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = runtime.block_on(run(cli)) {
        fail(err);
    }
}

fn fail(err: CliError) -> ! {
    let code = err.exit_code();
    eprintln!("{:?}", miette::Report::new(err));
    std::process::exit(code);
}

fn init_tracing(verbosity: u8, quiet: bool) {
    let filter = match (quiet, verbosity) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't talk to the router
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "speedctl", &mut std::io::stdout());
            Ok(())
        }

        // All other commands query the router
        cmd => {
            let cfg = config::load_config()?;
            let settings = config::resolve(&cli.global, &cfg)?;
            let router = Router::new(&settings.router)?;

            tracing::debug!(
                command = ?cmd,
                profile = %settings.profile_name,
                url = %router.url(),
                "dispatching command"
            );
            commands::dispatch(cmd, &router, &settings, &cli.global).await
        }
    }
}
