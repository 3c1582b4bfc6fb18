//! Clap derive structures for the `speedctl` CLI.
//!
//! Defines the command tree, global flags, and shared value enums.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// speedctl -- read WiFi, client, address and log data from a Speedport router
#[derive(Debug, Parser)]
#[command(
    name = "speedctl",
    version,
    about = "Query a Speedport router from the command line",
    long_about = "Reads WiFi interfaces, associated clients, external addresses and the\n\
        system log over the router's management SOAP endpoint (port 49443).",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct GlobalOpts {
    /// Router profile to use
    #[arg(long, short = 'p', env = "SPEEDCTL_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Router address or full endpoint URL (overrides profile)
    #[arg(long, short = 'H', env = "SPEEDCTL_HOST", global = true)]
    pub host: Option<String>,

    /// Router password (overrides profile, env and keyring)
    #[arg(long, global = true)]
    pub password: Option<String>,

    /// Output format
    #[arg(long, short = 'o', env = "SPEEDCTL_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept the router's self-signed TLS certificate
    #[arg(long, short = 'k', global = true, conflicts_with = "strict_tls")]
    pub insecure: bool,

    /// Verify the router certificate against the system CA store
    #[arg(long, global = true)]
    pub strict_tls: bool,

    /// CA certificate that signs the router's certificate
    #[arg(long, global = true, value_name = "PATH")]
    pub ca_cert: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, env = "SPEEDCTL_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Re-render periodically until interrupted (client view only)
    #[arg(long, short = 'w', global = true)]
    pub watch: bool,

    /// Refresh interval for --watch in seconds (minimum 2)
    #[arg(long, short = 't', global = true, value_name = "SECS")]
    pub interval: Option<f64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List WiFi interfaces
    #[command(alias = "w")]
    Wifi,

    /// Show one WiFi interface and its active clients
    #[command(alias = "cl")]
    Clients(ClientsArgs),

    /// Show external IPv4 addresses
    Ip,

    /// Show the router's system log, newest first
    Log(LogArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct ClientsArgs {
    /// Interface number (see `speedctl wifi`)
    pub interface: u32,
}

#[derive(Debug, Args)]
pub struct LogArgs {
    /// Number of log lines to read (-1 = all)
    #[arg(long, short = 'n', default_value = "-1", allow_hyphen_values = true)]
    pub count: i64,

    /// Show only these categories (comma-separated keys, e.g. "w,vpn")
    #[arg(long, value_name = "KEYS", conflicts_with = "exclude")]
    pub include: Option<String>,

    /// Hide these categories (comma-separated keys, e.g. "dh,wui")
    #[arg(long, value_name = "KEYS")]
    pub exclude: Option<String>,

    /// List the category keys and exit
    #[arg(long)]
    pub categories: bool,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive setup wizard
    Init,

    /// Show the current configuration (passwords masked)
    Show,

    /// Print the config file path
    Path,

    /// Set a profile key
    Set {
        /// Key: host, password_env, insecure, timeout, ca_cert
        key: String,
        /// New value
        value: String,
    },

    /// Store the profile's router password in the system keyring
    SetPassword,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
