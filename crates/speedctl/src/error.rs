//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use speedctl_config::ConfigError;
use speedctl_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to router at {url}")]
    #[diagnostic(
        code(speedctl::connection_failed),
        help(
            "Check that you are on the router's LAN and the address is right.\n\
             {reason}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(speedctl::timeout),
        help("Increase the timeout with --timeout or check the router's responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("The router asked for a password, but none is configured")]
    #[diagnostic(
        code(speedctl::auth_required),
        help(
            "Pass --password, set SPEEDCTL_PASSWORD, or store one with:\n\
             speedctl config set-password"
        )
    )]
    AuthRequired,

    #[error("The router rejected the password")]
    #[diagnostic(
        code(speedctl::auth_failed),
        help("Use the password of the router's web interface (device password on the back label).")
    )]
    AuthFailed,

    // ── Resources ────────────────────────────────────────────────────
    #[error("WiFi interface {id} not found")]
    #[diagnostic(
        code(speedctl::not_found),
        help("Run: speedctl wifi to see available interfaces")
    )]
    InterfaceNotFound { id: u32 },

    // ── Router data ──────────────────────────────────────────────────
    #[error("Unexpected router response: {message}")]
    #[diagnostic(
        code(speedctl::protocol),
        help("The firmware may not expose this parameter set.")
    )]
    Protocol { message: String },

    #[error("Router data is inconsistent: {message}")]
    #[diagnostic(code(speedctl::consistency))]
    Consistency { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(speedctl::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(speedctl::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: speedctl config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(speedctl::config))]
    Config(ConfigError),

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthRequired | Self::AuthFailed => exit_code::AUTH,
            Self::InterfaceNotFound { .. } | Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    pub fn validation(field: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed { url, reason },
            CoreError::Timeout => CliError::Timeout,
            CoreError::AuthenticationRequired => CliError::AuthRequired,
            CoreError::AuthenticationFailed => CliError::AuthFailed,
            CoreError::Protocol { message } => CliError::Protocol { message },
            CoreError::Consistency { message } => CliError::Consistency { message },
            CoreError::InterfaceNotFound { id } => CliError::InterfaceNotFound { id },
            CoreError::InterfaceDown { id } => CliError::Validation {
                field: "interface".into(),
                reason: format!("interface {id} is not up"),
            },
            CoreError::ValidationFailed { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },
            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::UnknownProfile { name } => CliError::ProfileNotFound {
                name,
                available: "see `speedctl config show`".into(),
            },
            other => CliError::Config(other),
        }
    }
}
