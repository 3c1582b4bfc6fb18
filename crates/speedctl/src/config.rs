//! CLI configuration: thin wrapper around `speedctl_config`.
//!
//! Re-exports the shared types and layers `GlobalOpts` flag overrides
//! (--host, --password, --insecure, ...) on top of the active profile.

use std::time::Duration;

use clap::ValueEnum;

use speedctl_core::{RouterConfig, refresh_interval};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

pub use speedctl_config::{
    Config, Defaults, Profile, config_path, load_config, save_config, store_password,
};

/// Everything a router-bound command needs, resolved once per run.
#[derive(Debug)]
pub struct Settings {
    pub profile_name: String,
    pub router: RouterConfig,
    pub output: OutputFormat,
    pub color: ColorMode,
    pub interval: Duration,
}

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.active_profile_name(global.profile.as_deref())
}

/// Output format: flag, then `[defaults] output`, then table.
pub fn output_format(global: &GlobalOpts, defaults: &Defaults) -> OutputFormat {
    global
        .output
        .or_else(|| OutputFormat::from_str(&defaults.output, true).ok())
        .unwrap_or(OutputFormat::Table)
}

/// Color mode: flag, then `[defaults] color`, then auto.
pub fn color_mode(global: &GlobalOpts, defaults: &Defaults) -> ColorMode {
    global
        .color
        .or_else(|| ColorMode::from_str(&defaults.color, true).ok())
        .unwrap_or(ColorMode::Auto)
}

/// Translate the active profile + global flags into [`Settings`].
///
/// CLI flag overrides take priority over profile values.
pub fn resolve(global: &GlobalOpts, config: &Config) -> Result<Settings, CliError> {
    let profile_name = active_profile_name(global, config);
    let mut profile = config.profile(&profile_name).map_err(|_| CliError::ProfileNotFound {
        name: profile_name.clone(),
        available: available_profiles(config),
    })?;
    apply_overrides(&mut profile, global);

    // Password: flag > env > keyring > plaintext
    let router = speedctl_config::profile_to_router_config(
        &profile,
        &profile_name,
        &config.defaults,
        global.password.as_deref(),
    )?;

    let interval = refresh_interval(global.interval.unwrap_or(config.defaults.interval));

    Ok(Settings {
        profile_name,
        router,
        output: output_format(global, &config.defaults),
        color: color_mode(global, &config.defaults),
        interval,
    })
}

/// Layer endpoint, TLS and timeout flags over the profile.
fn apply_overrides(profile: &mut Profile, global: &GlobalOpts) {
    if let Some(ref host) = global.host {
        profile.host.clone_from(host);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }
    if let Some(ref ca) = global.ca_cert {
        profile.ca_cert = Some(ca.clone());
    } else if global.strict_tls {
        profile.ca_cert = None;
        profile.insecure = Some(false);
    } else if global.insecure {
        profile.ca_cert = None;
        profile.insecure = Some(true);
    }
}

fn available_profiles(config: &Config) -> String {
    if config.profiles.is_empty() {
        "(none)".into()
    } else {
        config.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}
