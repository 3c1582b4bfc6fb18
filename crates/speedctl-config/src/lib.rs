//! Configuration for speedctl.
//!
//! TOML profiles, password resolution (flag + env + keyring + plaintext),
//! and translation to `speedctl_core::RouterConfig`. The CLI layers its
//! flag overrides on top of what this crate resolves.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use speedctl_core::{RouterConfig, TlsVerification};

/// Keyring service name; entries are keyed `<profile>/password`.
pub const KEYRING_SERVICE: &str = "speedctl";

/// Fallback password variable, checked after a profile's `password_env`.
pub const PASSWORD_ENV: &str = "SPEEDCTL_PASSWORD";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found in config")]
    UnknownProfile { name: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` isn't given.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named routers.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Profile name from an explicit choice, the config, or `"default"`.
    pub fn active_profile_name(&self, explicit: Option<&str>) -> String {
        explicit
            .map(str::to_owned)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| "default".into())
    }

    /// The named profile. A missing `"default"` profile resolves to an
    /// all-defaults one, so the tool works without any config file.
    pub fn profile(&self, name: &str) -> Result<Profile, ConfigError> {
        match self.profiles.get(name) {
            Some(profile) => Ok(profile.clone()),
            None if name == "default" => Ok(Profile::default()),
            None => Err(ConfigError::UnknownProfile { name: name.into() }),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    /// Accept the router's self-signed certificate.
    #[serde(default = "default_insecure")]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Watch-mode refresh interval in seconds.
    #[serde(default = "default_interval")]
    pub interval: f64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: default_insecure(),
            timeout: default_timeout(),
            interval: default_interval(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_insecure() -> bool {
    true
}
fn default_timeout() -> u64 {
    30
}
fn default_interval() -> f64 {
    2.0
}

/// A named router profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Router address on the LAN.
    #[serde(default = "default_host")]
    pub host: String,

    /// Web UI password (plaintext, prefer keyring or env var).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Environment variable holding the password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_env: Option<String>,

    /// Path to a CA certificate that signs the router's cert.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    /// Override the global insecure setting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insecure: Option<bool>,

    /// Override the global timeout (seconds).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            host: default_host(),
            password: None,
            password_env: None,
            ca_cert: None,
            insecure: None,
            timeout: None,
        }
    }
}

fn default_host() -> String {
    speedctl_core::DEFAULT_HOST.into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("", "", "speedctl").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("speedctl");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the config from the canonical path + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from `path` layered over defaults, then `SPEEDCTL_*` variables
/// (`SPEEDCTL_DEFAULTS__OUTPUT=json`). A missing file is not an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("SPEEDCTL_").split("__").ignore(&["password"]));

    let config: Config = figment.extract()?;
    debug!(path = %path.display(), profiles = config.profiles.len(), "config loaded");
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Write `cfg` to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Password resolution ─────────────────────────────────────────────

/// Resolve the router password.
///
/// Order: `flag` → the profile's `password_env` → `SPEEDCTL_PASSWORD` →
/// keyring → plaintext in config. `None` is fine: the router only asks for
/// a password on some parameters.
pub fn resolve_password(
    flag: Option<&str>,
    profile: &Profile,
    profile_name: &str,
) -> Option<SecretString> {
    resolve_password_with(
        flag,
        profile,
        profile_name,
        |name| std::env::var(name).ok(),
        keyring_password,
    )
}

fn resolve_password_with(
    flag: Option<&str>,
    profile: &Profile,
    profile_name: &str,
    env: impl Fn(&str) -> Option<String>,
    keyring: impl Fn(&str) -> Option<String>,
) -> Option<SecretString> {
    let from_profile_env = || profile.password_env.as_deref().and_then(&env);

    flag.map(str::to_owned)
        .or_else(from_profile_env)
        .or_else(|| env(PASSWORD_ENV))
        .or_else(|| keyring(profile_name))
        .or_else(|| profile.password.clone())
        .map(SecretString::from)
}

fn keyring_entry(profile_name: &str) -> Result<keyring::Entry, keyring::Error> {
    keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/password"))
}

fn keyring_password(profile_name: &str) -> Option<String> {
    match keyring_entry(profile_name).and_then(|entry| entry.get_password()) {
        Ok(pw) => Some(pw),
        Err(e) => {
            debug!(profile = profile_name, error = %e, "no keyring password");
            None
        }
    }
}

/// Store the profile's password in the system keyring.
pub fn store_password(profile_name: &str, password: &str) -> Result<(), ConfigError> {
    keyring_entry(profile_name)?.set_password(password)?;
    Ok(())
}

// ── Translation ─────────────────────────────────────────────────────

/// Build a `RouterConfig` from a profile and the global defaults.
///
/// `password_flag` is an explicit password from the command line; it
/// wins over everything the profile points at.
pub fn profile_to_router_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
    password_flag: Option<&str>,
) -> Result<RouterConfig, ConfigError> {
    let mut config = RouterConfig::for_host(&profile.host).map_err(|e| ConfigError::Validation {
        field: "host".into(),
        reason: e.to_string(),
    })?;

    let timeout = profile.timeout.unwrap_or(defaults.timeout);
    if timeout == 0 {
        return Err(ConfigError::Validation {
            field: "timeout".into(),
            reason: "must be at least 1 second".into(),
        });
    }

    config.password = resolve_password(password_flag, profile, profile_name);
    config.tls = profile_tls(profile, defaults);
    config.timeout = Duration::from_secs(timeout);
    Ok(config)
}

/// TLS mode for a profile: its CA file, else its (or the global) insecure flag.
pub fn profile_tls(profile: &Profile, defaults: &Defaults) -> TlsVerification {
    if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else if profile.insecure.unwrap_or(defaults.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else {
        TlsVerification::SystemDefaults
    }
}
