//! Config subcommand handlers.

use dialoguer::{Input, Select};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Format config for display, masking the plaintext password.
fn format_config_redacted(cfg: &Config) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "insecure = {}", cfg.defaults.insecure);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);
    let _ = writeln!(out, "interval = {}", cfg.defaults.interval);

    for (name, p) in &cfg.profiles {
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "host = \"{}\"", p.host);
        if p.password.is_some() {
            let _ = writeln!(out, "password = \"****\"");
        }
        if let Some(ref env) = p.password_env {
            let _ = writeln!(out, "password_env = \"{env}\"");
        }
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
    }

    out
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::validation("interactive", format!("prompt failed: {e}"))
}

fn prompt_password() -> Result<String, CliError> {
    let pass = rpassword::prompt_password("Router password: ").map_err(prompt_err)?;
    if pass.is_empty() {
        return Err(CliError::validation("password", "cannot be empty"));
    }
    Ok(pass)
}

/// Store the password in the keyring, or hand it back for plaintext config.
///
/// Returns `Some(password)` if the user chose plaintext, `None` otherwise.
fn prompt_password_storage(profile_name: &str) -> Result<Option<String>, CliError> {
    let choices = &[
        "Store in system keyring (recommended)",
        "Save to config file (plaintext)",
        "Don't store a password",
    ];
    let selection = Select::new()
        .with_prompt("Router password")
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    match selection {
        0 => {
            let pass = prompt_password()?;
            config::store_password(profile_name, &pass)?;
            eprintln!("   ✓ Password stored in system keyring");
            Ok(None)
        }
        1 => prompt_password().map(Some),
        _ => Ok(None),
    }
}

fn set_key(profile: &mut Profile, key: &str, value: String) -> Result<(), CliError> {
    match key {
        "host" => profile.host = value,
        "password_env" | "password-env" => profile.password_env = Some(value),
        "insecure" => {
            profile.insecure = Some(
                value
                    .parse()
                    .map_err(|_| CliError::validation("insecure", "must be 'true' or 'false'"))?,
            );
        }
        "timeout" => {
            profile.timeout = Some(
                value
                    .parse()
                    .map_err(|_| CliError::validation("timeout", "must be a number (seconds)"))?,
            );
        }
        "ca_cert" | "ca-cert" => profile.ca_cert = Some(value.into()),
        other => {
            return Err(CliError::validation(
                other,
                format!(
                    "unknown config key '{other}'. Valid keys: host, password_env, insecure, \
                     timeout, ca_cert"
                ),
            ));
        }
    }
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("speedctl configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            let host: String = Input::new()
                .with_prompt("Router address")
                .default(speedctl_core::DEFAULT_HOST.into())
                .interact_text()
                .map_err(prompt_err)?;

            let password = prompt_password_storage(&profile_name)?;

            let mut cfg = config::load_config().unwrap_or_default();
            cfg.profiles.insert(
                profile_name.clone(),
                Profile {
                    host,
                    password,
                    ..Profile::default()
                },
            );
            cfg.default_profile = Some(profile_name.clone());

            let path = config::save_config(&cfg)?;
            eprintln!("\n✓ Configuration written to {}", path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Test it: speedctl wifi");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let format = config::output_format(global, &cfg.defaults);
            let out = if format == OutputFormat::Table {
                format_config_redacted(&cfg)
            } else {
                let mut redacted = cfg;
                for profile in redacted.profiles.values_mut() {
                    if profile.password.is_some() {
                        profile.password = Some("****".into());
                    }
                }
                output::render_single(format, &redacted, format_config_redacted, |_| {
                    config::config_path().display().to_string()
                })
            };
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            println!("{}", config::config_path().display());
            Ok(())
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config()?;
            let profile_name = config::active_profile_name(global, &cfg);

            let profile = cfg.profiles.entry(profile_name.clone()).or_default();
            set_key(profile, &key, value)?;

            config::save_config(&cfg)?;
            eprintln!("✓ Set {key} on profile '{profile_name}'");
            Ok(())
        }

        // ── Set-password ────────────────────────────────────────────
        ConfigCommand::SetPassword => {
            let cfg = config::load_config()?;
            let profile_name = config::active_profile_name(global, &cfg);
            let pass = prompt_password()?;
            config::store_password(&profile_name, &pass)?;
            eprintln!("✓ Password for profile '{profile_name}' stored in system keyring");
            Ok(())
        }
    }
}
