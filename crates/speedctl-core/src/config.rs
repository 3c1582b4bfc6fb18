// ── Runtime connection configuration ──
//
// These types describe *how* to reach a router. They carry the password
// and connection tuning, but never touch disk. The CLI builds a
// `RouterConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use speedctl_api::TlsMode;

/// Shortest allowed pause between refreshes in watch mode.
pub const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(2);

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification. Default, since the router's cert is self-signed.
    #[default]
    DangerAcceptInvalid,
}

impl From<&TlsVerification> for TlsMode {
    fn from(tls: &TlsVerification) -> Self {
        match tls {
            TlsVerification::SystemDefaults => Self::System,
            TlsVerification::CustomCa(path) => Self::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => Self::DangerAcceptInvalid,
        }
    }
}

/// Configuration for talking to a single router.
///
/// Immutable once built; the per-request digest state lives inside the
/// query client, not here.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// SOAP endpoint (e.g., `https://192.168.2.1:49443/`).
    pub url: Url,
    /// Web UI password. Only needed when the device challenges.
    pub password: Option<SecretString>,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
}

impl RouterConfig {
    /// Config for `host` with everything else defaulted.
    pub fn for_host(host: &str) -> Result<Self, crate::CoreError> {
        let url = speedctl_api::device_url(host).map_err(|e| crate::CoreError::Config {
            message: format!("invalid router host '{host}': {e}"),
        })?;
        Ok(Self {
            url,
            password: None,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        })
    }
}

/// Clamp a requested refresh interval (seconds) to [`MIN_REFRESH_INTERVAL`].
///
/// Non-finite and negative inputs also land on the floor.
pub fn refresh_interval(secs: f64) -> Duration {
    if !secs.is_finite() || secs < MIN_REFRESH_INTERVAL.as_secs_f64() {
        return MIN_REFRESH_INTERVAL;
    }
    Duration::from_secs_f64(secs)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use speedctl_api::DEFAULT_HOST;

    use super::*;

    #[test]
    fn default_host_targets_lan_router() {
        let cfg = RouterConfig::for_host(DEFAULT_HOST).unwrap();
        assert_eq!(cfg.url.as_str(), "https://192.168.2.1:49443/");
        assert_eq!(cfg.tls, TlsVerification::DangerAcceptInvalid);
        assert!(cfg.password.is_none());
    }

    #[test]
    fn for_host_builds_soap_url() {
        let cfg = RouterConfig::for_host("10.0.0.1").unwrap();
        assert_eq!(cfg.url.as_str(), "https://10.0.0.1:49443/");
    }

    #[test]
    fn refresh_interval_has_floor() {
        assert_eq!(refresh_interval(0.5), MIN_REFRESH_INTERVAL);
        assert_eq!(refresh_interval(-3.0), MIN_REFRESH_INTERVAL);
        assert_eq!(refresh_interval(f64::NAN), MIN_REFRESH_INTERVAL);
        assert_eq!(refresh_interval(2.0), Duration::from_secs(2));
        assert_eq!(refresh_interval(5.5), Duration::from_millis(5500));
    }

    #[test]
    fn tls_maps_to_api_mode() {
        let mode = TlsMode::from(&TlsVerification::SystemDefaults);
        assert!(matches!(mode, TlsMode::System));
    }
}
