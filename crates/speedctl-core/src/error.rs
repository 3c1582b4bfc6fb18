// ── Core error types ──
//
// User-facing errors from speedctl-core. Consumers never see raw HTTP or
// XML failures; the `From<speedctl_api::Error>` impl translates them into
// domain variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to router at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Router request timed out")]
    Timeout,

    // ── Authentication errors ────────────────────────────────────────
    #[error("Request needs authentication, but no password was set")]
    AuthenticationRequired,

    #[error("Authentication failed: the router rejected the password")]
    AuthenticationFailed,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Unexpected response from router: {message}")]
    Protocol { message: String },

    #[error("Router data is inconsistent: {message}")]
    Consistency { message: String },

    #[error("WiFi interface {id} not found")]
    InterfaceNotFound { id: u32 },

    #[error("WiFi interface {id} is not up")]
    InterfaceDown { id: u32 },

    // ── Input errors ─────────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    pub(crate) fn consistency(message: impl Into<String>) -> Self {
        Self::Consistency {
            message: message.into(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<speedctl_api::Error> for CoreError {
    fn from(err: speedctl_api::Error) -> Self {
        if err.is_timeout() {
            return CoreError::Timeout;
        }
        match err {
            speedctl_api::Error::AuthRequired => CoreError::AuthenticationRequired,
            speedctl_api::Error::AuthFailed => CoreError::AuthenticationFailed,
            speedctl_api::Error::Transport(e) => CoreError::ConnectionFailed {
                url: e
                    .url()
                    .map_or_else(|| "<unknown>".into(), ToString::to_string),
                reason: e.to_string(),
            },
            speedctl_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            speedctl_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            speedctl_api::Error::Protocol { message } => CoreError::Protocol { message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_errors_map_to_auth_variants() {
        assert!(matches!(
            CoreError::from(speedctl_api::Error::AuthRequired),
            CoreError::AuthenticationRequired
        ));
        assert!(matches!(
            CoreError::from(speedctl_api::Error::AuthFailed),
            CoreError::AuthenticationFailed
        ));
    }

    #[test]
    fn protocol_message_is_kept() {
        let err = CoreError::from(speedctl_api::Error::Protocol {
            message: "no ParameterList".into(),
        });
        assert_eq!(
            err.to_string(),
            "Unexpected response from router: no ParameterList"
        );
    }
}
