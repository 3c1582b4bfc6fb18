use thiserror::Error;

/// Top-level error type for the `speedctl-api` crate.
///
/// Covers every failure mode of a parameter query: transport, envelope
/// shape, and the digest challenge. `speedctl-core` maps these into
/// user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The device demanded authentication but no password is configured.
    #[error("Request needs authentication, but no password was set")]
    AuthRequired,

    /// The request was challenged again after answering the digest.
    #[error("Authentication failed: device rejected the digest response")]
    AuthFailed,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Protocol ────────────────────────────────────────────────────
    /// The response did not match the expected SOAP envelope shape.
    #[error("Protocol error: {message}")]
    Protocol { message: String },
}

impl Error {
    pub(crate) fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Returns `true` if this is a timeout from the HTTP layer.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }
}
