// Transport configuration for building the reqwest::Client.
//
// TLS mode, timeout, and the fixed SOAP headers live here so the query
// client only deals with request/response mechanics.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};

use crate::error::Error;

/// Header carrying the SOAP action for every parameter query.
pub const SOAP_ACTION: &str = "urn:telekom-de:device:TO_InternetGatewayDevice:2#GetParameterValues";

/// Content type of the request envelope.
pub const CONTENT_TYPE_XML: &str = "text/xml; charset=utf-8";

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("speedctl/", env!("CARGO_PKG_VERSION"), " (Rust)");

/// TLS verification mode.
#[derive(Debug, Clone, Default)]
pub enum TlsMode {
    /// Use the system certificate store.
    System,
    /// Use a custom CA certificate from the given PEM file.
    CustomCa(PathBuf),
    /// Accept any certificate. The router ships a self-signed one.
    #[default]
    DangerAcceptInvalid,
}

/// Transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::DangerAcceptInvalid,
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` with the SOAP default headers installed.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .default_headers(soap_headers());

        match &self.tls {
            TlsMode::System => {}
            TlsMode::CustomCa(path) => {
                let cert_pem = std::fs::read(path)
                    .map_err(|e| Error::Tls(format!("failed to read CA cert: {e}")))?;
                let cert = reqwest::Certificate::from_pem(&cert_pem)
                    .map_err(|e| Error::Tls(format!("invalid CA cert: {e}")))?;
                builder = builder.add_root_certificate(cert);
            }
            TlsMode::DangerAcceptInvalid => {
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}

fn soap_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_XML));
    headers.insert("SOAPAction", HeaderValue::from_static(SOAP_ACTION));
    headers
}
