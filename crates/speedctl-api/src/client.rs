// Parameter query client
//
// Wraps `reqwest::Client` with the router's SOAP endpoint. One `query()`
// is one POST, or two when the device challenges: the digest is computed
// fresh for that call and thrown away afterwards.

use reqwest::header::{AUTHORIZATION, WWW_AUTHENTICATE};
use secrecy::SecretString;
use tracing::{debug, trace, warn};
use url::Url;

use crate::codec;
use crate::digest::{AuthSession, AuthState};
use crate::error::Error;
use crate::param::{ParameterPath, ParameterRow};
use crate::transport::TransportConfig;

/// Port of the management-plane SOAP endpoint.
pub const DEFAULT_PORT: u16 = 49443;

/// Default LAN address of the router.
pub const DEFAULT_HOST: &str = "192.168.2.1";

/// Build the endpoint URL for a router host (`https://<host>:49443/`).
///
/// A value that already carries a scheme (`http://127.0.0.1:8080/`) is
/// taken as the whole endpoint, e.g. for a port-forwarded router.
pub fn device_url(host: &str) -> Result<Url, Error> {
    if host.contains("://") {
        return Ok(Url::parse(host)?);
    }
    Ok(Url::parse(&format!("https://{host}:{DEFAULT_PORT}/"))?)
}

/// Raw client for the router's `GetParameterValues` RPC.
///
/// Holds no session between calls. Each call answers its own challenge,
/// if any, and the computed digest is dropped with the call.
pub struct QueryClient {
    http: reqwest::Client,
    base_url: Url,
    password: Option<SecretString>,
}

impl QueryClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// `base_url` is the endpoint root, normally from [`device_url`].
    /// Without a password, any challenge fails with [`Error::AuthRequired`].
    pub fn new(
        base_url: Url,
        password: Option<SecretString>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            password,
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        base_url: Url,
        password: Option<SecretString>,
    ) -> Self {
        Self {
            http,
            base_url,
            password,
        }
    }

    /// The endpoint URL requests are posted to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch the values of `paths`.
    ///
    /// Returns rows in the device's response order. An empty `paths` is a
    /// no-op: nothing is sent and the result is empty.
    pub async fn query(&self, paths: &[ParameterPath]) -> Result<Vec<ParameterRow>, Error> {
        if paths.is_empty() {
            return Ok(Vec::new());
        }

        let body = codec::encode_request(paths);
        let mut state = AuthState::Unauthenticated;

        loop {
            let resp = self.send(&body, &state).await?;

            let Some(challenge) = challenge_of(&resp) else {
                return self.parse(resp).await;
            };

            match state {
                AuthState::Unauthenticated => {
                    debug!("device requested digest authentication");
                    let session = AuthSession::answer(&challenge, self.password.as_ref())?;
                    state = AuthState::Authenticated(session);
                }
                AuthState::Authenticated(_) => {
                    warn!("digest response rejected by device");
                    return Err(Error::AuthFailed);
                }
            }
        }
    }

    async fn send(&self, body: &str, state: &AuthState) -> Result<reqwest::Response, Error> {
        debug!(url = %self.base_url, authenticated = matches!(state, AuthState::Authenticated(_)), "POST GetParameterValues");
        trace!(body, "request envelope");

        let mut builder = self.http.post(self.base_url.clone()).body(body.to_owned());
        if let AuthState::Authenticated(session) = state {
            builder = builder.header(AUTHORIZATION, session.authorization());
        }

        builder.send().await.map_err(Error::Transport)
    }

    async fn parse(&self, resp: reqwest::Response) -> Result<Vec<ParameterRow>, Error> {
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;
        trace!(%status, body = %body, "response envelope");

        if !status.is_success() {
            return Err(Error::protocol(format!(
                "HTTP {status}: {}",
                preview(&body)
            )));
        }

        let rows = codec::decode_response(&body)?;
        debug!(rows = rows.len(), "decoded parameter values");
        Ok(rows)
    }
}

fn challenge_of(resp: &reqwest::Response) -> Option<String> {
    resp.headers()
        .get(WWW_AUTHENTICATE)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

fn preview(body: &str) -> String {
    body.chars().take(200).collect()
}
