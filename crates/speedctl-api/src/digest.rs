// Digest challenge handling
//
// The router answers an unauthenticated query with a `WWW-Authenticate`
// header carrying a nonce. The reply is a fixed-user MD5 digest over
// `POST:/`; the password itself never goes on the wire.

use md5::{Digest, Md5};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::error::Error;

/// Fixed username of the management plane.
pub const DIGEST_USER: &str = "dslf-config";

/// Realm the firmware hashes and expects, whatever the challenge names.
pub const DEFAULT_REALM: &str = "BT";

/// Method and URI the digest is computed over.
const DIGEST_A2: &str = "POST:/";

/// Where a query stands with respect to the device's challenge.
///
/// Scoped to a single `query()` call; nothing is cached between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Authenticated(AuthSession),
}

/// A computed answer to one challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub nonce: String,
    pub realm: String,
    pub response: String,
}

impl AuthSession {
    /// Answer the challenge in a `WWW-Authenticate` header value.
    pub fn answer(challenge: &str, password: Option<&SecretString>) -> Result<Self, Error> {
        let password = password.ok_or(Error::AuthRequired)?;
        let nonce = challenge_param(challenge, "nonce")
            .ok_or_else(|| Error::protocol(format!("challenge without nonce: {challenge}")))?;
        if let Some(realm) = challenge_param(challenge, "realm").filter(|r| r != DEFAULT_REALM) {
            debug!(%realm, "challenge names another realm; answering for {DEFAULT_REALM}");
        }
        let response = digest_response(password.expose_secret(), &nonce);
        Ok(Self {
            nonce,
            realm: DEFAULT_REALM.into(),
            response,
        })
    }

    /// The `Authorization` header value for the retried request.
    pub fn authorization(&self) -> String {
        format!(
            "Digest username=\"{DIGEST_USER}\", realm=\"{}\", nonce=\"{}\", uri=\"/\", response=\"{}\", algorithm=MD5",
            self.realm, self.nonce, self.response
        )
    }
}

/// `MD5(MD5("dslf-config:BT:" + password) + ":" + nonce + ":" + MD5("POST:/"))`, lowercase hex.
///
/// The realm in H1 is always `BT`, matching what the firmware checks.
pub fn digest_response(password: &str, nonce: &str) -> String {
    let h1 = md5_hex(&format!("{DIGEST_USER}:{DEFAULT_REALM}:{password}"));
    let h2 = md5_hex(DIGEST_A2);
    md5_hex(&format!("{h1}:{nonce}:{h2}"))
}

fn md5_hex(input: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Pull `key="value"` (or unquoted `key=value`) out of a challenge.
fn challenge_param(challenge: &str, key: &str) -> Option<String> {
    let needle = format!("{key}=");
    let mut search = challenge;
    loop {
        let at = search.find(&needle)?;
        // Require a word boundary so `cnonce=` doesn't match `nonce=`.
        let boundary = search[..at]
            .chars()
            .next_back()
            .is_none_or(|c| c == ' ' || c == ',');
        let rest = &search[at + needle.len()..];
        if boundary {
            let value = match rest.strip_prefix('"') {
                Some(quoted) => quoted.split('"').next().unwrap_or_default(),
                None => rest.split([',', ' ']).next().unwrap_or_default(),
            };
            return (!value.is_empty()).then(|| value.to_owned());
        }
        search = rest;
    }
}
