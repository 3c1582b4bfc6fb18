//! Async client for the Speedport management-plane SOAP API.
//!
//! The router exposes its state as a flat tree of parameter paths
//! (`Device.WiFi.SSID.1.Status`, ...) behind a single `GetParameterValues`
//! RPC on `https://<host>:49443/`. This crate owns the wire side of that:
//!
//! - **[`codec`]** — builds the request envelope and decodes the
//!   `ParameterList/ParameterValueStruct` response into ordered rows.
//! - **[`digest`]** — answers the device's `WWW-Authenticate` challenge
//!   with the fixed-user MD5 digest.
//! - **[`QueryClient`]** — one POST per query, plus one digest retry when
//!   challenged.
//!
//! Correlating rows into interfaces and clients happens in `speedctl-core`.

pub mod client;
pub mod codec;
pub mod digest;
pub mod error;
pub mod param;
pub mod transport;

pub use client::{DEFAULT_HOST, DEFAULT_PORT, QueryClient, device_url};
pub use digest::{AuthSession, AuthState};
pub use error::Error;
pub use param::{NOT_AVAILABLE, ParameterPath, ParameterRow, ParameterValue};
pub use transport::{TlsMode, TransportConfig};
