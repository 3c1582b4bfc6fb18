// ── Domain model ──
//
// Structured entities assembled from flat parameter rows by the joiners
// in `crate::join`.

pub mod address;
pub mod mac;
pub mod numeric;
pub mod wifi;

pub use address::ExternalAddress;
pub use mac::MacAddress;
pub use numeric::Numeric;
pub use wifi::{WifiClient, WifiInterface};
