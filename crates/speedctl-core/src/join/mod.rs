// ── Entity joins ──
//
// One logical entity (an interface, a client) is described across several
// independently issued queries. The functions here are pure: they build
// the path lists for each stage and fold the returned rows into records
// keyed by the id found at a fixed path segment.
//
// Lookups are linear scans; there are at most seven interfaces and a few
// dozen clients.

pub mod addresses;
pub mod clients;
pub mod interfaces;

use speedctl_api::{ParameterPath, ParameterValue};

use crate::error::CoreError;
use crate::model::Numeric;

/// Entity id at `index`, or a consistency error naming the offending path.
fn entity_id(path: &ParameterPath, index: usize) -> Result<u32, CoreError> {
    path.id_at(index)
        .ok_or_else(|| CoreError::consistency(format!("no numeric id at segment {index} of {path}")))
}

/// Field name at `index`; empty when the path is too short.
fn field_name(path: &ParameterPath, index: usize) -> &str {
    path.segment(index).unwrap_or_default()
}

/// Lenient numeric parse. Absent or garbled values become `None`.
fn number<T: std::str::FromStr>(value: &ParameterValue) -> Option<T> {
    value.as_text()?.trim().parse().ok()
}

/// Numeric display field; text that doesn't parse is kept raw.
fn reading<T: std::str::FromStr>(value: &ParameterValue) -> Option<Numeric<T>> {
    value.as_text().map(Numeric::parse)
}

/// Text for display fields; absent becomes `"NA"`.
fn text(value: &ParameterValue) -> String {
    value.text_or_na().to_owned()
}
