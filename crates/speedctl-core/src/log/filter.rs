//! Category filter and count-bounded selection.

use std::collections::BTreeSet;

use super::{LogCategory, LogEntry, classify};
use crate::error::CoreError;

/// Which categories to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogFilter {
    Exclude(BTreeSet<LogCategory>),
    Include(BTreeSet<LogCategory>),
}

impl Default for LogFilter {
    fn default() -> Self {
        Self::Exclude(BTreeSet::new())
    }
}

impl LogFilter {
    /// Exclusion filter from a comma-separated key list (`"dh,wui"`).
    pub fn exclude(spec: &str) -> Result<Self, CoreError> {
        parse_keys(spec).map(Self::Exclude)
    }

    /// Inclusion filter from a comma-separated key list (`"w,vpn"`).
    pub fn include(spec: &str) -> Result<Self, CoreError> {
        parse_keys(spec).map(Self::Include)
    }

    /// Include mode normalized to its complement over all categories.
    pub fn effective_exclusions(&self) -> BTreeSet<LogCategory> {
        match self {
            Self::Exclude(set) => set.clone(),
            Self::Include(set) => LogCategory::all().filter(|c| !set.contains(c)).collect(),
        }
    }
}

fn parse_keys(spec: &str) -> Result<BTreeSet<LogCategory>, CoreError> {
    spec.split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::parse::<LogCategory>)
        .collect()
}

/// Classify and filter the newest-first slice of a device log.
///
/// A negative `count`, or one larger than the number of lines, selects
/// every line. Counting happens before filtering.
pub fn select(log_text: &str, count: i64, filter: &LogFilter) -> Vec<LogEntry> {
    let lines: Vec<&str> = log_text.split('\n').filter(|l| !l.trim().is_empty()).collect();

    let available = lines.len();
    let count = usize::try_from(count).map_or(available, |n| n.min(available));
    let excluded = filter.effective_exclusions();

    lines[..count]
        .iter()
        .rev()
        .map(|line| classify(line.trim_end_matches('\r')))
        .filter(|entry| !excluded.contains(&entry.category))
        .collect()
}
