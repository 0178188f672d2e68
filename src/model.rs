use std::collections::BTreeMap;
use std::fmt;

use crate::report::ScanReport;

/// A container image reference such as `alpine:3.18` or `repo/name@sha256:...`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new<S: Into<String>>(value: S) -> Self {
        ImageRef(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The four severity levels printed in every summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub const ALL: [Severity; 4] =
        [Severity::Critical, Severity::High, Severity::Medium, Severity::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }

    /// Exact, case-sensitive match against the scanner's label.
    pub fn from_label(label: &str) -> Option<Self> {
        Severity::ALL.into_iter().find(|severity| severity.as_str() == label)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Match counts keyed by the raw severity label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeverityTally {
    counts: BTreeMap<String, usize>,
}

impl SeverityTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_report(report: &ScanReport) -> Self {
        let mut tally = SeverityTally::new();
        for entry in &report.matches {
            tally.record(&entry.vulnerability.severity);
        }
        tally
    }

    pub fn record(&mut self, label: &str) {
        *self.counts.entry(label.to_string()).or_insert(0) += 1;
    }

    pub fn count(&self, label: &str) -> usize {
        self.counts.get(label).copied().unwrap_or_default()
    }

    pub fn count_for(&self, severity: Severity) -> usize {
        self.count(severity.as_str())
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Buckets whose label is not one of the canonical severities, in label order.
    pub fn uncategorized(&self) -> Vec<(&str, usize)> {
        self.counts
            .iter()
            .filter(|(label, _)| Severity::from_label(label).is_none())
            .map(|(label, count)| (label.as_str(), *count))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
