use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Counters for the report generator
#[derive(Debug, Default)]
pub struct GeneratorStats {
    /// Documents generated
    pub total_generated: AtomicU64,
    /// Generations whose keys matched exactly
    pub full_matches: AtomicU64,
    /// Generations with one-sided keys
    pub partial_matches: AtomicU64,
    /// Placeholder occurrences replaced
    pub placeholders_replaced: AtomicU64,
    /// Placeholder occurrences left in place
    pub placeholders_unresolved: AtomicU64,
    /// Datasets that could not be read
    pub datasets_rejected: AtomicU64,
}

impl GeneratorStats {
    pub fn snapshot(&self) -> GeneratorStatsSnapshot {
        GeneratorStatsSnapshot {
            total_generated: self.total_generated.load(Ordering::Relaxed),
            full_matches: self.full_matches.load(Ordering::Relaxed),
            partial_matches: self.partial_matches.load(Ordering::Relaxed),
            placeholders_replaced: self.placeholders_replaced.load(Ordering::Relaxed),
            placeholders_unresolved: self.placeholders_unresolved.load(Ordering::Relaxed),
            datasets_rejected: self.datasets_rejected.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of generator statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratorStatsSnapshot {
    pub total_generated: u64,
    pub full_matches: u64,
    pub partial_matches: u64,
    pub placeholders_replaced: u64,
    pub placeholders_unresolved: u64,
    pub datasets_rejected: u64,
}
