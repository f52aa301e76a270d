//! Statistics over the alias collection

use serde::Serialize;

use crate::aliases::AliasRecord;

/// Counters shown on top of the alias table
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// All aliases
    pub total: usize,

    /// Aliases currently forwarding
    pub active: usize,

    /// Aliases with leak protection enabled
    pub leak_protected: usize,

    /// Aliases not forwarding, either paused or leaked
    pub disabled: usize,
}

/// Count the aliases
pub fn compute_stats(records: &[AliasRecord]) -> Stats {
    let active = records.iter().filter(|alias| alias.is_active()).count();

    Stats {
        total: records.len(),
        active,
        leak_protected: records.iter().filter(|alias| alias.leak_protected).count(),
        disabled: records.len() - active,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::demo_aliases;

    #[test]
    fn test_compute_stats() {
        let stats = compute_stats(&demo_aliases());

        assert_eq!(
            Stats {
                total: 8,
                active: 5,
                leak_protected: 5,
                disabled: 3,
            },
            stats
        );
    }

    #[test]
    fn test_compute_stats_empty() {
        assert_eq!(Stats::default(), compute_stats(&[]));
    }
}
