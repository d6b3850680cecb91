use std::collections::{BTreeSet, HashMap};
use strata_migration::{AppliedMigration, Migration};

/// What one run would do, derived from the loaded series and the tracking table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationPlan {
    /// Lowest applied id whose file is gone or whose checksum no longer matches.
    pub divergence: Option<i64>,
    /// Applied ids at or above `divergence`, highest first.
    pub rollback: Vec<i64>,
    /// Loaded ids not applied once `rollback` has run, lowest first.
    pub apply: Vec<i64>,
}

impl ReconciliationPlan {
    pub fn compute(loaded: &[Migration], applied: &[AppliedMigration]) -> Self {
        let divergence = find_divergence(loaded, applied);

        let mut rollback: Vec<i64> = match divergence {
            Some(first) => applied.iter().map(|a| a.id).filter(|id| *id >= first).collect(),
            None => Vec::new(),
        };
        rollback.sort_unstable_by(|a, b| b.cmp(a));
        rollback.dedup();

        let remaining: BTreeSet<i64> = applied
            .iter()
            .map(|a| a.id)
            .filter(|id| !rollback.contains(id))
            .collect();

        let mut apply: Vec<i64> = loaded
            .iter()
            .map(|m| m.id)
            .filter(|id| !remaining.contains(id))
            .collect();
        apply.sort_unstable();

        Self {
            divergence,
            rollback,
            apply,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.rollback.is_empty() && self.apply.is_empty()
    }

    /// A diverged history can only be reconciled in development mode.
    pub fn is_blocked(&self, development: bool) -> bool {
        self.divergence.is_some() && !development
    }
}

/// Every applied record with no file of the same id, or with a different checksum, is a
/// mismatch; the earliest one is where history and files part ways.
pub fn find_divergence(loaded: &[Migration], applied: &[AppliedMigration]) -> Option<i64> {
    let mut loaded_by_id: HashMap<i64, &Migration> = HashMap::with_capacity(loaded.len());
    for m in loaded {
        loaded_by_id.insert(m.id, m);
    }

    applied
        .iter()
        .filter(|a| match loaded_by_id.get(&a.id) {
            Some(m) => m.checksum != a.checksum,
            None => true,
        })
        .map(|a| a.id)
        .min()
}
