//! Node-expansion budgets.
//!
//! The budget is the only way to bound the running time of a search: it is
//! charged once per node expansion and there is no wall-clock limit.

use std::sync::atomic::{AtomicU64, Ordering};

/// A counter of node expansions with an optional limit.
pub(crate) trait Budget {
    /// Charges one expansion. Returns `false` (without charging) if the
    /// budget is already spent.
    fn try_expand(&mut self) -> bool;
}

/// Budget owned by a single search.
#[derive(Debug, Clone)]
pub(crate) struct LocalBudget {
    used: u64,
    limit: Option<u64>,
}

impl LocalBudget {
    pub fn new(limit: Option<u64>) -> Self {
        Self { used: 0, limit }
    }
}

impl Budget for LocalBudget {
    #[inline]
    fn try_expand(&mut self) -> bool {
        if self.limit.is_some_and(|limit| self.used >= limit) {
            return false;
        }
        self.used += 1;
        true
    }
}

/// Budget shared by concurrent searches through one atomic counter.
#[cfg_attr(not(feature = "parallel"), allow(dead_code))]
#[derive(Debug, Clone, Copy)]
pub(crate) struct SharedBudget<'a> {
    used: &'a AtomicU64,
    limit: Option<u64>,
}

#[cfg_attr(not(feature = "parallel"), allow(dead_code))]
impl<'a> SharedBudget<'a> {
    pub fn new(used: &'a AtomicU64, limit: Option<u64>) -> Self {
        Self { used, limit }
    }
}

impl Budget for SharedBudget<'_> {
    #[inline]
    fn try_expand(&mut self) -> bool {
        match self.limit {
            None => {
                self.used.fetch_add(1, Ordering::Relaxed);
                true
            }
            Some(limit) => self
                .used
                .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| {
                    (n < limit).then_some(n + 1)
                })
                .is_ok(),
        }
    }
}
