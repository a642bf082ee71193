//! Parallel branch-and-bound.
//!
//! The pivot is placed once and each of its children becomes an independent
//! subtree searched on the rayon pool. Workers share one incumbent, so a good
//! ordering found in one subtree tightens pruning in all of them, and one
//! node-expansion counter, so the budget caps the total work.
//!
//! A complete run returns the same ordering as the sequential search: the
//! incumbent keeps the lexicographically smallest ordering among equal
//! losses regardless of which worker found it first.

use std::sync::atomic::AtomicU64;

use rayon::prelude::*;

use super::budget::{Budget, SharedBudget};
use super::chain::{PartialChain, PIVOT};
use super::config::BnbConfig;
use super::incumbent::{Incumbent, SharedIncumbent};
use super::session::{SearchOutcome, SearchSession, Termination};
use super::stack::{Decision, Side};
use crate::loss::DistanceTable;
use crate::strategy::{SearchStats, SearchStatus};

pub(crate) fn search(
    table: &DistanceTable,
    config: &BnbConfig,
    seed: Incumbent,
    limit: Option<u64>,
) -> SearchOutcome {
    let shared = SharedIncumbent::new(seed);
    let used = AtomicU64::new(0);
    let mut stats = SearchStats::default();

    // the pivot expansion is charged like any other node
    if !SharedBudget::new(&used, limit).try_expand() {
        return SearchOutcome {
            incumbent: shared.into_inner(),
            status: SearchStatus::BudgetExhausted,
            stats,
        };
    }
    stats.on_node_expanded();
    stats.on_depth_update(1);

    let mut chain = PartialChain::new(table.len());
    chain.apply(Decision::new(PIVOT, Side::Append, 0.0));
    let mut branches = Vec::with_capacity(2 * table.len());
    chain.children(table, &mut branches);

    let results: Vec<(Termination, SearchStats)> = branches
        .par_iter()
        .map(|&branch| {
            let session =
                SearchSession::new(table, config, &shared, SharedBudget::new(&used, limit));
            let (_, termination, stats) = session.run_branch(branch);
            (termination, stats)
        })
        .collect();

    let mut status = SearchStatus::Optimal;
    for (termination, worker) in &results {
        stats.merge(worker);
        if *termination == Termination::BudgetExhausted {
            status = SearchStatus::BudgetExhausted;
        }
    }

    SearchOutcome {
        incumbent: shared.into_inner(),
        status,
        stats,
    }
}
