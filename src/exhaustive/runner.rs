//! Exhaustive enumeration.
//!
//! # Algorithm
//!
//! 1. Score the input order; it is the first incumbent
//! 2. Step through all permutations of the input indices in lexicographic
//!    order, scoring each with the precomputed distance table
//! 3. Replace the incumbent only on a strictly lower loss, so among equal
//!    losses the lexicographically smallest index sequence is kept
//! 4. Stop when the permutations run out or the budget is spent
//!
//! No pruning is performed.

use std::time::Instant;

use tracing::debug;

use super::config::ExhaustiveConfig;
use crate::error::Result;
use crate::item::Domino;
use crate::loss::DistanceTable;
use crate::metric::Metric;
use crate::strategy::{OrderingStrategy, SearchStats, SearchStatus, SortResult};

/// Exhaustive (oracle) solver.
#[derive(Debug, Clone, Default)]
pub struct ExhaustiveSolver {
    config: ExhaustiveConfig,
}

impl ExhaustiveSolver {
    /// Creates a solver with the given configuration.
    pub fn new(config: ExhaustiveConfig) -> Self {
        Self { config }
    }

    /// The solver configuration.
    pub fn config(&self) -> &ExhaustiveConfig {
        &self.config
    }

    /// Orders `items` using the configured budget.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_chainsort::exhaustive::{ExhaustiveConfig, ExhaustiveSolver};
    /// use u_chainsort::metric::Manhattan;
    ///
    /// let solver = ExhaustiveSolver::new(ExhaustiveConfig::default());
    /// let result = solver.solve(&[(1.0, 2.0), (0.0, 1.0)], &Manhattan).unwrap();
    /// assert_eq!(result.order, vec![1, 0]);
    /// assert_eq!(result.loss, 0.0);
    /// ```
    pub fn solve<D, M>(&self, items: &[D], metric: &M) -> Result<SortResult<D>>
    where
        D: Domino + Clone,
        M: Metric + ?Sized,
    {
        self.run(items, metric, self.config.max_iterations)
    }

    fn run<D, M>(&self, items: &[D], metric: &M, budget: Option<u64>) -> Result<SortResult<D>>
    where
        D: Domino + Clone,
        M: Metric + ?Sized,
    {
        let n = items.len();
        if n <= 1 {
            return Ok(SortResult::trivial(items));
        }

        let start = Instant::now();
        let table = DistanceTable::build(items, metric)?;

        debug!(
            event = "search_start",
            solver = self.name(),
            items = n,
            metric = metric.name(),
            max_iterations = ?budget,
        );

        let mut stats = SearchStats::default();
        let mut perm: Vec<usize> = (0..n).collect();
        let mut best = perm.clone();
        let mut best_loss = table.path_loss(&perm);
        stats.on_solution_found();
        stats.on_depth_update(n);

        let status = loop {
            if !next_permutation(&mut perm) {
                break SearchStatus::Optimal;
            }
            if budget.is_some_and(|limit| stats.nodes_expanded >= limit) {
                break SearchStatus::BudgetExhausted;
            }
            stats.on_node_expanded();
            stats.on_solution_found();

            let loss = table.path_loss(&perm);
            if loss < best_loss {
                best_loss = loss;
                best.copy_from_slice(&perm);
                stats.on_incumbent_update();
            }
        };

        stats.elapsed = start.elapsed();
        if status == SearchStatus::BudgetExhausted {
            debug!(
                event = "budget_exhausted",
                solver = self.name(),
                orderings = stats.solutions_found,
                loss = best_loss,
            );
        }
        debug!(
            event = "search_end",
            solver = self.name(),
            status = ?status,
            loss = best_loss,
            orderings = stats.solutions_found,
            duration_ms = stats.elapsed.as_millis() as u64,
        );

        Ok(SortResult::from_order(items, best, best_loss, status, stats))
    }
}

impl OrderingStrategy for ExhaustiveSolver {
    fn name(&self) -> &'static str {
        "exhaustive"
    }

    fn solve_with_budget<D, M>(
        &self,
        items: &[D],
        metric: &M,
        max_iterations: Option<u64>,
    ) -> Result<SortResult<D>>
    where
        D: Domino + Clone,
        M: Metric + ?Sized,
    {
        self.run(items, metric, max_iterations.or(self.config.max_iterations))
    }
}

/// Advances `perm` to the next permutation in lexicographic order.
///
/// Returns `false` (leaving `perm` as the last permutation) when `perm` is
/// already the last one.
fn next_permutation(perm: &mut [usize]) -> bool {
    if perm.len() < 2 {
        return false;
    }
    let mut i = perm.len() - 1;
    while i > 0 && perm[i - 1] >= perm[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }
    let mut j = perm.len() - 1;
    while perm[j] <= perm[i - 1] {
        j -= 1;
    }
    perm.swap(i - 1, j);
    perm[i..].reverse();
    true
}
