//! The ordering-strategy surface shared by both solvers.
//!
//! [`OrderingStrategy`] is the one capability callers program against; the
//! [`ExhaustiveSolver`] oracle and the [`BranchAndBound`] solver implement it
//! with identical contracts so that either can be substituted for the other.
//! [`Strategy`] is the tagged form, chosen explicitly at construction time.

use std::time::Duration;

use crate::bnb::{BnbConfig, BranchAndBound};
use crate::error::Result;
use crate::exhaustive::{ExhaustiveConfig, ExhaustiveSolver};
use crate::item::Domino;
use crate::metric::Metric;

/// How a search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStatus {
    /// The search space was fully explored; the ordering is optimal.
    Optimal,
    /// The iteration budget ran out; the ordering is the best found so far.
    BudgetExhausted,
}

impl SearchStatus {
    /// Whether the returned ordering is proven optimal.
    pub fn is_optimal(&self) -> bool {
        matches!(self, SearchStatus::Optimal)
    }
}

/// Counters collected during one solver call.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Budgeted units of work: search nodes for branch-and-bound, complete
    /// orderings for the exhaustive solver.
    pub nodes_expanded: u64,
    /// Branches discarded because they could not beat the incumbent.
    pub prunings_bound: u64,
    /// Complete orderings evaluated.
    pub solutions_found: u64,
    /// Times the incumbent was replaced.
    pub incumbent_updates: u64,
    /// Longest partial chain built.
    pub max_depth: usize,
    /// Wall-clock time of the call.
    pub elapsed: Duration,
}

impl SearchStats {
    #[inline]
    pub(crate) fn on_node_expanded(&mut self) {
        self.nodes_expanded = self.nodes_expanded.saturating_add(1);
    }

    #[inline]
    pub(crate) fn on_pruning_bound(&mut self) {
        self.prunings_bound = self.prunings_bound.saturating_add(1);
    }

    #[inline]
    pub(crate) fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add(1);
    }

    #[inline]
    pub(crate) fn on_incumbent_update(&mut self) {
        self.incumbent_updates = self.incumbent_updates.saturating_add(1);
    }

    #[inline]
    pub(crate) fn on_depth_update(&mut self, depth: usize) {
        self.max_depth = self.max_depth.max(depth);
    }

    /// Folds the counters of another (parallel) search into this one.
    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    pub(crate) fn merge(&mut self, other: &SearchStats) {
        self.nodes_expanded = self.nodes_expanded.saturating_add(other.nodes_expanded);
        self.prunings_bound = self.prunings_bound.saturating_add(other.prunings_bound);
        self.solutions_found = self.solutions_found.saturating_add(other.solutions_found);
        self.incumbent_updates = self
            .incumbent_updates
            .saturating_add(other.incumbent_updates);
        self.max_depth = self.max_depth.max(other.max_depth);
    }
}

impl std::fmt::Display for SearchStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Search statistics:")?;
        writeln!(f, "  Nodes expanded:     {}", self.nodes_expanded)?;
        writeln!(f, "  Prunings (bound):   {}", self.prunings_bound)?;
        writeln!(f, "  Solutions found:    {}", self.solutions_found)?;
        writeln!(f, "  Incumbent updates:  {}", self.incumbent_updates)?;
        writeln!(f, "  Max depth reached:  {}", self.max_depth)?;
        writeln!(f, "  Total time:         {:.2?}", self.elapsed)?;
        Ok(())
    }
}

/// Result of a solver call.
#[derive(Debug, Clone)]
pub struct SortResult<D> {
    /// The caller's items in the chosen order.
    pub items: Vec<D>,
    /// `order[k]` is the input index of the item placed at position `k`.
    pub order: Vec<usize>,
    /// Loss of the returned ordering.
    pub loss: f64,
    /// Whether the ordering is proven optimal.
    pub status: SearchStatus,
    /// Search counters.
    pub stats: SearchStats,
}

impl<D: Clone> SortResult<D> {
    /// Result for inputs of length 0 or 1: returned unchanged, no search.
    pub(crate) fn trivial(items: &[D]) -> Self {
        Self {
            items: items.to_vec(),
            order: (0..items.len()).collect(),
            loss: 0.0,
            status: SearchStatus::Optimal,
            stats: SearchStats::default(),
        }
    }

    pub(crate) fn from_order(
        items: &[D],
        order: Vec<usize>,
        loss: f64,
        status: SearchStatus,
        stats: SearchStats,
    ) -> Self {
        Self {
            items: order.iter().map(|&i| items[i].clone()).collect(),
            order,
            loss,
            status,
            stats,
        }
    }
}

/// A strategy that orders two-ended items to minimize total mismatch.
///
/// Both implementations share the same contract, so they can be swapped
/// freely: given the same items, metric and a sufficient budget they return
/// orderings of equal loss.
///
/// # Examples
///
/// ```
/// use u_chainsort::metric::Manhattan;
/// use u_chainsort::{OrderingStrategy, Strategy};
///
/// let items = [(0.5, 0.75), (0.0, 0.25), (0.75, 1.0), (0.25, 0.5)];
/// for strategy in [Strategy::exhaustive(), Strategy::branch_and_bound()] {
///     let sorted = strategy.sort(&items, &Manhattan, None).unwrap();
///     assert_eq!(sorted, vec![(0.0, 0.25), (0.25, 0.5), (0.5, 0.75), (0.75, 1.0)]);
/// }
/// ```
pub trait OrderingStrategy {
    /// Short name used in log events.
    fn name(&self) -> &'static str;

    /// Orders `items`, spending at most `max_iterations` units of work, and
    /// reports the details of the search.
    ///
    /// `None` falls back to the budget in the solver's configuration.
    fn solve_with_budget<D, M>(
        &self,
        items: &[D],
        metric: &M,
        max_iterations: Option<u64>,
    ) -> Result<SortResult<D>>
    where
        D: Domino + Clone,
        M: Metric + ?Sized;

    /// Orders `items` and returns them in the chosen order.
    ///
    /// Budget exhaustion is not an error: the best ordering found so far
    /// is returned.
    fn sort<D, M>(&self, items: &[D], metric: &M, max_iterations: Option<u64>) -> Result<Vec<D>>
    where
        D: Domino + Clone,
        M: Metric + ?Sized,
    {
        Ok(self.solve_with_budget(items, metric, max_iterations)?.items)
    }
}

/// A solver chosen explicitly by the caller.
#[derive(Debug, Clone)]
pub enum Strategy {
    /// Enumerates every ordering. Only for small inputs.
    Exhaustive(ExhaustiveSolver),
    /// Pruned depth-first search.
    BranchAndBound(BranchAndBound),
}

impl Strategy {
    /// Exhaustive solver with default configuration.
    pub fn exhaustive() -> Self {
        Strategy::Exhaustive(ExhaustiveSolver::new(ExhaustiveConfig::default()))
    }

    /// Branch-and-bound solver with default configuration.
    pub fn branch_and_bound() -> Self {
        Strategy::BranchAndBound(BranchAndBound::new(BnbConfig::default()))
    }
}

impl OrderingStrategy for Strategy {
    fn name(&self) -> &'static str {
        match self {
            Strategy::Exhaustive(s) => s.name(),
            Strategy::BranchAndBound(s) => s.name(),
        }
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
        match self {
            Strategy::Exhaustive(s) => s.solve_with_budget(items, metric, max_iterations),
            Strategy::BranchAndBound(s) => s.solve_with_budget(items, metric, max_iterations),
        }
    }
}
