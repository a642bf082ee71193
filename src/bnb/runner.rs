//! Branch-and-bound execution.

use std::time::Instant;

use tracing::debug;

use super::budget::LocalBudget;
use super::chain::{greedy_order, nearest_neighbor_order};
use super::config::BnbConfig;
use super::incumbent::Incumbent;
use super::session::{SearchOutcome, SearchSession};
use crate::error::{Result, SequencingError};
use crate::item::Domino;
use crate::loss::DistanceTable;
use crate::metric::Metric;
use crate::strategy::{OrderingStrategy, SearchStatus, SortResult};

/// Branch-and-bound solver.
///
/// # Examples
///
/// ```
/// use u_chainsort::bnb::{BnbConfig, BranchAndBound};
/// use u_chainsort::metric::Euclidean;
///
/// let items = [(0.2, 0.3), (0.9, 0.1), (0.1, 0.2), (0.3, 0.9)];
/// let result = BranchAndBound::new(BnbConfig::default())
///     .solve(&items, &Euclidean)
///     .unwrap();
/// assert_eq!(result.order, vec![2, 0, 3, 1]);
/// assert_eq!(result.loss, 0.0);
/// assert!(result.status.is_optimal());
/// ```
#[derive(Debug, Clone, Default)]
pub struct BranchAndBound {
    config: BnbConfig,
}

impl BranchAndBound {
    /// Creates a solver with the given configuration.
    pub fn new(config: BnbConfig) -> Self {
        Self { config }
    }

    /// The solver configuration.
    pub fn config(&self) -> &BnbConfig {
        &self.config
    }

    /// Orders `items` using the configured budget.
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
        self.config
            .validate()
            .map_err(SequencingError::InvalidConfig)?;

        let n = items.len();
        if n <= 1 {
            return Ok(SortResult::trivial(items));
        }

        let start = Instant::now();
        let table = DistanceTable::build(items, metric)?;
        let parallel = self.config.parallel && cfg!(feature = "parallel");

        debug!(
            event = "search_start",
            solver = self.name(),
            items = n,
            metric = metric.name(),
            max_iterations = ?budget,
            lower_bound = self.config.lower_bound,
            parallel,
        );

        let seed = initial_incumbent(&table);
        let SearchOutcome {
            incumbent,
            status,
            mut stats,
        } = self.search(&table, seed, budget);

        stats.elapsed = start.elapsed();
        if status == SearchStatus::BudgetExhausted {
            debug!(
                event = "budget_exhausted",
                solver = self.name(),
                nodes = stats.nodes_expanded,
                loss = incumbent.loss,
            );
        }
        debug!(
            event = "search_end",
            solver = self.name(),
            status = ?status,
            loss = incumbent.loss,
            nodes = stats.nodes_expanded,
            pruned = stats.prunings_bound,
            duration_ms = stats.elapsed.as_millis() as u64,
        );

        Ok(SortResult::from_order(
            items,
            incumbent.order,
            incumbent.loss,
            status,
            stats,
        ))
    }

    fn search(&self, table: &DistanceTable, seed: Incumbent, budget: Option<u64>) -> SearchOutcome {
        #[cfg(feature = "parallel")]
        {
            if self.config.parallel {
                return super::parallel::search(table, &self.config, seed, budget);
            }
        }

        let session = SearchSession::new(table, &self.config, seed, LocalBudget::new(budget));
        let (incumbent, termination, stats) = session.run();
        SearchOutcome {
            incumbent,
            status: termination.into(),
            stats,
        }
    }
}

impl OrderingStrategy for BranchAndBound {
    fn name(&self) -> &'static str {
        "branch_and_bound"
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

/// Best of the input order, the greedy dive and a nearest-neighbour chain
/// from every start item. Computed before any budget is spent so that every
/// run returns a complete ordering.
fn initial_incumbent(table: &DistanceTable) -> Incumbent {
    let identity: Vec<usize> = (0..table.len()).collect();
    let loss = table.path_loss(&identity);
    let mut best = Incumbent::new(identity, loss);

    let candidates = std::iter::once(greedy_order(table))
        .chain((0..table.len()).map(|s| nearest_neighbor_order(table, s)));
    for mut order in candidates {
        table.canonicalize(&mut order);
        let loss = table.path_loss(&order);
        if best.is_improved_by(&order, loss) {
            best = Incumbent::new(order, loss);
        }
    }
    best
}
