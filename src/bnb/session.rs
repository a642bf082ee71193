//! One depth-first search over the chain tree.
//!
//! A session owns its partial chain and stack and talks to the incumbent and
//! the budget through [`IncumbentStore`] and [`Budget`], so the same loop
//! drives both the single-threaded search and each parallel worker.
//!
//! Per node expansion:
//! 1. charge the budget (stop if spent)
//! 2. compute the child's partial loss plus the remaining-cost bound
//! 3. prune if that cannot beat the incumbent
//! 4. otherwise place the item; offer complete chains to the incumbent, or
//!    open a new level with the children queued cheapest-on-top

use tracing::trace;

use super::budget::Budget;
use super::chain::{PartialChain, PIVOT};
use super::config::BnbConfig;
use super::incumbent::{Incumbent, IncumbentStore};
use super::stack::{Decision, SearchStack, Side};
use crate::loss::DistanceTable;
use crate::strategy::{SearchStats, SearchStatus};

/// How a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Termination {
    /// Every branch was explored or pruned.
    Exhausted,
    /// The budget ran out first.
    BudgetExhausted,
}

impl From<Termination> for SearchStatus {
    fn from(t: Termination) -> Self {
        match t {
            Termination::Exhausted => SearchStatus::Optimal,
            Termination::BudgetExhausted => SearchStatus::BudgetExhausted,
        }
    }
}

/// Final state of a complete (possibly parallel) search.
#[derive(Debug, Clone)]
pub(crate) struct SearchOutcome {
    pub incumbent: Incumbent,
    pub status: SearchStatus,
    pub stats: SearchStats,
}

pub(crate) struct SearchSession<'a, I, B> {
    table: &'a DistanceTable,
    config: &'a BnbConfig,
    chain: PartialChain,
    stack: SearchStack,
    children: Vec<Decision>,
    leaf: Vec<usize>,
    partial: f64,
    incumbent: I,
    budget: B,
    stats: SearchStats,
}

impl<'a, I, B> SearchSession<'a, I, B>
where
    I: IncumbentStore,
    B: Budget,
{
    pub fn new(table: &'a DistanceTable, config: &'a BnbConfig, incumbent: I, budget: B) -> Self {
        let n = table.len();
        Self {
            table,
            config,
            chain: PartialChain::new(n),
            stack: SearchStack::preallocated(n),
            children: Vec::with_capacity(2 * n),
            leaf: Vec::with_capacity(n),
            partial: 0.0,
            incumbent,
            budget,
            stats: SearchStats::default(),
        }
    }

    /// Searches the whole tree, starting by placing the pivot.
    pub fn run(mut self) -> (I, Termination, SearchStats) {
        self.stack.push_root();
        self.stack.push(Decision::new(PIVOT, Side::Append, 0.0));
        self.search()
    }

    /// Searches only the subtree below the pivot that starts with `branch`.
    ///
    /// The pivot placement itself is not charged to the budget here.
    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    pub fn run_branch(mut self, branch: Decision) -> (I, Termination, SearchStats) {
        self.chain.apply(Decision::new(PIVOT, Side::Append, 0.0));
        self.stats.on_depth_update(1);
        self.stack.push_root();
        self.stack.push(branch);
        self.search()
    }

    fn search(mut self) -> (I, Termination, SearchStats) {
        let termination = loop {
            let Some(decision) = self.stack.pop() else {
                match self.stack.pop_frame() {
                    Some((applied, partial_before)) => {
                        self.chain.undo(applied);
                        self.partial = partial_before;
                        continue;
                    }
                    None => break Termination::Exhausted,
                }
            };
            if !self.budget.try_expand() {
                break Termination::BudgetExhausted;
            }
            self.stats.on_node_expanded();
            self.expand(decision);
        };
        (self.incumbent, termination, self.stats)
    }

    fn expand(&mut self, decision: Decision) {
        let partial = self.partial + decision.cost;
        let estimate = if self.config.lower_bound {
            partial + self.chain.remaining_bound(self.table, decision)
        } else {
            partial
        };
        if estimate > self.config.prune_threshold(self.incumbent.bound()) {
            self.stats.on_pruning_bound();
            return;
        }

        let partial_before = self.partial;
        self.chain.apply(decision);
        self.partial = partial;
        self.stats.on_depth_update(self.chain.len());

        if self.chain.is_complete() {
            self.on_complete();
            self.chain.undo(decision);
            self.partial = partial_before;
            return;
        }

        self.stack.push_frame(decision, partial_before);
        self.chain.children(self.table, &mut self.children);
        self.stack.extend(self.children.iter().rev().copied());
    }

    fn on_complete(&mut self) {
        self.leaf.clear();
        self.leaf.extend_from_slice(self.chain.order());
        self.table.canonicalize(&mut self.leaf);
        let loss = self.table.path_loss(&self.leaf);
        self.stats.on_solution_found();

        if self.incumbent.offer(&self.leaf, loss) {
            self.stats.on_incumbent_update();
            trace!(
                event = "incumbent_update",
                loss = loss,
                nodes = self.stats.nodes_expanded,
                order = ?self.leaf,
            );
        }
    }
}
