//! Partial chain state.
//!
//! The chain grows from a pivot (input item 0) at both ends. Items occupy a
//! contiguous window `slots[left..right]` of a buffer twice the input size,
//! so prepending and appending are both O(1) and undo just moves a cursor.
//!
//! Every complete ordering is built along exactly one path: the pivot is
//! placed first, then the items to its right are appended in order, then
//! the items to its left are prepended in reverse order. Once a prepend has
//! happened, appending is no longer offered. Among items with identical
//! endpoints only the lowest-index unused one is branched on.

use super::stack::{Decision, Side};
use crate::loss::DistanceTable;

/// Input index of the item every chain starts from.
pub(crate) const PIVOT: usize = 0;

#[derive(Debug, Clone)]
pub(crate) struct PartialChain {
    slots: Vec<usize>,
    left: usize,
    right: usize,
    used: Vec<bool>,
    prepends: usize,
}

impl PartialChain {
    pub fn new(num_items: usize) -> Self {
        Self {
            slots: vec![0; 2 * num_items + 1],
            left: num_items,
            right: num_items,
            used: vec![false; num_items],
            prepends: 0,
        }
    }

    /// Number of items placed.
    #[inline]
    pub fn len(&self) -> usize {
        self.right - self.left
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.left == self.right
    }

    /// Whether every item has been placed.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.len() == self.used.len()
    }

    /// Placed items, first to last.
    #[inline]
    pub fn order(&self) -> &[usize] {
        &self.slots[self.left..self.right]
    }

    /// Places `decision.item` at the requested end.
    pub fn apply(&mut self, decision: Decision) {
        debug_assert!(!self.used[decision.item]);
        if self.is_empty() {
            self.slots[self.right] = decision.item;
            self.right += 1;
        } else {
            match decision.side {
                Side::Append => {
                    self.slots[self.right] = decision.item;
                    self.right += 1;
                }
                Side::Prepend => {
                    self.left -= 1;
                    self.slots[self.left] = decision.item;
                    self.prepends += 1;
                }
            }
        }
        self.used[decision.item] = true;
    }

    /// Reverts the most recent [`apply`](Self::apply) of `decision`.
    pub fn undo(&mut self, decision: Decision) {
        debug_assert!(self.used[decision.item]);
        self.used[decision.item] = false;
        if self.len() == 1 {
            self.right = self.left;
            return;
        }
        match decision.side {
            Side::Append => self.right -= 1,
            Side::Prepend => {
                self.left += 1;
                self.prepends -= 1;
            }
        }
    }

    /// Whether `item` should be branched on: unused, and the lowest unused
    /// index among the items identical to it.
    fn is_branch_candidate(&self, table: &DistanceTable, item: usize) -> bool {
        if self.used[item] {
            return false;
        }
        if !table.has_duplicates() {
            return true;
        }
        let class = table.class_of(item);
        !(class..item).any(|k| !self.used[k] && table.class_of(k) == class)
    }

    /// Writes the children of the current node into `out`, cheapest first.
    ///
    /// Ties are broken by item index, then by appending before prepending.
    /// The chain must not be empty.
    pub fn children(&self, table: &DistanceTable, out: &mut Vec<Decision>) {
        out.clear();
        let first = self.slots[self.left];
        let last = self.slots[self.right - 1];
        for item in 0..self.used.len() {
            if !self.is_branch_candidate(table, item) {
                continue;
            }
            if self.prepends == 0 {
                out.push(Decision::new(item, Side::Append, table.cost(last, item)));
            }
            out.push(Decision::new(item, Side::Prepend, table.cost(item, first)));
        }
        out.sort_by(|a, b| {
            a.cost
                .total_cmp(&b.cost)
                .then(a.item.cmp(&b.item))
                .then(a.side.cmp(&b.side))
        });
    }

    /// Admissible lower bound on the cost still to be paid once `placing`
    /// has been applied.
    ///
    /// Two estimates are combined. The global one: every unplaced item
    /// except possibly the first of the final sequence gets an incoming
    /// connection, and every one except possibly the last gets an outgoing
    /// one, so the remaining cost is at least the sum of the cheapest
    /// incoming (or outgoing) costs minus the largest.
    ///
    /// The end-aware one: each unplaced item ends up either before the
    /// chain, where it connects out to another unplaced item or to the
    /// current first item, or after it, where it is reached from another
    /// unplaced item or from the current last item. Once a prepend has
    /// happened only the first case remains.
    pub fn remaining_bound(&self, table: &DistanceTable, placing: Decision) -> f64 {
        let (first, last) = if self.is_empty() {
            (placing.item, placing.item)
        } else {
            match placing.side {
                Side::Append => (self.slots[self.left], placing.item),
                Side::Prepend => (placing.item, self.slots[self.right - 1]),
            }
        };
        let prepend_only =
            self.prepends > 0 || (!self.is_empty() && placing.side == Side::Prepend);
        let unplaced = |k: usize| !self.used[k] && k != placing.item;

        let mut sum_in = 0.0;
        let mut max_in: f64 = 0.0;
        let mut sum_out = 0.0;
        let mut max_out: f64 = 0.0;
        let mut linked = 0.0;
        for u in (0..self.used.len()).filter(|&u| unplaced(u)) {
            let cin = table.min_in(u);
            let cout = table.min_out(u);
            sum_in += cin;
            max_in = max_in.max(cin);
            sum_out += cout;
            max_out = max_out.max(cout);

            let mut out = table.cost(u, first);
            let mut inc = table.cost(last, u);
            for v in (0..self.used.len()).filter(|&v| v != u && unplaced(v)) {
                out = out.min(table.cost(u, v));
                inc = inc.min(table.cost(v, u));
            }
            linked += if prepend_only { out } else { out.min(inc) };
        }
        let global = (sum_in - max_in).max(sum_out - max_out).max(0.0);
        global.max(linked)
    }
}

/// Follows the cheapest child from the pivot down to a complete ordering.
///
/// This is exactly the first dive of the depth-first search, used to seed
/// the incumbent before any budget is spent.
pub(crate) fn greedy_order(table: &DistanceTable) -> Vec<usize> {
    let mut chain = PartialChain::new(table.len());
    chain.apply(Decision::new(PIVOT, Side::Append, 0.0));
    let mut children = Vec::with_capacity(2 * table.len());
    while !chain.is_complete() {
        chain.children(table, &mut children);
        match children.first() {
            Some(&next) => chain.apply(next),
            None => break,
        }
    }
    chain.order().to_vec()
}

/// Builds a chain from `start` by repeatedly appending the unused item
/// closest to the current end (ties to the lower index).
pub(crate) fn nearest_neighbor_order(table: &DistanceTable, start: usize) -> Vec<usize> {
    let n = table.len();
    let mut used = vec![false; n];
    let mut order = Vec::with_capacity(n);
    used[start] = true;
    order.push(start);
    let mut last = start;
    while order.len() < n {
        let next = (0..n).filter(|&k| !used[k]).min_by(|&a, &b| {
            table
                .cost(last, a)
                .total_cmp(&table.cost(last, b))
                .then(a.cmp(&b))
        });
        let Some(next) = next else { break };
        used[next] = true;
        order.push(next);
        last = next;
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::Manhattan;

    fn table(items: &[(f64, f64)]) -> DistanceTable {
        DistanceTable::build(items, &Manhattan).unwrap()
    }

    #[test]
    fn test_apply_and_undo_both_ends() {
        let mut chain = PartialChain::new(3);
        let pivot = Decision::new(0, Side::Append, 0.0);
        let after = Decision::new(1, Side::Append, 0.5);
        let before = Decision::new(2, Side::Prepend, 0.25);

        chain.apply(pivot);
        chain.apply(after);
        chain.apply(before);
        assert_eq!(chain.order(), &[2, 0, 1]);
        assert!(chain.is_complete());

        chain.undo(before);
        assert_eq!(chain.order(), &[0, 1]);
        chain.undo(after);
        assert_eq!(chain.order(), &[0]);
        chain.undo(pivot);
        assert!(chain.is_empty());
    }

    #[test]
    fn test_children_sorted_by_cost() {
        // pivot (0.5, 0.75); item 1 fits after, item 2 fits before
        let t = table(&[(0.5, 0.75), (0.75, 1.0), (0.0, 0.5)]);
        let mut chain = PartialChain::new(3);
        chain.apply(Decision::new(0, Side::Append, 0.0));

        let mut out = Vec::new();
        chain.children(&t, &mut out);
        assert_eq!(out.len(), 4);
        assert_eq!((out[0].item, out[0].side, out[0].cost), (1, Side::Append, 0.0));
        assert_eq!((out[1].item, out[1].side, out[1].cost), (2, Side::Prepend, 0.0));
        assert!(out.windows(2).all(|w| w[0].cost <= w[1].cost));
    }

    #[test]
    fn test_no_append_after_prepend() {
        let t = table(&[(0.5, 0.75), (0.75, 1.0), (0.0, 0.5)]);
        let mut chain = PartialChain::new(3);
        chain.apply(Decision::new(0, Side::Append, 0.0));
        chain.apply(Decision::new(2, Side::Prepend, 0.0));

        let mut out = Vec::new();
        chain.children(&t, &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].side, Side::Prepend);
        assert_eq!(out[0].item, 1);
    }

    #[test]
    fn test_identical_items_branch_once() {
        let t = table(&[(0.0, 1.0), (2.0, 2.0), (2.0, 2.0), (2.0, 2.0)]);
        let mut chain = PartialChain::new(4);
        chain.apply(Decision::new(0, Side::Append, 0.0));

        let mut out = Vec::new();
        chain.children(&t, &mut out);
        assert!(out.iter().all(|d| d.item == 1));

        chain.apply(Decision::new(1, Side::Append, 1.0));
        chain.children(&t, &mut out);
        assert!(out.iter().all(|d| d.item == 2));
    }

    #[test]
    fn test_remaining_bound_is_admissible() {
        use crate::exhaustive::{ExhaustiveConfig, ExhaustiveSolver};
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(11);
        let solver = ExhaustiveSolver::new(ExhaustiveConfig::default());
        for _ in 0..20 {
            let items: Vec<(f64, f64)> = (0..6)
                .map(|_| (rng.random::<f64>(), rng.random::<f64>()))
                .collect();
            let t = table(&items);
            let optimum = solver.solve(&items, &Manhattan).unwrap().loss;

            let pivot = Decision::new(PIVOT, Side::Append, 0.0);
            let mut chain = PartialChain::new(items.len());
            assert!(chain.remaining_bound(&t, pivot) <= optimum + 1e-12);

            // every ordering passes through one child of the pivot
            chain.apply(pivot);
            let mut out = Vec::new();
            chain.children(&t, &mut out);
            let best_child = out
                .iter()
                .map(|&d| d.cost + chain.remaining_bound(&t, d))
                .fold(f64::INFINITY, f64::min);
            assert!(best_child <= optimum + 1e-12);
        }
    }

    #[test]
    fn test_remaining_bound_after_prepend_charges_tail() {
        // 0 -> 1 -> 2 is the only zero-loss chain; prepending 2 before the
        // pivot leaves 1 to be prepended too, which must pay to reach 2
        let t = table(&[(1.0, 2.0), (2.0, 3.0), (0.0, 1.0)]);
        let mut chain = PartialChain::new(3);
        chain.apply(Decision::new(PIVOT, Side::Append, 0.0));

        let prepend = Decision::new(2, Side::Prepend, 0.0);
        assert_eq!(chain.remaining_bound(&t, prepend), 3.0);
        let append = Decision::new(1, Side::Append, 0.0);
        assert_eq!(chain.remaining_bound(&t, append), 0.0);
    }

    #[test]
    fn test_greedy_order_follows_zero_cost_links() {
        let items = [(0.5, 0.75), (0.0, 0.25), (0.75, 1.0), (0.25, 0.5)];
        let t = table(&items);
        assert_eq!(greedy_order(&t), vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_nearest_neighbor_from_chain_head() {
        let items = [(0.5, 0.75), (0.0, 0.25), (0.75, 1.0), (0.25, 0.5)];
        let t = table(&items);
        assert_eq!(nearest_neighbor_order(&t, 1), vec![1, 3, 0, 2]);
        assert_eq!(t.path_loss(&nearest_neighbor_order(&t, 1)), 0.0);

        let from_pivot = nearest_neighbor_order(&t, 0);
        assert_eq!(&from_pivot[..2], &[0, 2]);
        assert_eq!(from_pivot.len(), 4);
    }
}
