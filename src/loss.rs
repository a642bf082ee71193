//! Loss evaluation.
//!
//! The loss of a sequence is the total mismatch between touching ends of
//! consecutive items:
//!
//! ```text
//! loss(s) = sum_{i=1}^{n-1} distance(s[i-1].end, s[i].start)
//! ```
//!
//! [`loss`] scores an arbitrary sequence directly. The solvers instead build
//! a [`DistanceTable`] once per call, which evaluates the metric for every
//! ordered pair of items up front. Metric failures therefore surface before
//! any search work starts, and the search itself cannot fail.

use std::collections::HashMap;

use crate::error::{Result, SequencingError};
use crate::item::Domino;
use crate::metric::{Endpoint, Metric};

/// Computes the loss of `sequence` under `metric`.
///
/// Returns `0.0` for sequences of length 0 or 1. Any metric failure is
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use u_chainsort::loss::loss;
/// use u_chainsort::metric::Manhattan;
///
/// let chain = [(0.0, 0.25), (0.25, 0.5), (0.5, 0.75)];
/// assert_eq!(loss(&chain, &Manhattan).unwrap(), 0.0);
///
/// let broken = [(0.0, 0.25), (0.5, 0.75), (0.25, 0.5)];
/// assert_eq!(loss(&broken, &Manhattan).unwrap(), 0.5);
/// ```
pub fn loss<D, M>(sequence: &[D], metric: &M) -> Result<f64>
where
    D: Domino,
    M: Metric + ?Sized,
{
    sequence
        .windows(2)
        .map(|pair| metric.distance(pair[0].end().coords(), pair[1].start().coords()))
        .sum()
}

/// Pairwise connection costs of a fixed item collection.
///
/// `cost(i, j)` is `distance(items[i].end, items[j].start)`, the price of
/// placing item `j` directly after item `i`. The table also records which
/// items are interchangeable (bit-identical endpoints) and the cheapest
/// incoming and outgoing connection of every item, which the
/// branch-and-bound lower bound relies on.
#[derive(Debug, Clone)]
pub struct DistanceTable {
    n: usize,
    /// Row-major `n * n` matrix; the diagonal is unused and left at zero.
    cost: Vec<f64>,
    /// Lowest index of the group of items identical to each item.
    class_of: Vec<usize>,
    has_duplicates: bool,
    min_in: Vec<f64>,
    min_out: Vec<f64>,
}

impl DistanceTable {
    /// Evaluates `metric` on every ordered pair of distinct items.
    ///
    /// # Errors
    ///
    /// Propagates metric failures, and rejects negative or non-finite
    /// distances with [`SequencingError::InvalidDistance`].
    pub fn build<D, M>(items: &[D], metric: &M) -> Result<Self>
    where
        D: Domino,
        M: Metric + ?Sized,
    {
        let n = items.len();
        let mut cost = vec![0.0; n * n];

        for (i, left) in items.iter().enumerate() {
            let end = left.end().coords();
            for (j, right) in items.iter().enumerate() {
                if i == j {
                    continue;
                }
                let value = metric.distance(end, right.start().coords())?;
                if !value.is_finite() || value < 0.0 {
                    return Err(SequencingError::InvalidDistance {
                        from: i,
                        to: j,
                        value,
                    });
                }
                cost[i * n + j] = value;
            }
        }

        let mut min_in = vec![f64::INFINITY; n];
        let mut min_out = vec![f64::INFINITY; n];
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    let c = cost[i * n + j];
                    min_out[i] = min_out[i].min(c);
                    min_in[j] = min_in[j].min(c);
                }
            }
        }

        let mut seen: HashMap<(Vec<u64>, Vec<u64>), usize> = HashMap::new();
        let mut class_of = Vec::with_capacity(n);
        for (i, item) in items.iter().enumerate() {
            let key = (bits(item.start().coords()), bits(item.end().coords()));
            class_of.push(*seen.entry(key).or_insert(i));
        }
        let has_duplicates = seen.len() < n;

        Ok(Self {
            n,
            cost,
            class_of,
            has_duplicates,
            min_in,
            min_out,
        })
    }

    /// Number of items covered by the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    /// Whether the table covers no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Cost of placing item `to` directly after item `from`.
    #[inline]
    pub fn cost(&self, from: usize, to: usize) -> f64 {
        self.cost[from * self.n + to]
    }

    /// Cheapest connection into item `i` from any other item.
    #[inline]
    pub fn min_in(&self, i: usize) -> f64 {
        self.min_in[i]
    }

    /// Cheapest connection out of item `i` into any other item.
    #[inline]
    pub fn min_out(&self, i: usize) -> f64 {
        self.min_out[i]
    }

    /// Lowest index among the items identical to item `i`.
    #[inline]
    pub fn class_of(&self, i: usize) -> usize {
        self.class_of[i]
    }

    /// Whether any two items have identical endpoints.
    #[inline]
    pub fn has_duplicates(&self) -> bool {
        self.has_duplicates
    }

    /// Loss of the ordering `order` (indices into the original items),
    /// summed left to right.
    pub fn path_loss(&self, order: &[usize]) -> f64 {
        order.windows(2).map(|w| self.cost(w[0], w[1])).sum()
    }

    /// Rewrites `order` so that every group of identical items appears in
    /// increasing index order. The loss is unchanged.
    pub(crate) fn canonicalize(&self, order: &mut [usize]) {
        if !self.has_duplicates {
            return;
        }
        let mut groups: Vec<Vec<usize>> = vec![Vec::new(); self.n];
        for (pos, &idx) in order.iter().enumerate() {
            groups[self.class_of[idx]].push(pos);
        }
        for positions in groups.iter().filter(|g| g.len() > 1) {
            let mut ids: Vec<usize> = positions.iter().map(|&p| order[p]).collect();
            ids.sort_unstable();
            for (&p, id) in positions.iter().zip(ids) {
                order[p] = id;
            }
        }
    }
}

fn bits(coords: &[f64]) -> Vec<u64> {
    coords.iter().map(|c| c.to_bits()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Item;
    use crate::metric::{Euclidean, Manhattan};
    use proptest::prelude::*;

    struct Failing;

    impl Metric for Failing {
        fn distance(&self, _a: &[f64], _b: &[f64]) -> Result<f64> {
            Err(SequencingError::Metric("unavailable".into()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    struct Negative;

    impl Metric for Negative {
        fn distance(&self, _a: &[f64], _b: &[f64]) -> Result<f64> {
            Ok(-1.0)
        }

        fn name(&self) -> &str {
            "negative"
        }
    }

    #[test]
    fn test_loss_trivial_sequences() {
        let empty: [(f64, f64); 0] = [];
        assert_eq!(loss(&empty, &Manhattan).unwrap(), 0.0);
        assert_eq!(loss(&[(3.0, 7.0)], &Manhattan).unwrap(), 0.0);
        // trivial sequences never consult the metric
        assert_eq!(loss(&[(3.0, 7.0)], &Failing).unwrap(), 0.0);
    }

    #[test]
    fn test_loss_vector_endpoints() {
        let seq = [
            Item::new([0.0, 0.0], [1.0, 1.0]),
            Item::new([4.0, 5.0], [0.0, 0.0]),
        ];
        assert!((loss(&seq, &Manhattan).unwrap() - 7.0).abs() < 1e-12);
        assert!((loss(&seq, &Euclidean).unwrap() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_loss_propagates_metric_failure() {
        let seq = [(0.0, 1.0), (1.0, 2.0)];
        assert_eq!(
            loss(&seq, &Failing).unwrap_err(),
            SequencingError::Metric("unavailable".into())
        );
    }

    #[test]
    fn test_loss_shape_mismatch() {
        let seq = [
            Item::new(vec![0.0], vec![1.0, 2.0]),
            Item::new(vec![1.0], vec![0.0]),
        ];
        assert!(matches!(
            loss(&seq, &Manhattan),
            Err(SequencingError::DimensionMismatch { left: 2, right: 1 })
        ));
    }

    #[test]
    fn test_table_costs_are_directed() {
        let items = [(0.0, 1.0), (3.0, 0.5)];
        let table = DistanceTable::build(&items, &Manhattan).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.cost(0, 1), 2.0);
        assert_eq!(table.cost(1, 0), 0.5);
        assert_eq!(table.min_out(0), 2.0);
        assert_eq!(table.min_in(0), 0.5);
        assert_eq!(table.path_loss(&[1, 0]), 0.5);
    }

    #[test]
    fn test_table_rejects_invalid_distance() {
        let items = [(0.0, 1.0), (1.0, 2.0)];
        let err = DistanceTable::build(&items, &Negative).unwrap_err();
        assert!(matches!(
            err,
            SequencingError::InvalidDistance { from: 0, to: 1, .. }
        ));
    }

    #[test]
    fn test_table_propagates_failure() {
        let items = [(0.0, 1.0), (1.0, 2.0)];
        assert!(matches!(
            DistanceTable::build(&items, &Failing),
            Err(SequencingError::Metric(_))
        ));
    }

    #[test]
    fn test_duplicate_classes_and_canonical_order() {
        let items = [(0.0, 0.0), (1.0, 2.0), (0.0, 0.0), (0.0, 0.0)];
        let table = DistanceTable::build(&items, &Manhattan).unwrap();
        assert!(table.has_duplicates());
        assert_eq!(table.class_of(2), 0);
        assert_eq!(table.class_of(3), 0);
        assert_eq!(table.class_of(1), 1);

        let mut order = vec![3, 1, 0, 2];
        let before = table.path_loss(&order);
        table.canonicalize(&mut order);
        assert_eq!(order, vec![0, 1, 2, 3]);
        assert_eq!(table.path_loss(&order), before);
    }

    fn item_strategy() -> impl Strategy<Value = (f64, f64)> {
        (-10.0f64..10.0, -10.0f64..10.0)
    }

    proptest! {
        #[test]
        fn prop_loss_non_negative(seq in prop::collection::vec(item_strategy(), 0..12)) {
            prop_assert!(loss(&seq, &Manhattan).unwrap() >= 0.0);
            prop_assert!(loss(&seq, &Euclidean).unwrap() >= 0.0);
        }

        #[test]
        fn prop_loss_zero_iff_ends_match(seq in prop::collection::vec(item_strategy(), 0..12)) {
            let matched = seq.windows(2).all(|w| w[0].1 == w[1].0);
            prop_assert_eq!(loss(&seq, &Manhattan).unwrap() == 0.0, matched);
        }

        #[test]
        fn prop_chained_sequence_has_zero_loss(
            values in prop::collection::vec(-10.0f64..10.0, 1..12)
        ) {
            let seq: Vec<(f64, f64)> = values.windows(2).map(|w| (w[0], w[1])).collect();
            prop_assert_eq!(loss(&seq, &Euclidean).unwrap(), 0.0);
        }

        #[test]
        fn prop_table_matches_direct_loss(seq in prop::collection::vec(item_strategy(), 0..10)) {
            let table = DistanceTable::build(&seq, &Manhattan).unwrap();
            let order: Vec<usize> = (0..seq.len()).collect();
            let direct = loss(&seq, &Manhattan).unwrap();
            prop_assert!((table.path_loss(&order) - direct).abs() < 1e-9);
        }
    }
}
