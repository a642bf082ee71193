//! Incumbent management.
//!
//! The incumbent is the best complete ordering found so far in one solver
//! call. Orderings compare by loss first and then lexicographically by their
//! input indices, which makes the result reproducible when several orderings
//! share the minimal loss.
//!
//! [`IncumbentStore`] abstracts over the single-threaded case, where the
//! search owns an [`Incumbent`] directly, and the parallel case, where
//! workers share one `SharedIncumbent`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

/// A complete ordering and its loss.
#[derive(Debug, Clone, PartialEq)]
pub struct Incumbent {
    /// Input indices in sequence order.
    pub order: Vec<usize>,
    /// Loss of `order`, summed left to right.
    pub loss: f64,
}

impl Incumbent {
    /// Creates an incumbent.
    pub fn new(order: Vec<usize>, loss: f64) -> Self {
        Self { order, loss }
    }

    /// Whether the candidate should replace this incumbent: strictly lower
    /// loss, or equal loss and a lexicographically smaller index sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_chainsort::bnb::Incumbent;
    ///
    /// let current = Incumbent::new(vec![1, 0, 2], 0.5);
    /// assert!(current.is_improved_by(&[2, 1, 0], 0.25));
    /// assert!(current.is_improved_by(&[0, 2, 1], 0.5));
    /// assert!(!current.is_improved_by(&[2, 0, 1], 0.5));
    /// ```
    #[inline]
    pub fn is_improved_by(&self, order: &[usize], loss: f64) -> bool {
        loss < self.loss || (loss == self.loss && order < self.order.as_slice())
    }
}

/// Read/update access to the incumbent during search.
pub(crate) trait IncumbentStore {
    /// Loss of the current incumbent; the pruning reference.
    fn bound(&self) -> f64;

    /// Offers a complete ordering. Returns `true` if it was installed.
    fn offer(&mut self, order: &[usize], loss: f64) -> bool;
}

impl IncumbentStore for Incumbent {
    #[inline]
    fn bound(&self) -> f64 {
        self.loss
    }

    fn offer(&mut self, order: &[usize], loss: f64) -> bool {
        if !self.is_improved_by(order, loss) {
            return false;
        }
        self.order.clear();
        self.order.extend_from_slice(order);
        self.loss = loss;
        true
    }
}

/// An incumbent shared by concurrent searches.
///
/// The loss bound is an `AtomicU64` holding the bits of a non-negative
/// `f64`; for such values the integer order matches the float order, so the
/// bound can be read lock-free on every node and lowered with a
/// compare-and-exchange loop. It never increases. The ordering itself sits
/// behind a `Mutex` that is only taken when a candidate is offered that is
/// not worse than the bound.
#[derive(Debug)]
#[cfg_attr(not(feature = "parallel"), allow(dead_code))]
pub(crate) struct SharedIncumbent {
    bound: AtomicU64,
    best: Mutex<Incumbent>,
}

#[cfg_attr(not(feature = "parallel"), allow(dead_code))]
impl SharedIncumbent {
    /// Creates a shared incumbent seeded with `initial`.
    pub fn new(initial: Incumbent) -> Self {
        Self {
            bound: AtomicU64::new(initial.loss.to_bits()),
            best: Mutex::new(initial),
        }
    }

    /// Current loss bound.
    #[inline]
    pub fn bound(&self) -> f64 {
        f64::from_bits(self.bound.load(Ordering::Relaxed))
    }

    /// Installs the candidate if it improves on the incumbent.
    ///
    /// Returns `true` if it was installed.
    pub fn try_install(&self, order: &[usize], loss: f64) -> bool {
        // ties still need the lock for the index comparison
        if loss > self.bound() {
            return false;
        }
        let mut guard = self.best.lock().unwrap_or_else(PoisonError::into_inner);
        // re-check against the authoritative value under the lock
        if !guard.is_improved_by(order, loss) {
            return false;
        }
        guard.order.clear();
        guard.order.extend_from_slice(order);
        guard.loss = loss;
        self.lower_bound(loss);
        true
    }

    fn lower_bound(&self, loss: f64) {
        let new = loss.to_bits();
        let mut current = self.bound.load(Ordering::Relaxed);
        while new < current {
            match self
                .bound
                .compare_exchange_weak(current, new, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => break,
                Err(actual) => current = actual,
            }
        }
    }

    /// Clone of the current incumbent.
    pub fn snapshot(&self) -> Incumbent {
        self.best
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Consumes the shared holder and returns the incumbent.
    pub fn into_inner(self) -> Incumbent {
        self.best.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl IncumbentStore for &SharedIncumbent {
    #[inline]
    fn bound(&self) -> f64 {
        SharedIncumbent::bound(self)
    }

    #[inline]
    fn offer(&mut self, order: &[usize], loss: f64) -> bool {
        self.try_install(order, loss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_local_offer_prefers_lower_loss_then_smaller_order() {
        let mut inc = Incumbent::new(vec![2, 1, 0], 3.0);
        assert!(!inc.offer(&[0, 1, 2], 3.5));
        assert!(inc.offer(&[1, 2, 0], 3.0));
        assert_eq!(inc.order, vec![1, 2, 0]);
        assert!(!inc.offer(&[2, 0, 1], 3.0));
        assert!(inc.offer(&[2, 0, 1], 1.0));
        assert_eq!(IncumbentStore::bound(&inc), 1.0);
    }

    #[test]
    fn test_shared_install_and_snapshot() {
        let shared = SharedIncumbent::new(Incumbent::new(vec![0, 1, 2], 2.0));
        assert_eq!(shared.bound(), 2.0);
        assert!(!shared.try_install(&[1, 0, 2], 2.5));
        assert!(shared.try_install(&[1, 0, 2], 1.25));
        assert_eq!(shared.bound(), 1.25);
        // equal loss with a smaller order wins the tie
        assert!(shared.try_install(&[0, 2, 1], 1.25));
        assert_eq!(shared.snapshot(), Incumbent::new(vec![0, 2, 1], 1.25));
        assert_eq!(shared.into_inner().order, vec![0, 2, 1]);
    }

    #[test]
    fn test_bound_bits_preserve_order() {
        let values = [0.0, 1e-300, 0.1, 0.5, 1.0, 7.25, 1e300, f64::INFINITY];
        for pair in values.windows(2) {
            assert!(pair[0].to_bits() < pair[1].to_bits());
        }
    }

    #[test]
    fn test_concurrent_installs_keep_minimum() {
        let shared = Arc::new(SharedIncumbent::new(Incumbent::new(vec![0], f64::INFINITY)));
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || {
                    for k in 0..200 {
                        let loss = ((t * 200 + k) % 97) as f64 + 1.0;
                        shared.try_install(&[t, k], loss);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(shared.bound(), 1.0);
        let best = shared.snapshot();
        assert_eq!(best.loss, 1.0);
        // smallest [t, k] with (t * 200 + k) % 97 == 0
        assert_eq!(best.order, vec![0, 0]);
    }
}
