//! Instance generators.
//!
//! Used by the tests and benchmarks; every generator with randomness takes
//! the RNG from the caller so runs can be reproduced from a seed.
//!
//! # Examples
//!
//! ```
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use u_chainsort::generate::{random_chain, shuffled};
//! use u_chainsort::loss;
//! use u_chainsort::metric::Manhattan;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let chain = random_chain(10, &mut rng);
//! assert_eq!(loss(&chain, &Manhattan).unwrap(), 0.0);
//!
//! let input = shuffled(&chain, &mut rng);
//! assert_eq!(input.len(), 10);
//! ```

use rand::seq::SliceRandom;
use rand::Rng;

use crate::item::Item;

/// `n` items `(i/n, (i+1)/n)`: one zero-loss chain in input order.
pub fn perfect_chain(n: usize) -> Vec<(f64, f64)> {
    let len = n as f64;
    (0..n)
        .map(|i| (i as f64 / len, (i + 1) as f64 / len))
        .collect()
}

/// `n` items linking `n + 1` uniform random points in `[0, 1)` in input
/// order, so the input order has loss 0.
pub fn random_chain<R: Rng>(n: usize, rng: &mut R) -> Vec<(f64, f64)> {
    let points: Vec<f64> = (0..=n).map(|_| rng.random::<f64>()).collect();
    points.windows(2).map(|w| (w[0], w[1])).collect()
}

/// Like [`random_chain`] with `dim`-dimensional points.
pub fn random_vector_chain<R: Rng>(n: usize, dim: usize, rng: &mut R) -> Vec<Item<Vec<f64>>> {
    let points: Vec<Vec<f64>> = (0..=n)
        .map(|_| (0..dim).map(|_| rng.random::<f64>()).collect())
        .collect();
    points
        .windows(2)
        .map(|w| Item::new(w[0].clone(), w[1].clone()))
        .collect()
}

/// `n` items with independent uniform random endpoints; generally no
/// zero-loss ordering exists.
pub fn random_items<R: Rng>(n: usize, rng: &mut R) -> Vec<(f64, f64)> {
    (0..n)
        .map(|_| (rng.random::<f64>(), rng.random::<f64>()))
        .collect()
}

/// A shuffled copy of `items`.
pub fn shuffled<T, R>(items: &[T], rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    let mut out = items.to_vec();
    out.shuffle(rng);
    out
}
