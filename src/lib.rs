//! Minimum-mismatch sequencing of two-ended items.
//!
//! Every item has a `start` and an `end` endpoint (a number or a vector).
//! Placing item `b` directly after item `a` costs `distance(a.end, b.start)`
//! under a pluggable [`Metric`]; the loss of a sequence is the sum over all
//! adjacent pairs. This crate finds the ordering with the smallest loss:
//!
//! - **Exhaustive**: enumerates every permutation. The reference solver,
//!   only practical for a handful of items.
//! - **Branch-and-bound**: depth-first search over chains growing at both
//!   ends, with cost-ordered children, an admissible lower bound and an
//!   optional node-expansion budget (anytime: the best ordering so far is
//!   returned when the budget runs out).
//!
//! Both solvers implement [`OrderingStrategy`] and, given the same input and
//! enough budget, return the same ordering: among equal-loss orderings the
//! one whose sequence of input indices is lexicographically smallest.
//!
//! # Example
//!
//! ```
//! use u_chainsort::metric::Manhattan;
//! use u_chainsort::{loss, OrderingStrategy, Strategy};
//!
//! let items = [(0.5, 0.75), (0.0, 0.25), (0.75, 1.0), (0.25, 0.5)];
//! let sorted = Strategy::branch_and_bound()
//!     .sort(&items, &Manhattan, None)
//!     .unwrap();
//! assert_eq!(sorted[0], (0.0, 0.25));
//! assert_eq!(loss(&sorted, &Manhattan).unwrap(), 0.0);
//! ```
//!
//! Errors from the metric are reported before any search happens:
//!
//! ```
//! use u_chainsort::metric::Euclidean;
//! use u_chainsort::{Item, OrderingStrategy, SequencingError, Strategy};
//!
//! let items = [Item::new(vec![0.0], vec![1.0, 2.0]), Item::new(vec![2.0], vec![3.0])];
//! let err = Strategy::exhaustive().sort(&items, &Euclidean, None).unwrap_err();
//! assert!(matches!(err, SequencingError::DimensionMismatch { .. }));
//! ```
//!
//! # Features
//!
//! - `parallel`: searches the top-level branch-and-bound subtrees on the
//!   rayon pool when [`BnbConfig::parallel`] is set.
//! - `serde`: `Serialize`/`Deserialize` for items, configurations and
//!   search reports.
//!
//! # Logging
//!
//! Solvers emit `tracing` events (`search_start`, `search_end`,
//! `budget_exhausted` at debug; `incumbent_update` at trace). No subscriber
//! is installed by the library.

pub mod bnb;
pub mod error;
pub mod exhaustive;
pub mod generate;
pub mod item;
pub mod loss;
pub mod metric;
pub mod strategy;

pub use bnb::{BnbConfig, BranchAndBound};
pub use error::{Result, SequencingError};
pub use exhaustive::{ExhaustiveConfig, ExhaustiveSolver};
pub use item::{Domino, Item};
pub use loss::{loss, DistanceTable};
pub use metric::{Endpoint, Euclidean, Manhattan, Metric};
pub use strategy::{OrderingStrategy, SearchStats, SearchStatus, SortResult, Strategy};
