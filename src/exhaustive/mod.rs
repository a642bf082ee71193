//! Exhaustive ordering search.
//!
//! Enumerates every permutation of the input and keeps the cheapest one.
//! This is the reference against which [`crate::bnb::BranchAndBound`] is
//! validated; its running time grows factorially, so it is only meant for
//! small inputs or for runs capped by an iteration budget.

mod config;
mod runner;

pub use config::ExhaustiveConfig;
pub use runner::ExhaustiveSolver;
