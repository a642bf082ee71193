//! Branch-and-bound ordering search.
//!
//! A depth-first search over partial chains that grow at either end. Each
//! node places one unused item before the first or after the last placed
//! item; children are visited cheapest-first so a low-loss chain is found
//! early, and any branch whose partial loss plus an admissible estimate of
//! the remaining cost cannot beat the incumbent is pruned.
//!
//! The search is anytime: the incumbent is seeded before the first node is
//! expanded, and when the node-expansion budget runs out the best ordering
//! found so far is returned with [`SearchStatus::BudgetExhausted`].
//!
//! With the `parallel` feature and [`BnbConfig::parallel`] set, the subtrees
//! below the first placed item are searched on the rayon pool with a shared
//! incumbent and a shared budget.
//!
//! # References
//!
//! - Land & Doig (1960), "An Automatic Method of Solving Discrete
//!   Programming Problems"
//! - Little, Murty, Sweeney & Karel (1963), "An Algorithm for the Traveling
//!   Salesman Problem"
//!
//! [`SearchStatus::BudgetExhausted`]: crate::strategy::SearchStatus::BudgetExhausted

mod budget;
mod chain;
mod config;
mod incumbent;
#[cfg(feature = "parallel")]
mod parallel;
mod runner;
mod session;
mod stack;

pub use config::BnbConfig;
pub use incumbent::Incumbent;
pub use runner::BranchAndBound;
