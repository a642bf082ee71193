//! Branch-and-bound configuration.

/// Configuration for the branch-and-bound solver.
///
/// # Examples
///
/// ```
/// use u_chainsort::bnb::BnbConfig;
///
/// let config = BnbConfig::default()
///     .with_max_iterations(100_000)
///     .with_lower_bound(false);
/// assert_eq!(config.max_iterations, Some(100_000));
/// assert!(!config.lower_bound);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BnbConfig {
    /// Maximum number of node expansions.
    ///
    /// `None` explores until the search tree is exhausted. When the budget
    /// runs out the best ordering found so far is returned.
    pub max_iterations: Option<u64>,

    /// Whether to add an admissible estimate of the remaining cost to the
    /// partial loss before comparing against the incumbent.
    ///
    /// Without it only the partial loss itself is compared.
    pub lower_bound: bool,

    /// Relative slack allowed when comparing a bound against the incumbent.
    ///
    /// A branch is pruned only if its bound exceeds
    /// `incumbent * (1 + bound_tolerance)` (absolute for incumbents below 1),
    /// so that orderings whose loss equals the incumbent's up to summation
    /// rounding still reach the tie-break.
    pub bound_tolerance: f64,

    /// Whether to explore the top-level branches on rayon worker threads.
    ///
    /// Has no effect unless the crate is built with the `parallel` feature.
    pub parallel: bool,
}

impl Default for BnbConfig {
    fn default() -> Self {
        Self {
            max_iterations: None,
            lower_bound: true,
            bound_tolerance: 1e-9,
            parallel: false,
        }
    }
}

impl BnbConfig {
    /// Sets the node-expansion budget.
    pub fn with_max_iterations(mut self, n: u64) -> Self {
        self.max_iterations = Some(n);
        self
    }

    /// Enables or disables the remaining-cost lower bound.
    pub fn with_lower_bound(mut self, enabled: bool) -> Self {
        self.lower_bound = enabled;
        self
    }

    /// Sets the relative bound tolerance.
    pub fn with_bound_tolerance(mut self, tolerance: f64) -> Self {
        self.bound_tolerance = tolerance;
        self
    }

    /// Enables or disables parallel exploration.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if !self.bound_tolerance.is_finite() || self.bound_tolerance < 0.0 {
            return Err("bound_tolerance must be finite and non-negative".into());
        }
        Ok(())
    }

    /// Bound above which a branch is pruned, given the incumbent loss.
    #[inline]
    pub(crate) fn prune_threshold(&self, incumbent: f64) -> f64 {
        incumbent + self.bound_tolerance * incumbent.max(1.0)
    }
}
