//! Exhaustive solver configuration.

/// Configuration for the exhaustive solver.
///
/// Without a budget every permutation is scored, which is only practical
/// for about ten items.
///
/// # Examples
///
/// ```
/// use u_chainsort::exhaustive::ExhaustiveConfig;
///
/// let config = ExhaustiveConfig::default().with_max_iterations(5_000);
/// assert_eq!(config.max_iterations, Some(5_000));
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExhaustiveConfig {
    /// Maximum number of complete orderings to evaluate.
    ///
    /// `None` enumerates every permutation.
    pub max_iterations: Option<u64>,
}

impl ExhaustiveConfig {
    /// Sets the maximum number of orderings to evaluate.
    pub fn with_max_iterations(mut self, n: u64) -> Self {
        self.max_iterations = Some(n);
        self
    }
}
