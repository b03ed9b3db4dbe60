//! LNS configuration.

/// Configuration for [`LnsRunner`](super::LnsRunner).
///
/// # Examples
///
/// ```
/// use u_roster::lns::LnsConfig;
///
/// let config = LnsConfig::default()
///     .with_max_iterations(250)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct LnsConfig {
    /// Number of destroy/repair iterations.
    pub max_iterations: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,

    /// Whether [`LnsRunner::run_trials`](super::LnsRunner::run_trials)
    /// runs its trials in parallel using rayon.
    ///
    /// Has no effect unless the `parallel` feature is enabled.
    pub parallel: bool,
}

impl Default for LnsConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            seed: None,
            parallel: true,
        }
    }
}

impl LnsConfig {
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel trials.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_iterations == 0 {
            return Err("max_iterations must be at least 1".into());
        }
        Ok(())
    }
}
