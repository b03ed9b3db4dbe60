//! Variable Neighborhood Descent configuration.

/// Configuration for [`VndRunner`](super::VndRunner).
///
/// # Examples
///
/// ```
/// use u_roster::vnd::VndConfig;
///
/// let config = VndConfig::default().with_max_steps(50).with_parallel(false);
/// assert_eq!(config.max_steps, Some(50));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct VndConfig {
    /// Maximum number of adopted improvements; `None` descends until a
    /// local optimum is reached.
    pub max_steps: Option<usize>,

    /// Whether to evaluate candidates in parallel using rayon.
    ///
    /// Has no effect unless the `parallel` feature is enabled. The adopted
    /// candidate does not depend on this setting.
    pub parallel: bool,
}

impl Default for VndConfig {
    fn default() -> Self {
        Self {
            max_steps: None,
            parallel: true,
        }
    }
}

impl VndConfig {
    pub fn with_max_steps(mut self, n: usize) -> Self {
        self.max_steps = Some(n);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_steps == Some(0) {
            return Err("max_steps must be at least 1".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = VndConfig::default();
        assert_eq!(config.max_steps, None);
        assert!(config.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_steps_rejected() {
        assert!(VndConfig::default().with_max_steps(0).validate().is_err());
    }
}
