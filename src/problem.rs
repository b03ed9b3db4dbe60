//! A rostering instance: labor rules plus costs.

use crate::config::ConstraintConfig;
use crate::cost::{CostModel, CostTable};
use crate::error::Result;
use crate::neighborhood::Feasibility;
use crate::schedule::ScheduleModel;
use crate::validation::{ConstraintValidator, Violation};

/// The validator and cost model of one instance, shared by every search.
///
/// # Examples
///
/// ```
/// use u_roster::config::ConstraintConfig;
/// use u_roster::cost::CostTable;
/// use u_roster::problem::RosterProblem;
///
/// let config = ConstraintConfig::default();
/// let problem = RosterProblem::new(config, CostTable::new(20)).unwrap();
/// assert_eq!(problem.horizon(), 21);
/// ```
#[derive(Debug, Clone)]
pub struct RosterProblem {
    validator: ConstraintValidator,
    costs: CostModel,
}

impl RosterProblem {
    /// # Errors
    ///
    /// Fails if the configuration is inconsistent or the cost table is too
    /// small for it.
    pub fn new(config: ConstraintConfig, table: CostTable) -> Result<Self> {
        config.validate()?;
        let costs = CostModel::new(&config, table)?;
        Ok(Self {
            validator: ConstraintValidator::new(config),
            costs,
        })
    }

    pub fn config(&self) -> &ConstraintConfig {
        self.validator.config()
    }

    pub fn validator(&self) -> &ConstraintValidator {
        &self.validator
    }

    pub fn cost_model(&self) -> &CostModel {
        &self.costs
    }

    pub fn horizon(&self) -> usize {
        self.validator.horizon()
    }

    pub fn validate(&self, schedule: &ScheduleModel) -> std::result::Result<(), Violation> {
        self.validator.validate(schedule)
    }

    pub fn is_feasible(&self, schedule: &ScheduleModel) -> bool {
        self.validator.is_feasible(schedule)
    }

    pub fn cost(&self, schedule: &ScheduleModel) -> f64 {
        self.costs.cost(schedule)
    }

    /// Cost of a candidate, or `None` if it has to be validated and fails.
    pub fn evaluate(&self, schedule: &ScheduleModel, feasibility: Feasibility) -> Option<f64> {
        match feasibility {
            Feasibility::Preserved => Some(self.cost(schedule)),
            Feasibility::Checked => self
                .is_feasible(schedule)
                .then(|| self.cost(schedule)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RosterError;
    use crate::shift::Slot;
    use crate::testing::{self, small_config, small_costs};

    #[test]
    fn test_new_rejects_bad_inputs() {
        let err = RosterProblem::new(small_config().with_weeks(0), small_costs()).unwrap_err();
        assert!(matches!(err, RosterError::Config(_)));

        let err = RosterProblem::new(ConstraintConfig::default(), small_costs()).unwrap_err();
        assert!(matches!(err, RosterError::Dimension(_)));
    }

    #[test]
    fn test_evaluate() {
        let problem = RosterProblem::new(small_config(), small_costs()).unwrap();
        let good = testing::small_schedule();
        let bad = good.with_slot(0, 0, Slot::Unassigned);

        assert!(problem.evaluate(&good, Feasibility::Checked).is_some());
        assert_eq!(problem.evaluate(&bad, Feasibility::Checked), None);
        // Preserved candidates are scored without validation.
        assert!(problem.evaluate(&bad, Feasibility::Preserved).is_some());
    }
}
