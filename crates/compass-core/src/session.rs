//! Transient view state around plan generation.
//!
//! A [`PlanSession`] is what a front end holds between submissions: whether a
//! generation is loading, the single error message to show, or the current
//! plan together with the checked state of its weekly goals. Nothing in a
//! session is persisted; dropping it discards the plan and every toggle.

use std::sync::Arc;

use jiff::Timestamp;
use log::{error, info, warn};

use crate::{
    error::{CompassError, Result},
    generator::PlanGenerator,
    models::{LifePlan, UserPreferences},
};

/// Checked flags for a plan's weekly goals.
///
/// Lives beside the plan, never inside it, so toggling cannot alter the
/// goals themselves.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GoalChecklist {
    checked: Vec<bool>,
}

impl GoalChecklist {
    /// An all-unchecked list for `len` goals.
    pub fn new(len: usize) -> Self {
        Self {
            checked: vec![false; len],
        }
    }

    /// A list for `len` goals with the given goals checked.
    ///
    /// `numbers` are 1-based, as goals are numbered for users; repeats are
    /// harmless.
    ///
    /// # Errors
    ///
    /// Returns `CompassError::InvalidInput` for 0 or a number past the last
    /// goal.
    pub fn from_numbers(len: usize, numbers: &[usize]) -> Result<Self> {
        let mut checklist = Self::new(len);
        for &number in numbers {
            let index = number.checked_sub(1).ok_or_else(|| {
                CompassError::invalid_input("goal").with_reason("Goal numbers start at 1")
            })?;
            if !checklist.is_checked(index) {
                checklist.toggle(index)?;
            }
        }
        Ok(checklist)
    }

    pub fn len(&self) -> usize {
        self.checked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checked.is_empty()
    }

    /// Whether goal `index` is checked; out-of-range goals read as unchecked.
    pub fn is_checked(&self, index: usize) -> bool {
        self.checked.get(index).copied().unwrap_or(false)
    }

    /// Number of checked goals.
    pub fn completed(&self) -> usize {
        self.checked.iter().filter(|checked| **checked).count()
    }

    /// Flip goal `index` and return its new state.
    ///
    /// # Errors
    ///
    /// Returns `CompassError::InvalidInput` if there is no such goal.
    pub fn toggle(&mut self, index: usize) -> Result<bool> {
        let len = self.checked.len();
        let slot = self.checked.get_mut(index).ok_or_else(|| {
            CompassError::invalid_input("goal")
                .with_reason(format!("No weekly goal at position {index} (plan has {len})"))
        })?;
        *slot = !*slot;
        Ok(*slot)
    }
}

/// A received plan plus its client-local view state.
#[derive(Debug, Clone)]
pub struct PlanView {
    plan: LifePlan,
    checklist: GoalChecklist,
    generated_at: Timestamp,
}

impl PlanView {
    /// Wrap a freshly received plan with an empty checklist.
    pub fn new(plan: LifePlan) -> Self {
        Self::received_at(plan, Timestamp::now())
    }

    pub fn received_at(plan: LifePlan, generated_at: Timestamp) -> Self {
        let checklist = GoalChecklist::new(plan.weekly_goals.len());
        Self {
            plan,
            checklist,
            generated_at,
        }
    }

    /// The plan, read-only.
    pub fn plan(&self) -> &LifePlan {
        &self.plan
    }

    pub fn checklist(&self) -> &GoalChecklist {
        &self.checklist
    }

    pub fn generated_at(&self) -> &Timestamp {
        &self.generated_at
    }

    /// Flip the checked state of one weekly goal.
    ///
    /// # Errors
    ///
    /// Returns `CompassError::InvalidInput` if there is no such goal.
    pub fn toggle_goal(&mut self, index: usize) -> Result<bool> {
        self.checklist.toggle(index)
    }
}

/// Where a session currently is.
#[derive(Debug, Clone, Default)]
pub enum SessionState {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// A generation is in flight
    Loading,
    /// The last generation succeeded
    Ready(PlanView),
    /// The last generation failed; carries the message to show
    Failed(String),
}

/// Submission handler and view state for one user.
pub struct PlanSession {
    generator: Arc<PlanGenerator>,
    state: SessionState,
}

impl PlanSession {
    pub fn new(generator: Arc<PlanGenerator>) -> Self {
        Self {
            generator,
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SessionState::Loading)
    }

    /// The current plan view, absent unless the last generation succeeded.
    pub fn view(&self) -> Option<&PlanView> {
        match &self.state {
            SessionState::Ready(view) => Some(view),
            _ => None,
        }
    }

    /// The error panel message, if the last generation failed.
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            SessionState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Submit preferences and wait for the outcome.
    ///
    /// Generation failures are caught here, logged, and turned into the
    /// session's error message; the previous plan is discarded either way.
    ///
    /// # Errors
    ///
    /// Returns `CompassError::InvalidInput` for preferences without a name or
    /// main goal, and `CompassError::Busy` if the generator is already
    /// working on a submission. Neither touches the state, so a plan on
    /// screen stays there. Generation failures are not returned; they are
    /// reflected in [`error`](Self::error).
    pub async fn submit(&mut self, prefs: &UserPreferences) -> Result<&SessionState> {
        if self.generator.is_generating() {
            warn!("Ignoring submission while a plan is being generated");
            return Err(CompassError::Busy);
        }
        prefs.validate()?;

        let previous = std::mem::replace(&mut self.state, SessionState::Loading);
        self.state = match self.generator.generate(prefs).await {
            Ok(plan) => {
                info!(
                    "Plan ready: {} goals, {} schedule days",
                    plan.weekly_goals.len(),
                    plan.weekly_schedule.len()
                );
                SessionState::Ready(PlanView::new(plan))
            }
            // Another holder of the generator got there first.
            Err(CompassError::Busy) => {
                warn!("Ignoring submission while a plan is being generated");
                self.state = previous;
                return Err(CompassError::Busy);
            }
            Err(e) => {
                error!("Plan generation failed: {e}");
                SessionState::Failed(e.user_message())
            }
        };

        Ok(&self.state)
    }

    /// Flip the checked state of one weekly goal of the current plan.
    ///
    /// # Errors
    ///
    /// Returns `CompassError::InvalidInput` if there is no current plan or no
    /// such goal.
    pub fn toggle_goal(&mut self, index: usize) -> Result<bool> {
        match &mut self.state {
            SessionState::Ready(view) => view.toggle_goal(index),
            _ => Err(CompassError::invalid_input("goal").with_reason("No plan has been generated")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan_with_goals(goals: &[&str]) -> LifePlan {
        LifePlan {
            weekly_goals: goals.iter().map(ToString::to_string).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_checklist_toggle_flips_only_one_goal() {
        let mut checklist = GoalChecklist::new(3);

        assert!(checklist.toggle(1).unwrap());
        assert!(!checklist.is_checked(0));
        assert!(checklist.is_checked(1));
        assert!(!checklist.is_checked(2));
        assert_eq!(checklist.completed(), 1);

        assert!(!checklist.toggle(1).unwrap());
        assert_eq!(checklist.completed(), 0);
    }

    #[test]
    fn test_checklist_toggle_out_of_range() {
        let mut checklist = GoalChecklist::new(2);

        match checklist.toggle(2).unwrap_err() {
            CompassError::InvalidInput { field, reason } => {
                assert_eq!(field, "goal");
                assert!(reason.contains("position 2"));
            }
            other => panic!("Expected InvalidInput error, got {other:?}"),
        }
        assert!(!checklist.is_checked(5));
    }

    #[test]
    fn test_checklist_from_numbers() {
        let checklist = GoalChecklist::from_numbers(3, &[3, 1, 3]).unwrap();
        assert!(checklist.is_checked(0));
        assert!(!checklist.is_checked(1));
        assert!(checklist.is_checked(2));

        assert!(GoalChecklist::from_numbers(3, &[0]).is_err());
        assert!(GoalChecklist::from_numbers(3, &[4]).is_err());
    }

    #[test]
    fn test_view_toggle_leaves_plan_untouched() {
        let plan = plan_with_goals(&["Outline", "Draft", "Edit"]);
        let mut view = PlanView::new(plan.clone());

        view.toggle_goal(0).unwrap();
        view.toggle_goal(2).unwrap();

        assert_eq!(view.plan(), &plan);
        assert_eq!(view.checklist().completed(), 2);
    }

    #[test]
    fn test_new_view_starts_unchecked() {
        let mut view = PlanView::new(plan_with_goals(&["Outline"]));
        view.toggle_goal(0).unwrap();

        let fresh = PlanView::new(view.plan().clone());
        assert!(!fresh.checklist().is_checked(0));
        assert_eq!(fresh.checklist().len(), 1);
    }
}
