//! Read-only segment views over a [`LifePlan`].
//!
//! Each wrapper borrows one part of the plan and renders it as a markdown
//! section in array order. No wrapper sorts, filters, deduplicates or
//! rewrites what the service returned, and an empty part renders a
//! placeholder line instead of failing.

use std::fmt;

use jiff::Timestamp;

use super::datetime::LocalDateTime;
use crate::{
    models::{DaySchedule, HabitGoal, LifePlan, RoutineTask},
    session::{GoalChecklist, PlanView},
};

pub const MORNING_TITLE: &str = "AM Foundations";
pub const AFTERNOON_TITLE: &str = "Peak Momentum";
pub const EVENING_TITLE: &str = "PM Restoration";
pub const HABITS_TITLE: &str = "Core Growth Habits";
pub const MINDSET_TITLE: &str = "Mindset Catalyst";
pub const GOALS_TITLE: &str = "Weekly Milestones";
pub const SCHEDULE_TITLE: &str = "7-Day Blueprint";

/// One of the three daily routines under its section title.
pub struct RoutineSegment<'a> {
    pub title: &'a str,
    pub tasks: &'a [RoutineTask],
}

impl<'a> RoutineSegment<'a> {
    pub fn morning(plan: &'a LifePlan) -> Self {
        Self {
            title: MORNING_TITLE,
            tasks: &plan.morning_routine,
        }
    }

    pub fn afternoon(plan: &'a LifePlan) -> Self {
        Self {
            title: AFTERNOON_TITLE,
            tasks: &plan.afternoon_routine,
        }
    }

    pub fn evening(plan: &'a LifePlan) -> Self {
        Self {
            title: EVENING_TITLE,
            tasks: &plan.evening_routine,
        }
    }
}

impl fmt::Display for RoutineSegment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {}", self.title)?;
        writeln!(f)?;
        if self.tasks.is_empty() {
            writeln!(f, "No tasks in this routine.")?;
            return writeln!(f);
        }
        for task in self.tasks {
            write!(f, "{task}")?;
        }
        Ok(())
    }
}

/// The suggested habits, one card each.
pub struct Habits<'a>(pub &'a [HabitGoal]);

impl fmt::Display for Habits<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {HABITS_TITLE}")?;
        writeln!(f)?;
        if self.0.is_empty() {
            writeln!(f, "No habits suggested.")?;
            return writeln!(f);
        }
        for habit in self.0 {
            write!(f, "{habit}")?;
        }
        Ok(())
    }
}

/// The growth-mindset tip as a quotation.
pub struct MindsetTip<'a>(pub &'a str);

impl fmt::Display for MindsetTip<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {MINDSET_TITLE}")?;
        writeln!(f)?;
        if self.0.trim().is_empty() {
            writeln!(f, "No mindset tip this week.")?;
        } else {
            writeln!(f, "> \"{}\"", self.0)?;
        }
        writeln!(f)
    }
}

/// The weekly goals as a checklist.
///
/// Without a checklist every goal renders unchecked.
pub struct WeeklyGoals<'a> {
    pub goals: &'a [String],
    pub checklist: Option<&'a GoalChecklist>,
}

impl<'a> WeeklyGoals<'a> {
    pub fn new(goals: &'a [String]) -> Self {
        Self {
            goals,
            checklist: None,
        }
    }

    pub fn with_checklist(mut self, checklist: &'a GoalChecklist) -> Self {
        self.checklist = Some(checklist);
        self
    }
}

impl fmt::Display for WeeklyGoals<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let completed = self.checklist.map_or(0, GoalChecklist::completed);
        if self.goals.is_empty() {
            writeln!(f, "## {GOALS_TITLE}")?;
            writeln!(f)?;
            writeln!(f, "No weekly goals set.")?;
            return writeln!(f);
        }

        writeln!(f, "## {GOALS_TITLE} ({completed}/{})", self.goals.len())?;
        writeln!(f)?;
        for (index, goal) in self.goals.iter().enumerate() {
            let checked = self.checklist.is_some_and(|c| c.is_checked(index));
            writeln!(f, "- [{}] {goal}", if checked { "x" } else { " " })?;
        }
        writeln!(f)
    }
}

/// One day card per schedule entry, whatever the number of entries.
pub struct WeeklySchedule<'a>(pub &'a [DaySchedule]);

impl fmt::Display for WeeklySchedule<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {SCHEDULE_TITLE}")?;
        writeln!(f)?;
        if self.0.is_empty() {
            writeln!(f, "No schedule for this week.")?;
            return writeln!(f);
        }
        for day in self.0 {
            write!(f, "{day}")?;
        }
        Ok(())
    }
}

/// The complete plan: every segment in display order.
///
/// # Examples
///
/// ```rust
/// use compass_core::{display::PlanReport, models::LifePlan};
///
/// let plan: LifePlan = serde_json::from_str(
///     r#"{"weeklyGoals": ["Finish chapter one"], "growthMindsetTip": "Done beats perfect."}"#,
/// )
/// .unwrap();
///
/// let report = PlanReport::new(&plan).to_string();
/// assert!(report.contains("- [ ] Finish chapter one"));
/// assert!(report.contains("No habits suggested."));
/// ```
pub struct PlanReport<'a> {
    plan: &'a LifePlan,
    checklist: Option<&'a GoalChecklist>,
    generated_at: Option<&'a Timestamp>,
}

impl<'a> PlanReport<'a> {
    pub fn new(plan: &'a LifePlan) -> Self {
        Self {
            plan,
            checklist: None,
            generated_at: None,
        }
    }

    /// Report for a session's current plan, including its checked goals.
    pub fn from_view(view: &'a PlanView) -> Self {
        Self {
            plan: view.plan(),
            checklist: Some(view.checklist()),
            generated_at: Some(view.generated_at()),
        }
    }

    pub fn with_checklist(mut self, checklist: &'a GoalChecklist) -> Self {
        self.checklist = Some(checklist);
        self
    }

    pub fn with_generated_at(mut self, generated_at: &'a Timestamp) -> Self {
        self.generated_at = Some(generated_at);
        self
    }
}

impl fmt::Display for PlanReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Your Life Plan")?;
        writeln!(f)?;
        if let Some(generated_at) = self.generated_at {
            writeln!(f, "- Generated: {}", LocalDateTime(generated_at))?;
            writeln!(f)?;
        }

        write!(f, "{}", RoutineSegment::morning(self.plan))?;
        write!(f, "{}", RoutineSegment::afternoon(self.plan))?;
        write!(f, "{}", RoutineSegment::evening(self.plan))?;
        write!(f, "{}", Habits(&self.plan.habits))?;
        write!(f, "{}", MindsetTip(&self.plan.growth_mindset_tip))?;

        let mut goals = WeeklyGoals::new(&self.plan.weekly_goals);
        if let Some(checklist) = self.checklist {
            goals = goals.with_checklist(checklist);
        }
        write!(f, "{goals}")?;
        write!(f, "{}", WeeklySchedule(&self.plan.weekly_schedule))
    }
}
