use std::{convert::Infallible, str::FromStr};

use serde::{Deserialize, Serialize};

/// Number of entries the weekly schedule is contracted to hold.
pub const DAYS_PER_WEEK: usize = 7;

/// Life area a routine task serves.
///
/// The model is asked for one of the four known areas but is not forced to
/// comply, so anything else is carried through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Focus {
    Mind,
    Body,
    Career,
    Spirit,
    Other(String),
}

impl Focus {
    pub fn as_str(&self) -> &str {
        match self {
            Focus::Mind => "mind",
            Focus::Body => "body",
            Focus::Career => "career",
            Focus::Spirit => "spirit",
            Focus::Other(other) => other,
        }
    }
}

impl Default for Focus {
    fn default() -> Self {
        Focus::Other(String::new())
    }
}

impl From<String> for Focus {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "mind" => Focus::Mind,
            "body" => Focus::Body,
            "career" => Focus::Career,
            "spirit" => Focus::Spirit,
            _ => Focus::Other(value),
        }
    }
}

impl From<Focus> for String {
    fn from(value: Focus) -> Self {
        match value {
            Focus::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for Focus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Focus::from(s.to_string()))
    }
}

/// One timed entry in a morning, afternoon or evening routine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoutineTask {
    /// Clock time as written by the model, e.g. "7:00 AM"
    pub time: String,
    pub activity: String,
    pub description: String,
    pub focus: Focus,
}

/// A recurring habit and why it matters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HabitGoal {
    pub habit: String,
    /// Free text such as "Daily" or "3x per week"
    pub frequency: String,
    pub benefit: String,
}

/// Focus and key task for one day of the week.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DaySchedule {
    pub day: String,
    pub focus: String,
    pub key_task: String,
}

/// The structured plan produced by one successful generation.
///
/// Missing members deserialize to empty values; whether that is acceptable
/// is decided by the validator, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LifePlan {
    pub morning_routine: Vec<RoutineTask>,
    pub afternoon_routine: Vec<RoutineTask>,
    pub evening_routine: Vec<RoutineTask>,
    pub habits: Vec<HabitGoal>,
    pub weekly_goals: Vec<String>,
    pub growth_mindset_tip: String,
    pub weekly_schedule: Vec<DaySchedule>,
}

impl LifePlan {
    /// Whether the schedule holds exactly one entry per weekday.
    pub fn has_full_week(&self) -> bool {
        self.weekly_schedule.len() == DAYS_PER_WEEK
    }
}
