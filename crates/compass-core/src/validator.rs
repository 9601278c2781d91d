//! Turning a raw service payload into a [`LifePlan`].
//!
//! A `null` member counts as absent in both modes: lenient parsing gives it
//! the empty default, strict parsing reports it as missing. A `null` array
//! element is still a shape error.

use std::{fmt, str::FromStr};

use log::{error, warn};
use serde_json::Value;

use crate::{
    error::{CompassError, Result},
    models::{LifePlan, DAYS_PER_WEEK},
    request::{DAY_SCHEDULE_FIELDS, HABIT_FIELDS, LIFE_PLAN_FIELDS, ROUTINE_TASK_FIELDS},
};

/// How much of the response contract is checked beyond JSON syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Accept any JSON object; missing members become empty sections.
    #[default]
    Lenient,
    /// Every required field at every level must be present.
    Strict,
}

impl ValidationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationMode::Lenient => "lenient",
            ValidationMode::Strict => "strict",
        }
    }
}

impl FromStr for ValidationMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lenient" => Ok(ValidationMode::Lenient),
            "strict" => Ok(ValidationMode::Strict),
            _ => Err(format!(
                "Invalid validation mode: {s}. Must be 'lenient' or 'strict'"
            )),
        }
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a raw payload into a plan.
///
/// An empty or whitespace-only payload is treated as `{}`, which in lenient
/// mode yields an empty plan rather than a failure.
///
/// # Errors
///
/// Returns `CompassError::Generation` when the payload is not valid JSON for
/// the plan shape, or in strict mode when a required field is missing. The
/// underlying diagnostic is logged and carried as the error's detail.
pub fn parse_plan(raw: &str, mode: ValidationMode) -> Result<LifePlan> {
    let text = if raw.trim().is_empty() { "{}" } else { raw };

    let mut value: Value = serde_json::from_str(text).map_err(|e| {
        error!("Failed to parse generation response: {e}");
        CompassError::generation(format!("invalid JSON: {e}"))
    })?;

    if mode == ValidationMode::Strict {
        let missing = missing_fields(&value);
        if !missing.is_empty() {
            error!(
                "Generation response is missing required fields: {}",
                missing.join(", ")
            );
            return Err(CompassError::generation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }
    }

    drop_null_members(&mut value);
    let plan: LifePlan = serde_json::from_value(value).map_err(|e| {
        error!("Generation response does not match the plan shape: {e}");
        CompassError::generation(format!("unexpected shape: {e}"))
    })?;

    if !plan.has_full_week() {
        warn!(
            "Weekly schedule has {} entries, expected {DAYS_PER_WEEK}",
            plan.weekly_schedule.len()
        );
    }

    Ok(plan)
}

/// JSON paths of every required field absent or `null` in `value`.
///
/// Only presence is checked; type mismatches are left to deserialization.
pub fn missing_fields(value: &Value) -> Vec<String> {
    let mut missing = Vec::new();
    let Some(object) = value.as_object() else {
        missing.push("$".to_string());
        return missing;
    };

    for field in LIFE_PLAN_FIELDS {
        if object.get(field).is_none_or(Value::is_null) {
            missing.push(field.to_string());
        }
    }

    let nested: [(&str, &[&str]); 5] = [
        ("morningRoutine", &ROUTINE_TASK_FIELDS),
        ("afternoonRoutine", &ROUTINE_TASK_FIELDS),
        ("eveningRoutine", &ROUTINE_TASK_FIELDS),
        ("habits", &HABIT_FIELDS),
        ("weeklySchedule", &DAY_SCHEDULE_FIELDS),
    ];
    for (list, fields) in nested {
        let Some(items) = object.get(list).and_then(Value::as_array) else {
            continue;
        };
        for (index, item) in items.iter().enumerate() {
            for field in fields {
                if item.get(*field).is_none_or(Value::is_null) {
                    missing.push(format!("{list}[{index}].{field}"));
                }
            }
        }
    }

    missing
}

/// Remove every `null` object member, at any depth.
fn drop_null_members(value: &mut Value) {
    match value {
        Value::Object(object) => {
            object.retain(|_, member| !member.is_null());
            object.values_mut().for_each(drop_null_members);
        }
        Value::Array(items) => items.iter_mut().for_each(drop_null_members),
        _ => {}
    }
}
