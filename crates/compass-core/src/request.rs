//! Building the outbound generation request.
//!
//! A request is fully determined by the user's preferences plus a handful of
//! fixed pieces: the prompt template, the coach persona in the system
//! instruction, and the response schema. Nothing here touches the network.

use serde_json::{json, Value};

use crate::{
    error::{CompassError, Result},
    models::UserPreferences,
};

/// MIME type the service is asked to answer with.
pub const RESPONSE_MIME_TYPE: &str = "application/json";

/// Persona and output rules sent alongside every prompt.
pub const SYSTEM_INSTRUCTION: &str = "You are a world-class performance coach. \
Your plans are visually rich, actionable, and logically structured. \
Output ONLY valid JSON according to the schema. \
Ensure the weeklySchedule has exactly 7 days.";

/// Default reasoning budget, in tokens.
pub const DEFAULT_THINKING_BUDGET: u32 = 4000;

/// Default output budget, in tokens. Must leave room after reasoning for the
/// whole JSON document.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 16384;

/// Output and reasoning token budgets.
///
/// Providers count reasoning against the output budget, so a reasoning budget
/// without an output budget (or the reverse) can truncate the plan before the
/// JSON is written. The two are therefore only constructed together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenBudget {
    max_output_tokens: u32,
    thinking_budget: u32,
}

impl TokenBudget {
    /// Pair an output budget with a reasoning budget.
    ///
    /// # Errors
    ///
    /// Returns `CompassError::Configuration` if the reasoning budget does not
    /// fit inside the output budget.
    pub fn new(max_output_tokens: u32, thinking_budget: u32) -> Result<Self> {
        if thinking_budget >= max_output_tokens {
            return Err(CompassError::Configuration {
                message: format!(
                    "thinking budget ({thinking_budget}) must be smaller than max output tokens ({max_output_tokens})"
                ),
            });
        }
        Ok(Self {
            max_output_tokens,
            thinking_budget,
        })
    }

    /// Build from two optional settings, failing if exactly one is set.
    ///
    /// # Errors
    ///
    /// Returns `CompassError::Configuration` if only one budget is given or
    /// the pair is inconsistent.
    pub fn from_parts(max_output_tokens: Option<u32>, thinking_budget: Option<u32>) -> Result<Self> {
        match (max_output_tokens, thinking_budget) {
            (Some(output), Some(thinking)) => Self::new(output, thinking),
            (None, None) => Ok(Self::default()),
            (Some(_), None) | (None, Some(_)) => Err(CompassError::Configuration {
                message: "max_output_tokens and thinking_budget must be set together".to_string(),
            }),
        }
    }

    pub fn max_output_tokens(&self) -> u32 {
        self.max_output_tokens
    }

    pub fn thinking_budget(&self) -> u32 {
        self.thinking_budget
    }
}

impl Default for TokenBudget {
    fn default() -> Self {
        Self {
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            thinking_budget: DEFAULT_THINKING_BUDGET,
        }
    }
}

/// Everything a generation service needs for one call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: String,
    pub prompt: String,
    pub system_instruction: String,
    pub response_mime_type: String,
    pub response_schema: Value,
    pub budget: TokenBudget,
}

impl GenerationRequest {
    /// Assemble the request for the given preferences.
    ///
    /// Preferences are not validated here; callers check them first so an
    /// invalid form never reaches this point.
    pub fn for_preferences(
        prefs: &UserPreferences,
        model: impl Into<String>,
        budget: TokenBudget,
    ) -> Self {
        Self {
            model: model.into(),
            prompt: build_prompt(prefs),
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            response_mime_type: RESPONSE_MIME_TYPE.to_string(),
            response_schema: life_plan_schema(),
            budget,
        }
    }
}

/// Interpolate the preferences into the fixed prompt template.
///
/// Values are embedded verbatim, without trimming or escaping.
pub fn build_prompt(prefs: &UserPreferences) -> String {
    format!(
        "Create a detailed, hyper-personalized premium life plan for {name}.\n\
         Main Goal: {goal}.\n\
         Current roadblock: {struggle}.\n\
         Daily energy levels: {energy}.\n\
         Plan tone: {tone}.\n\
         Include a structured routine, habits, weekly milestones, and a specific \
         7-day schedule (Monday to Sunday) that progressively builds toward the main goal.",
        name = prefs.name,
        goal = prefs.main_goal,
        struggle = prefs.current_struggle,
        energy = prefs.energy_level,
        tone = prefs.tone,
    )
}

fn object_schema(fields: &[&str]) -> Value {
    let properties: serde_json::Map<String, Value> = fields
        .iter()
        .map(|field| ((*field).to_string(), json!({ "type": "STRING" })))
        .collect();
    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": fields,
        "propertyOrdering": fields,
    })
}

fn array_of(items: Value) -> Value {
    json!({ "type": "ARRAY", "items": items })
}

/// Fields of a routine task, in the order the service should emit them.
pub const ROUTINE_TASK_FIELDS: [&str; 4] = ["time", "activity", "description", "focus"];
/// Fields of a habit.
pub const HABIT_FIELDS: [&str; 3] = ["habit", "frequency", "benefit"];
/// Fields of a schedule day.
pub const DAY_SCHEDULE_FIELDS: [&str; 3] = ["day", "focus", "keyTask"];
/// Top-level plan fields.
pub const LIFE_PLAN_FIELDS: [&str; 7] = [
    "morningRoutine",
    "afternoonRoutine",
    "eveningRoutine",
    "habits",
    "weeklyGoals",
    "growthMindsetTip",
    "weeklySchedule",
];

/// The response schema in the service's schema dialect.
///
/// Every field at every level is required.
pub fn life_plan_schema() -> Value {
    let routine = array_of(object_schema(&ROUTINE_TASK_FIELDS));
    json!({
        "type": "OBJECT",
        "properties": {
            "morningRoutine": routine.clone(),
            "afternoonRoutine": routine.clone(),
            "eveningRoutine": routine,
            "habits": array_of(object_schema(&HABIT_FIELDS)),
            "weeklyGoals": array_of(json!({ "type": "STRING" })),
            "growthMindsetTip": { "type": "STRING" },
            "weeklySchedule": array_of(object_schema(&DAY_SCHEDULE_FIELDS)),
        },
        "required": LIFE_PLAN_FIELDS,
        "propertyOrdering": LIFE_PLAN_FIELDS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EnergyLevel, Tone};

    fn sample_preferences() -> UserPreferences {
        UserPreferences::new("Ada", "Ship the compiler")
            .with_struggle("Too many meetings")
            .with_energy(EnergyLevel::Low)
            .with_tone(Tone::Disciplined)
    }

    #[test]
    fn test_prompt_embeds_every_preference_verbatim() {
        let prompt = build_prompt(&sample_preferences());

        assert!(prompt.contains("premium life plan for Ada."));
        assert!(prompt.contains("Main Goal: Ship the compiler."));
        assert!(prompt.contains("Current roadblock: Too many meetings."));
        assert!(prompt.contains("Daily energy levels: low."));
        assert!(prompt.contains("Plan tone: disciplined."));
        assert!(prompt.contains("7-day schedule (Monday to Sunday)"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let prefs = sample_preferences();
        assert_eq!(build_prompt(&prefs), build_prompt(&prefs));
    }

    #[test]
    fn test_prompt_does_not_trim_values() {
        let prefs = UserPreferences::new("  Ada  ", "Goal");
        assert!(build_prompt(&prefs).contains("for   Ada  ."));
    }

    #[test]
    fn test_schema_requires_all_top_level_fields() {
        let schema = life_plan_schema();

        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(required, LIFE_PLAN_FIELDS);
        assert_eq!(schema["propertyOrdering"], schema["required"]);
    }

    #[test]
    fn test_schema_nested_shapes() {
        let schema = life_plan_schema();
        let props = &schema["properties"];

        assert_eq!(props["morningRoutine"]["type"], "ARRAY");
        assert_eq!(
            props["eveningRoutine"]["items"]["required"],
            json!(["time", "activity", "description", "focus"])
        );
        assert_eq!(props["weeklyGoals"]["items"]["type"], "STRING");
        assert_eq!(props["growthMindsetTip"]["type"], "STRING");
        assert_eq!(
            props["weeklySchedule"]["items"]["propertyOrdering"],
            json!(["day", "focus", "keyTask"])
        );
    }

    #[test]
    fn test_request_for_preferences() {
        let request =
            GenerationRequest::for_preferences(&sample_preferences(), "gemini-test", TokenBudget::default());

        assert_eq!(request.model, "gemini-test");
        assert_eq!(request.response_mime_type, "application/json");
        assert!(request.system_instruction.contains("exactly 7 days"));
        assert_eq!(request.response_schema, life_plan_schema());
        assert_eq!(request.budget.thinking_budget(), DEFAULT_THINKING_BUDGET);
    }

    #[test]
    fn test_budget_parts_must_be_paired() {
        assert!(TokenBudget::from_parts(Some(8000), None).is_err());
        assert!(TokenBudget::from_parts(None, Some(2000)).is_err());
        assert_eq!(TokenBudget::from_parts(None, None).unwrap(), TokenBudget::default());

        let budget = TokenBudget::from_parts(Some(8000), Some(2000)).unwrap();
        assert_eq!(budget.max_output_tokens(), 8000);
        assert_eq!(budget.thinking_budget(), 2000);
    }

    #[test]
    fn test_budget_reasoning_must_fit_output() {
        match TokenBudget::new(4000, 4000).unwrap_err() {
            CompassError::Configuration { message } => {
                assert!(message.contains("must be smaller"));
            }
            other => panic!("Expected Configuration error, got {other:?}"),
        }
    }
}
