//! Data models for the plan-generation contract.
//!
//! Two families live here:
//!
//! - [`UserPreferences`] and its enums: the questionnaire a plan is generated
//!   from. Validation of the required answers happens before any request is
//!   built.
//! - [`LifePlan`] and its parts: the single response contract returned by the
//!   generation service. JSON field names are camelCase, matching the schema
//!   the service is asked to honour.
//!
//! Display implementations for the plan parts live in
//! [`crate::display`] so the contract types stay free of presentation logic.
//!
//! # Examples
//!
//! ```rust
//! use compass_core::models::{EnergyLevel, LifePlan, Tone, UserPreferences};
//!
//! let prefs = UserPreferences::new("Ada", "Ship the compiler")
//!     .with_energy(EnergyLevel::High)
//!     .with_tone(Tone::Disciplined);
//! assert!(prefs.validate().is_ok());
//!
//! let plan: LifePlan = serde_json::from_str(r#"{"weeklyGoals": ["Draft the parser"]}"#)?;
//! assert_eq!(plan.weekly_goals, vec!["Draft the parser".to_string()]);
//! assert!(plan.habits.is_empty());
//! # Ok::<(), serde_json::Error>(())
//! ```

mod plan;
mod preferences;


pub use plan::{DaySchedule, Focus, HabitGoal, LifePlan, RoutineTask, DAYS_PER_WEEK};
pub use preferences::{EnergyLevel, Tone, UserPreferences};
