//! Core library for the Compass life-plan generator.
//!
//! Compass turns a short questionnaire ([`UserPreferences`]) into a
//! structured weekly plan ([`LifePlan`]) with a single call to a generative
//! model, then renders that plan as markdown.
//!
//! - [`request`] builds the prompt, system instruction and response schema
//! - [`service`] is the seam to the model ([`PlanService`]) and its Gemini
//!   implementation
//! - [`validator`] turns the raw payload into a plan, leniently or strictly
//! - [`generator`] ties the three together with a single-flight guard
//! - [`session`] holds per-user view state: loading, error, plan, checklist
//! - [`display`] renders plans and session state
//! - [`config`] loads settings from a JSON file and the environment
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use compass_core::{Config, PlanReport, PlanSession, UserPreferences};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let generator = Config::load(None)?
//!     .with_process_env()
//!     .into_builder()?
//!     .build()?;
//!
//! let mut session = PlanSession::new(Arc::new(generator));
//! session
//!     .submit(&UserPreferences::new("Ada", "Run a half marathon"))
//!     .await?;
//!
//! match session.view() {
//!     Some(view) => println!("{}", PlanReport::from_view(view)),
//!     None => eprintln!("{}", session.error().unwrap_or_default()),
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod display;
pub mod error;
pub mod generator;
pub mod models;
pub mod request;
pub mod service;
pub mod session;
pub mod validator;

// Re-export commonly used types
pub use config::Config;
pub use display::{OperationStatus, PlanReport, SessionPanel};
pub use error::{CompassError, Result, GENERATION_FAILED_MESSAGE};
pub use generator::{PlanGenerator, PlanGeneratorBuilder};
pub use models::{
    DaySchedule, EnergyLevel, Focus, HabitGoal, LifePlan, RoutineTask, Tone, UserPreferences,
};
pub use request::{GenerationRequest, TokenBudget};
pub use service::{GeminiClient, PlanService};
pub use session::{GoalChecklist, PlanSession, PlanView, SessionState};
pub use validator::{parse_plan, ValidationMode};
