//! Markdown rendering of plans and session state.
//!
//! Domain parts implement [`std::fmt::Display`] directly (see [`models`]);
//! segments and composites are newtype wrappers that borrow the plan
//! read-only:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    LifePlan     │    │ Segment views   │    │    Markdown     │
//! │ + GoalChecklist │───▶│ & PlanReport    │───▶│ (Terminal/MCP)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`segments`]: routine, habit, tip, goal and schedule sections plus the
//!   composite [`PlanReport`]
//! - [`status`]: [`OperationStatus`] and the [`SessionPanel`]
//! - [`datetime`]: local timestamp formatting
//! - [`models`]: cards for the individual plan parts
//!
//! ## Usage
//!
//! ```rust
//! use compass_core::display::{OperationStatus, WeeklySchedule};
//! use compass_core::models::DaySchedule;
//!
//! let days = vec![DaySchedule {
//!     day: "Monday".to_string(),
//!     focus: "Foundations".to_string(),
//!     key_task: "Block two deep-work hours".to_string(),
//! }];
//! let output = WeeklySchedule(&days).to_string();
//! assert!(output.contains("### Monday: Foundations"));
//!
//! println!("{}", OperationStatus::success("Plan exported"));
//! ```

pub mod datetime;
pub mod models;
pub mod segments;
pub mod status;

pub use datetime::LocalDateTime;
pub use segments::{Habits, MindsetTip, PlanReport, RoutineSegment, WeeklyGoals, WeeklySchedule};
pub use status::{OperationStatus, SessionPanel};
