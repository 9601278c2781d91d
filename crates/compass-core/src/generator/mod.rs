//! High-level API for generating life plans.
//!
//! [`PlanGenerator`] ties the pieces of one generation together:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │ UserPreferences │    │ GenerationReq.  │    │   PlanService   │
//! │   (validated)   │───▶│ (prompt+schema) │───▶│  (one call)     │
//! └─────────────────┘    └─────────────────┘    └────────┬────────┘
//!                                                        │ raw text
//!                                               ┌────────▼────────┐
//!                                               │    Validator    │
//!                                               │  → LifePlan     │
//!                                               └─────────────────┘
//! ```
//!
//! A generator never retries, caches or memoizes: two calls with identical
//! preferences issue two requests. At most one generation is in flight per
//! generator; a concurrent call fails fast with `CompassError::Busy`.
//!
//! # Usage
//!
//! ```rust,no_run
//! use compass_core::{PlanGeneratorBuilder, UserPreferences};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let generator = PlanGeneratorBuilder::new()
//!     .with_api_key("my-key")
//!     .build()?;
//!
//! let plan = generator
//!     .generate(&UserPreferences::new("Ada", "Ship the compiler"))
//!     .await?;
//! println!("{} goals this week", plan.weekly_goals.len());
//! # Ok(())
//! # }
//! ```

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use log::{debug, info};

pub mod builder;


pub use builder::PlanGeneratorBuilder;

use crate::{
    error::{CompassError, Result},
    models::{LifePlan, UserPreferences},
    request::{GenerationRequest, TokenBudget},
    service::PlanService,
    validator::{parse_plan, ValidationMode},
};

/// Main interface for turning preferences into a plan.
pub struct PlanGenerator {
    service: Arc<dyn PlanService>,
    model: String,
    budget: TokenBudget,
    validation: ValidationMode,
    in_flight: AtomicBool,
}

impl PlanGenerator {
    pub(crate) fn new(
        service: Arc<dyn PlanService>,
        model: String,
        budget: TokenBudget,
        validation: ValidationMode,
    ) -> Self {
        Self {
            service,
            model,
            budget,
            validation,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Model identifier sent with every request.
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn budget(&self) -> TokenBudget {
        self.budget
    }

    pub fn validation(&self) -> ValidationMode {
        self.validation
    }

    /// Whether a generation is currently running on this generator.
    pub fn is_generating(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Build the request that [`generate`](Self::generate) would send,
    /// without sending it.
    ///
    /// # Errors
    ///
    /// Returns `CompassError::InvalidInput` if `name` or `mainGoal` is empty.
    pub fn request_for(&self, prefs: &UserPreferences) -> Result<GenerationRequest> {
        prefs.validate()?;
        Ok(GenerationRequest::for_preferences(
            prefs,
            self.model.clone(),
            self.budget,
        ))
    }

    /// Generate a plan for the given preferences.
    ///
    /// Issues exactly one request to the service.
    ///
    /// # Errors
    ///
    /// - `CompassError::InvalidInput` if the preferences are incomplete; no
    ///   request is issued
    /// - `CompassError::Busy` if another generation is in flight
    /// - `CompassError::Transport` / `CompassError::Api` if the call fails
    /// - `CompassError::Generation` if the payload is not a usable plan
    pub async fn generate(&self, prefs: &UserPreferences) -> Result<LifePlan> {
        let request = self.request_for(prefs)?;
        let _guard = InFlightGuard::acquire(&self.in_flight)?;

        info!(
            "Generating plan for '{}' with model {} ({} validation)",
            prefs.name, self.model, self.validation
        );
        let raw = self.service.generate(&request).await?;
        debug!("Generation service returned {} bytes", raw.len());

        parse_plan(&raw, self.validation)
    }
}

/// Holds the in-flight flag for the duration of one generation.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| CompassError::Busy)?;
        Ok(Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
