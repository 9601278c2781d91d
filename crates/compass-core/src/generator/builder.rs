//! Builder for creating and configuring PlanGenerator instances.

use std::{sync::Arc, time::Duration};

use super::PlanGenerator;
use crate::{
    error::{CompassError, Result},
    request::TokenBudget,
    service::{GeminiClient, PlanService, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT},
    validator::ValidationMode,
};

/// Builder for creating and configuring PlanGenerator instances.
///
/// All configuration is explicit; nothing is read from the environment here.
#[derive(Clone)]
pub struct PlanGeneratorBuilder {
    api_key: Option<String>,
    model: String,
    base_url: String,
    timeout: Duration,
    budget: TokenBudget,
    validation: ValidationMode,
    service: Option<Arc<dyn PlanService>>,
}

impl PlanGeneratorBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            budget: TokenBudget::default(),
            validation: ValidationMode::default(),
            service: None,
        }
    }

    /// Sets the credential for the generation service.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the endpoint root, e.g. a local mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the client-level request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the paired output and reasoning budgets.
    pub fn with_budget(mut self, budget: TokenBudget) -> Self {
        self.budget = budget;
        self
    }

    /// Sets how strictly responses are checked.
    pub fn with_validation(mut self, validation: ValidationMode) -> Self {
        self.validation = validation;
        self
    }

    /// Uses the given service instead of the Gemini client.
    ///
    /// The credential, endpoint and timeout are ignored when a service is
    /// injected.
    pub fn with_service(mut self, service: Arc<dyn PlanService>) -> Self {
        self.service = Some(service);
        self
    }

    /// Builds the configured generator.
    ///
    /// # Errors
    ///
    /// Returns `CompassError::Configuration` if no service was injected and
    /// no API key was set, if the model identifier is empty, or if the HTTP
    /// client cannot be created.
    pub fn build(self) -> Result<PlanGenerator> {
        if self.model.trim().is_empty() {
            return Err(CompassError::Configuration {
                message: "Model identifier must not be empty".to_string(),
            });
        }

        let service: Arc<dyn PlanService> = match self.service {
            Some(service) => service,
            None => {
                let api_key = self.api_key.ok_or_else(|| CompassError::Configuration {
                    message: "No API key configured. Set GEMINI_API_KEY, pass --api-key, or add api_key to the config file".to_string(),
                })?;
                Arc::new(GeminiClient::new(api_key, self.base_url, self.timeout)?)
            }
        };

        Ok(PlanGenerator::new(
            service,
            self.model,
            self.budget,
            self.validation,
        ))
    }
}

impl Default for PlanGeneratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
