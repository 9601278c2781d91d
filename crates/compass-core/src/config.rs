//! File and environment configuration for building a generator.
//!
//! Settings are layered: a JSON config file (explicit path, or
//! `$XDG_CONFIG_HOME/compass/config.json`), then environment variables, then
//! whatever the caller overrides before calling [`Config::into_builder`].
//!
//! ```json
//! {
//!   "api_key": "...",
//!   "model": "gemini-3-pro-preview",
//!   "max_output_tokens": 16384,
//!   "thinking_budget": 4000,
//!   "timeout_secs": 120,
//!   "strict": false
//! }
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{
    error::{CompassError, Result, ResultExt},
    generator::PlanGeneratorBuilder,
    models::UserPreferences,
    request::{GenerationRequest, TokenBudget},
    service::DEFAULT_MODEL,
    validator::ValidationMode,
};

/// Primary credential variable.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
/// Fallback credential variable, consulted when the primary one is unset.
pub const FALLBACK_API_KEY_ENV: &str = "API_KEY";
/// Model override variable.
pub const MODEL_ENV: &str = "COMPASS_MODEL";

const CONFIG_FILE_NAME: &str = "config.json";

/// Optional settings; anything unset falls back to the builder defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub max_output_tokens: Option<u32>,
    pub thinking_budget: Option<u32>,
    pub timeout_secs: Option<u64>,
    pub strict: Option<bool>,
}

impl Config {
    /// Load configuration from `path`, or from the XDG config directory when
    /// no path is given.
    ///
    /// A missing default file is not an error and yields an empty config.
    ///
    /// # Errors
    ///
    /// Returns `CompassError::FileSystem` if an explicit file cannot be read
    /// and `CompassError::Configuration` if the file is not valid config
    /// JSON.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) => Self::from_file(&path),
                None => {
                    debug!("No config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    /// The config file under the XDG config directories, if one exists.
    pub fn default_path() -> Option<PathBuf> {
        xdg::BaseDirectories::with_prefix("compass").find_config_file(CONFIG_FILE_NAME)
    }

    /// Read and parse one config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| CompassError::FileSystem {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&contents)
            .with_context_lazy(|| format!("Invalid config file {}", path.display()))?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Apply environment overrides using `lookup` to read variables.
    ///
    /// Empty values are treated as unset.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(key) = non_empty(API_KEY_ENV).or_else(|| non_empty(FALLBACK_API_KEY_ENV)) {
            self.api_key = Some(key);
        }
        if let Some(model) = non_empty(MODEL_ENV) {
            self.model = Some(model);
        }
        self
    }

    /// Apply overrides from the process environment.
    pub fn with_process_env(self) -> Self {
        self.with_env_overrides(|name| std::env::var(name).ok())
    }

    pub fn validation(&self) -> ValidationMode {
        if self.strict.unwrap_or(false) {
            ValidationMode::Strict
        } else {
            ValidationMode::Lenient
        }
    }

    /// The request a generator built from these settings would send for
    /// `prefs`. Needs no credential.
    ///
    /// # Errors
    ///
    /// Returns `CompassError::InvalidInput` for incomplete preferences and
    /// `CompassError::Configuration` for an inconsistent budget.
    pub fn request_for(&self, prefs: &UserPreferences) -> Result<GenerationRequest> {
        prefs.validate()?;
        let budget = TokenBudget::from_parts(self.max_output_tokens, self.thinking_budget)?;
        let model = self.model.as_deref().unwrap_or(DEFAULT_MODEL);
        Ok(GenerationRequest::for_preferences(prefs, model, budget))
    }

    /// Turn the settings into a generator builder.
    ///
    /// # Errors
    ///
    /// Returns `CompassError::Configuration` if only one of the two token
    /// budgets is set or the pair is inconsistent.
    pub fn into_builder(self) -> Result<PlanGeneratorBuilder> {
        let budget = TokenBudget::from_parts(self.max_output_tokens, self.thinking_budget)?;
        let mut builder = PlanGeneratorBuilder::new()
            .with_budget(budget)
            .with_validation(self.validation());

        if let Some(key) = self.api_key {
            builder = builder.with_api_key(key);
        }
        if let Some(model) = self.model {
            builder = builder.with_model(model);
        }
        if let Some(base_url) = self.base_url {
            builder = builder.with_base_url(base_url);
        }
        if let Some(secs) = self.timeout_secs {
            builder = builder.with_timeout(Duration::from_secs(secs));
        }
        Ok(builder)
    }
}
