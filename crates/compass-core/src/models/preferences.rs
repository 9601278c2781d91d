use std::{fmt, str::FromStr};

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{CompassError, Result};

/// How much energy the user reports having on a typical day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum EnergyLevel {
    /// Conservation mode
    Low,
    /// Sustainable pace
    #[default]
    Moderate,
    /// Peak output
    High,
}

impl EnergyLevel {
    /// The wire and prompt representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            EnergyLevel::Low => "low",
            EnergyLevel::Moderate => "moderate",
            EnergyLevel::High => "high",
        }
    }
}

impl FromStr for EnergyLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(EnergyLevel::Low),
            "moderate" => Ok(EnergyLevel::Moderate),
            "high" => Ok(EnergyLevel::High),
            _ => Err(format!(
                "Invalid energy level: {s}. Must be 'low', 'moderate', or 'high'"
            )),
        }
    }
}

impl fmt::Display for EnergyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The voice the generated plan should be written in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// The nurturer
    #[default]
    Gentle,
    /// The strategist
    Disciplined,
    /// The visionary
    Motivational,
}

impl Tone {
    /// The wire and prompt representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Gentle => "gentle",
            Tone::Disciplined => "disciplined",
            Tone::Motivational => "motivational",
        }
    }
}

impl FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gentle" => Ok(Tone::Gentle),
            "disciplined" => Ok(Tone::Disciplined),
            "motivational" => Ok(Tone::Motivational),
            _ => Err(format!(
                "Invalid tone: {s}. Must be 'gentle', 'disciplined', or 'motivational'"
            )),
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Questionnaire answers a plan is generated from.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    /// How the plan should address the user
    pub name: String,

    /// The one goal the week builds toward
    pub main_goal: String,

    /// What is currently holding the user back
    #[serde(default)]
    pub current_struggle: String,

    /// Typical daily energy
    #[serde(default)]
    pub energy_level: EnergyLevel,

    /// Voice of the plan
    #[serde(default)]
    pub tone: Tone,
}

impl UserPreferences {
    /// Start preferences with the two required answers; the rest default.
    pub fn new(name: impl Into<String>, main_goal: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            main_goal: main_goal.into(),
            ..Default::default()
        }
    }

    pub fn with_struggle(mut self, struggle: impl Into<String>) -> Self {
        self.current_struggle = struggle.into();
        self
    }

    pub fn with_energy(mut self, energy: EnergyLevel) -> Self {
        self.energy_level = energy;
        self
    }

    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    /// Check that a request may be issued for these preferences.
    ///
    /// # Errors
    ///
    /// Returns `CompassError::InvalidInput` when `name` or `mainGoal` is
    /// empty or only whitespace.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CompassError::invalid_input("name").with_reason("Name must not be empty"));
        }
        if self.main_goal.trim().is_empty() {
            return Err(
                CompassError::invalid_input("mainGoal").with_reason("Main goal must not be empty")
            );
        }
        Ok(())
    }
}
