//! Command-line arguments, parsed with clap's derive API.
//!
//! Argument structs stay in this crate; each converts into the core type it
//! stands for (`From<PreferenceArgs> for UserPreferences`), so the core never
//! depends on clap.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use compass_core::{EnergyLevel, Tone, UserPreferences};

/// Turn a short questionnaire into a structured weekly life plan
///
/// Compass asks a generative model for a daily routine, growth habits,
/// weekly milestones and a 7-day schedule built around one main goal, and
/// renders the result as markdown. It can also run as an MCP server so AI
/// assistants can generate and render plans.
#[derive(Parser)]
#[command(version, about, name = "compass")]
pub struct Args {
    /// Path to a JSON config file. Defaults to
    /// $XDG_CONFIG_HOME/compass/config.json
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Model identifier, overriding COMPASS_MODEL and the config file
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// API key, overriding GEMINI_API_KEY / API_KEY and the config file
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a new plan
    #[command(alias = "g")]
    Generate(GenerateArgs),
    /// Print the prompt that would be sent, without sending it
    Prompt(PromptArgs),
    /// Validate and render a saved plan JSON file
    #[command(alias = "r")]
    Render(RenderArgs),
    /// Start the MCP server
    Serve,
}

/// The questionnaire.
#[derive(ClapArgs, Debug, Clone)]
pub struct PreferenceArgs {
    /// How the plan should address you
    #[arg(short, long)]
    pub name: String,

    /// The one goal the week builds toward
    #[arg(short, long)]
    pub goal: String,

    /// What is currently holding you back
    #[arg(short, long, default_value = "")]
    pub struggle: String,

    /// Typical daily energy
    #[arg(short, long, value_enum, default_value_t = EnergyArg::Moderate)]
    pub energy: EnergyArg,

    /// Voice of the plan
    #[arg(short, long, value_enum, default_value_t = ToneArg::Gentle)]
    pub tone: ToneArg,
}

impl From<PreferenceArgs> for UserPreferences {
    fn from(val: PreferenceArgs) -> Self {
        UserPreferences::new(val.name, val.goal)
            .with_struggle(val.struggle)
            .with_energy(val.energy.into())
            .with_tone(val.tone.into())
    }
}

#[derive(ClapArgs)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub preferences: PreferenceArgs,

    /// Reject responses that miss any field of the plan contract
    #[arg(long)]
    pub strict: bool,

    /// Print the plan as JSON instead of rendering it
    #[arg(long)]
    pub json: bool,

    /// Also export the rendered plan as markdown to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(ClapArgs)]
pub struct PromptArgs {
    #[command(flatten)]
    pub preferences: PreferenceArgs,

    /// Also print the response schema sent with the prompt
    #[arg(long)]
    pub schema: bool,
}

#[derive(ClapArgs)]
pub struct RenderArgs {
    /// Plan JSON file, as written by `compass generate --json`
    pub file: PathBuf,

    /// Reject files that miss any field of the plan contract
    #[arg(long)]
    pub strict: bool,

    /// Mark weekly goal N (1-based) as done; repeatable
    #[arg(long = "check", value_name = "N")]
    pub checks: Vec<usize>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnergyArg {
    Low,
    Moderate,
    High,
}

impl From<EnergyArg> for EnergyLevel {
    fn from(val: EnergyArg) -> Self {
        match val {
            EnergyArg::Low => EnergyLevel::Low,
            EnergyArg::Moderate => EnergyLevel::Moderate,
            EnergyArg::High => EnergyLevel::High,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToneArg {
    Gentle,
    Disciplined,
    Motivational,
}

impl From<ToneArg> for Tone {
    fn from(val: ToneArg) -> Self {
        match val {
            ToneArg::Gentle => Tone::Gentle,
            ToneArg::Disciplined => Tone::Disciplined,
            ToneArg::Motivational => Tone::Motivational,
        }
    }
}
