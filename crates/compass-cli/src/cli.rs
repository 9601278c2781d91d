//! Command handlers for the `compass` binary.
//!
//! Each handler takes already-resolved settings from `main` and the parsed
//! arguments for its subcommand, and writes markdown through the
//! [`TerminalRenderer`].

use std::{fs, sync::Arc};

use anyhow::{anyhow, bail, Context, Result};
use compass_core::{
    display::OperationStatus, parse_plan, CompassError, Config, GoalChecklist, PlanGenerator,
    PlanReport, PlanSession, SessionState, UserPreferences, ValidationMode,
};
use log::info;

use crate::{
    args::{GenerateArgs, PromptArgs, RenderArgs},
    renderer::TerminalRenderer,
};

pub struct Cli {
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(renderer: TerminalRenderer) -> Self {
        Self { renderer }
    }

    /// Print a failed command's error chain on one line to stderr.
    pub fn report_error(&self, error: &anyhow::Error) {
        let status = OperationStatus::failure(format!("{error:#}"));
        self.renderer.render_error(status.to_string().trim_end());
    }

    /// Generate a plan and render, print or export it.
    ///
    /// A failed generation surfaces only the session's message.
    pub async fn generate(&self, generator: PlanGenerator, args: GenerateArgs) -> Result<()> {
        let GenerateArgs {
            preferences,
            json,
            output,
            ..
        } = args;
        let prefs = UserPreferences::from(preferences);

        let mut session = PlanSession::new(Arc::new(generator));
        let view = match session.submit(&prefs).await? {
            SessionState::Ready(view) => view,
            SessionState::Failed(message) => bail!("{message}"),
            SessionState::Idle | SessionState::Loading => {
                bail!("Plan generation did not finish")
            }
        };

        let report = PlanReport::from_view(view).to_string();
        if json {
            let plan = serde_json::to_string_pretty(view.plan())
                .context("Failed to serialize plan")?;
            println!("{plan}");
        } else {
            self.renderer.render(&report);
        }

        if let Some(path) = output {
            fs::write(&path, &report)
                .with_context(|| format!("Failed to export plan to {}", path.display()))?;
            info!("Exported plan to {}", path.display());
            if !json {
                let status = OperationStatus::success(format!("Plan exported to {}", path.display()));
                self.renderer.render(&status.to_string());
            }
        }
        Ok(())
    }

    /// Print the exact request content without contacting the service.
    pub fn prompt(&self, config: &Config, args: PromptArgs) -> Result<()> {
        let prefs = UserPreferences::from(args.preferences);
        let request = config.request_for(&prefs)?;

        let mut markdown = format!(
            "# Generation Request\n\n- Model: {}\n- Max output tokens: {}\n- Thinking budget: {}\n\n",
            request.model,
            request.budget.max_output_tokens(),
            request.budget.thinking_budget()
        );
        markdown.push_str(&format!(
            "## System Instruction\n\n{}\n\n## Prompt\n\n{}\n",
            request.system_instruction, request.prompt
        ));
        if args.schema {
            let schema = serde_json::to_string_pretty(&request.response_schema)
                .context("Failed to serialize response schema")?;
            markdown.push_str(&format!("\n## Response Schema\n\n```json\n{schema}\n```\n"));
        }

        self.renderer.render(&markdown);
        Ok(())
    }

    /// Validate a saved plan file and render it with the given goals checked.
    pub fn render(&self, args: &RenderArgs, validation: ValidationMode) -> Result<()> {
        let path = &args.file;
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read plan file {}", path.display()))?;

        let plan = parse_plan(&contents, validation).map_err(|e| match e {
            CompassError::Generation { detail } => {
                anyhow!("Invalid plan file {}: {detail}", path.display())
            }
            other => other.into(),
        })?;

        let checklist = GoalChecklist::from_numbers(plan.weekly_goals.len(), &args.checks)?;

        let report = PlanReport::new(&plan).with_checklist(&checklist);
        self.renderer.render(&report.to_string());
        Ok(())
    }
}
