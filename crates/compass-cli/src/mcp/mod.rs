//! MCP server implementation for Compass
//!
//! Exposes plan generation, offline rendering and prompt inspection as MCP
//! tools over stdio, so AI assistants can produce plans on a user's behalf.

use std::sync::Arc;

use anyhow::Result;
use compass_core::{
    display::OperationStatus, parse_plan, CompassError, Config, GoalChecklist, PlanGenerator,
    PlanReport, UserPreferences, ValidationMode,
};
use jiff::Timestamp;
use log::{debug, error, info, warn};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};
use schemars::JsonSchema;
use serde::Deserialize;
use tokio::signal::unix::{signal, SignalKind};

pub mod errors;

pub use errors::to_mcp_error;

pub type McpResult = Result<CallToolResult, McpError>;

/// Parameters for `render_plan`.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct RenderPlan {
    /// Plan JSON, as returned by `generate_plan`
    pub plan: String,
    /// Weekly goal numbers (1-based) to show as done
    #[serde(default)]
    pub checked_goals: Vec<usize>,
    /// Reject plans that miss any field of the contract
    #[serde(default)]
    pub strict: bool,
}

/// MCP server for Compass
#[derive(Clone)]
pub struct CompassMcpServer {
    config: Arc<Config>,
    generator: Option<Arc<PlanGenerator>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl CompassMcpServer {
    /// Create a server from resolved settings.
    ///
    /// Without a usable credential the server still starts; only
    /// `generate_plan` is unavailable.
    pub fn new(config: Config) -> Self {
        let generator = match config.clone().into_builder().and_then(|b| b.build()) {
            Ok(generator) => Some(Arc::new(generator)),
            Err(e) => {
                warn!("Plan generation unavailable: {e}");
                None
            }
        };
        Self {
            config: Arc::new(config),
            generator,
            tool_router: Self::tool_router(),
        }
    }

    /// Create a server around an existing generator.
    pub fn with_generator(config: Config, generator: PlanGenerator) -> Self {
        Self {
            config: Arc::new(config),
            generator: Some(Arc::new(generator)),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        name = "generate_plan",
        description = "Generate a personalized weekly life plan. Requires name and mainGoal; optionally currentStruggle, energyLevel (low/moderate/high) and tone (gentle/disciplined/motivational). Returns the rendered plan as markdown followed by the plan JSON, which can be passed to render_plan later. Each call issues one request to the model; only one generation runs at a time."
    )]
    async fn generate_plan(&self, Parameters(prefs): Parameters<UserPreferences>) -> McpResult {
        debug!("generate_plan: {:?}", prefs);

        let generator = self.generator.as_ref().ok_or_else(|| {
            McpError::internal_error(
                "Plan generation is not configured. Set GEMINI_API_KEY or add api_key to the config file",
                None,
            )
        })?;

        let plan = generator.generate(&prefs).await.map_err(|e| {
            error!("generate_plan failed: {e}");
            to_mcp_error(&e)
        })?;

        let generated_at = Timestamp::now();
        let report = PlanReport::new(&plan).with_generated_at(&generated_at).to_string();
        let json = serde_json::to_string_pretty(&plan)
            .map_err(|e| McpError::internal_error(format!("Failed to serialize plan: {e}"), None))?;

        Ok(CallToolResult::success(vec![
            Content::text(report),
            Content::text(json),
        ]))
    }

    #[tool(
        name = "render_plan",
        description = "Render a plan JSON (as returned by generate_plan) as markdown without contacting the model. Use checked_goals with 1-based weekly goal numbers to show milestones as done. Set strict=true to reject plans missing any field."
    )]
    async fn render_plan(&self, Parameters(params): Parameters<RenderPlan>) -> McpResult {
        debug!("render_plan: {} bytes, checked {:?}", params.plan.len(), params.checked_goals);

        let validation = if params.strict {
            ValidationMode::Strict
        } else {
            self.config.validation()
        };
        let plan = parse_plan(&params.plan, validation).map_err(|e| match e {
            CompassError::Generation { detail } => {
                McpError::invalid_params(format!("Invalid plan: {detail}"), None)
            }
            other => to_mcp_error(&other),
        })?;
        let checklist = GoalChecklist::from_numbers(plan.weekly_goals.len(), &params.checked_goals)
            .map_err(|e| to_mcp_error(&e))?;

        let report = PlanReport::new(&plan).with_checklist(&checklist);
        Ok(CallToolResult::success(vec![Content::text(report.to_string())]))
    }

    #[tool(
        name = "plan_prompt",
        description = "Show the exact system instruction and prompt generate_plan would send for the given preferences, without contacting the model. Takes the same parameters as generate_plan."
    )]
    async fn plan_prompt(&self, Parameters(prefs): Parameters<UserPreferences>) -> McpResult {
        debug!("plan_prompt: {:?}", prefs);

        let request = self.config.request_for(&prefs).map_err(|e| to_mcp_error(&e))?;
        let status = OperationStatus::success(format!(
            "Prompt for model {} ({} output / {} thinking tokens)",
            request.model,
            request.budget.max_output_tokens(),
            request.budget.thinking_budget()
        ));
        let text = format!(
            "{status}\n## System Instruction\n\n{}\n\n## Prompt\n\n{}\n",
            request.system_instruction, request.prompt
        );
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for CompassMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(r#"Compass turns a short questionnaire into a structured weekly life plan.

## Core Concepts
- **Preferences**: name and mainGoal (required), currentStruggle, energyLevel, tone
- **Plan**: morning/afternoon/evening routines, growth habits, a mindset tip, weekly goals and a 7-day schedule

## Workflow
1. Call `generate_plan` with the user's answers; keep the returned plan JSON
2. Call `render_plan` with that JSON and `checked_goals` as the user completes milestones
3. Use `plan_prompt` to inspect what would be sent to the model

## Notes
- Generation failures always report "Could not generate plan. Please try again."; retrying is up to the caller
- Only one generation runs at a time; a concurrent call fails immediately"#.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: CompassMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Compass MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
