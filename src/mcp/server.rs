//! Converter MCP Server Implementation
//!
//! Implements the MCP server with all converter tools.

use std::sync::{Arc, Mutex as StdMutex, MutexGuard};

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::conversion::{Category, ConversionEngine};
use crate::tools::conversions;
use crate::tools::converter::ConverterSession;
use crate::tools::status::StatusTracker;

/// Converter MCP Service
#[derive(Clone)]
pub struct ConverterService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    engine: ConversionEngine,
    /// Form state shared by the session_* tools
    session: Arc<StdMutex<ConverterSession>>,
    tool_router: ToolRouter<ConverterService>,
}

impl ConverterService {
    /// `table_source` is reported by the status tool ("builtin" or a file path)
    pub fn new(engine: ConversionEngine, table_source: impl Into<String>) -> Self {
        let table = engine.table();
        let tracker = StatusTracker::new(
            table_source,
            table.units(Category::Length).len(),
            table.units(Category::Weight).len(),
        );
        Self {
            status_tracker: Arc::new(Mutex::new(tracker)),
            session: Arc::new(StdMutex::new(ConverterSession::new(engine.clone()))),
            engine,
            tool_router: Self::tool_router(),
        }
    }

    fn session(&self) -> Result<MutexGuard<'_, ConverterSession>, McpError> {
        self.session
            .lock()
            .map_err(|_| McpError::internal_error("Converter session lock poisoned", None))
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListUnitsParams {
    /// Category name: "length" or "weight"
    pub category: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ConvertParams {
    /// Category name: "length" or "weight"
    pub category: String,
    /// Source unit display name, e.g. "meters (m)"
    pub from_unit: String,
    /// Target unit display name, e.g. "feet (ft)"
    pub to_unit: String,
    /// Value as typed by the user, e.g. "12.5"
    pub value: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ValidateInputParams {
    /// Raw text to validate
    pub text: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FormatResultParams {
    pub value: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SwapUnitsParams {
    pub from_unit: String,
    pub to_unit: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SelectCategoryParams {
    /// Category name: "length" or "weight"
    pub category: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SelectUnitsParams {
    pub from_unit: String,
    pub to_unit: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetInputParams {
    /// Raw input text
    pub text: String,
}

// ============================================================================
// Tool Router
// ============================================================================

#[tool_router]
impl ConverterService {
    // --- Status ---

    #[tool(description = "Get the current status of the converter service including build info, unit table source, and process information")]
    async fn converter_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        json_result(&tracker.get_status())
    }

    #[tool(description = "Get instructions for using the converter tools. Call this when unsure about unit names or input format.")]
    fn converter_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::CONVERTER_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(CONVERTER_INSTRUCTIONS)]))
    }

    // --- Stateless conversion ---

    #[tool(description = "List measurement categories with their base unit and default from/to units")]
    fn list_categories(&self) -> Result<CallToolResult, McpError> {
        json_result(&conversions::list_categories(&self.engine))
    }

    #[tool(description = "List the units of a category in display order with their factor to the base unit")]
    fn list_units(&self, Parameters(p): Parameters<ListUnitsParams>) -> Result<CallToolResult, McpError> {
        let result = conversions::list_units(&self.engine, &p.category)
            .map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Convert a value between two units of the same category. The value is raw text and is validated first. Returns the numeric result and its display string (6 decimals, trailing zeros trimmed).")]
    fn convert(&self, Parameters(p): Parameters<ConvertParams>) -> Result<CallToolResult, McpError> {
        let result = conversions::convert(&self.engine, &p.category, &p.from_unit, &p.to_unit, &p.value)
            .map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Validate raw input text as a non-negative decimal number")]
    fn validate_input(&self, Parameters(p): Parameters<ValidateInputParams>) -> Result<CallToolResult, McpError> {
        json_result(&conversions::validate(&p.text))
    }

    #[tool(description = "Format a number the way conversion results are displayed")]
    fn format_result(&self, Parameters(p): Parameters<FormatResultParams>) -> Result<CallToolResult, McpError> {
        json_result(&conversions::format(p.value))
    }

    #[tool(description = "Swap a from/to unit pair")]
    fn swap_units(&self, Parameters(p): Parameters<SwapUnitsParams>) -> Result<CallToolResult, McpError> {
        json_result(&conversions::swap_units(p.from_unit, p.to_unit))
    }

    // --- Session ---

    #[tool(description = "Get the converter session state: category, units, input text, available units and last result")]
    fn session_state(&self) -> Result<CallToolResult, McpError> {
        let session = self.session()?;
        json_result(&session.snapshot())
    }

    #[tool(description = "Select the session category. Resets from/to units to the category defaults and clears the result.")]
    fn session_select_category(&self, Parameters(p): Parameters<SelectCategoryParams>) -> Result<CallToolResult, McpError> {
        let category = conversions::parse_category(&p.category)
            .map_err(|e| McpError::invalid_params(e, None))?;
        let mut session = self.session()?;
        session.select_category(category);
        json_result(&session.snapshot())
    }

    #[tool(description = "Select the session from/to units. Both must belong to the selected category.")]
    fn session_select_units(&self, Parameters(p): Parameters<SelectUnitsParams>) -> Result<CallToolResult, McpError> {
        let mut session = self.session()?;
        session
            .select_units(&p.from_unit, &p.to_unit)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
        json_result(&session.snapshot())
    }

    #[tool(description = "Set the session input text (not validated until session_convert)")]
    fn session_set_input(&self, Parameters(p): Parameters<SetInputParams>) -> Result<CallToolResult, McpError> {
        let mut session = self.session()?;
        session.set_input(&p.text);
        json_result(&session.snapshot())
    }

    #[tool(description = "Swap the session from/to units and recompute the displayed result if there is one")]
    fn session_swap(&self) -> Result<CallToolResult, McpError> {
        let mut session = self.session()?;
        let error = session.swap_units().err().map(|e| e.to_string());
        let json = serde_json::json!({
            "success": error.is_none(),
            "error": error,
            "state": session.snapshot(),
        });
        json_result(&json)
    }

    #[tool(description = "Convert the session input. On invalid input the previous result is kept and the error is reported.")]
    fn session_convert(&self) -> Result<CallToolResult, McpError> {
        let mut session = self.session()?;
        json_result(&session.convert_response())
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for ConverterService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "uconv".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Unit Converter".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Unit Converter (uconv) - length and weight conversion. \
                 Call converter_instructions for unit naming and input rules. \
                 Catalog: list_categories, list_units. \
                 One-off: convert, validate_input, format_result, swap_units. \
                 Session: session_state, session_select_category, session_select_units, \
                 session_set_input, session_swap, session_convert. \
                 Status: converter_status."
                    .into(),
            ),
        }
    }
}
