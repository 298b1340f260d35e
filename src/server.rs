use rmcp::{
    handler::server::{
        router::tool::ToolRouter,
        wrapper::{Json, Parameters},
    },
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, ErrorData, ServerHandler,
};

use crate::tools::{calculator, shell, CalculationResult, CalculatorRequest, ShellOutcome, ShellRequest};

const CALCULATOR_INSTRUCTIONS: &str = r#"A calculator MCP server exposing calculator_tool.

Supports +, -, *, / with standard precedence, unary minus and parentheses.
Results are always floating point: {"value": 2.5}.

Error codes: -32602 invalid parameter, -32000 invalid expression, -32001 division by zero,
-32603 result is not a finite number."#;

const SHELL_INSTRUCTIONS: &str = r#"A shell MCP server exposing shell_tool.

Runs the command through the host shell (pipes, redirection and wildcards work) and returns
{"stdout", "stderr", "returncode"}. A non-zero returncode is reported as data, not as an error.
Commands are not sandboxed and have no timeout.

Error codes: -32602 invalid parameter, -32002 invalid working directory, -32000 execution error."#;

#[derive(Clone)]
pub struct CalculatorServer {
    tool_router: ToolRouter<Self>,
}

impl CalculatorServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }
}

impl Default for CalculatorServer {
    fn default() -> Self {
        Self::new()
    }
}

#[rmcp::tool_router]
impl CalculatorServer {
    #[tool(description = "Performs arithmetic calculations on the input expression string.
Supports addition (+), subtraction (-), multiplication (*), and division (/).
Handles parentheses for grouping and respects operator precedence.

Example: {\"expression\": \"5*3-2/4\"} returns {\"value\": 14.5}")]
    fn calculator_tool(
        &self,
        Parameters(req): Parameters<CalculatorRequest>,
    ) -> Result<Json<CalculationResult>, ErrorData> {
        calculator::execute(&req).map(Json).map_err(ErrorData::from)
    }
}

#[rmcp::tool_handler]
impl ServerHandler for CalculatorServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "calculator-server".to_string(),
                ..Implementation::from_build_env()
            },
            instructions: Some(CALCULATOR_INSTRUCTIONS.to_string()),
        }
    }
}

#[derive(Clone)]
pub struct ShellServer {
    tool_router: ToolRouter<Self>,
}

impl ShellServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }
}

impl Default for ShellServer {
    fn default() -> Self {
        Self::new()
    }
}

#[rmcp::tool_router]
impl ShellServer {
    #[tool(description = "Executes a shell command in an optional working directory and returns its output.

Input:
- command: the command line to execute
- working_dir: optional directory to run it in (must exist)

Output: {\"stdout\": ..., \"stderr\": ..., \"returncode\": ...}

Example: {\"command\": \"ls -la\", \"working_dir\": \"/tmp\"}")]
    async fn shell_tool(
        &self,
        Parameters(req): Parameters<ShellRequest>,
    ) -> Result<Json<ShellOutcome>, ErrorData> {
        shell::execute(&req).await.map(Json).map_err(ErrorData::from)
    }
}

#[rmcp::tool_handler]
impl ServerHandler for ShellServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "shell-server".to_string(),
                ..Implementation::from_build_env()
            },
            instructions: Some(SHELL_INSTRUCTIONS.to_string()),
        }
    }
}
