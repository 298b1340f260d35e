use rmcp::schemars;
use serde::{Deserialize, Serialize};

use crate::error::ToolError;
use crate::eval::evaluate;

/// Request parameters for the calculator tool
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculatorRequest {
    /// Arithmetic expression, e.g. "5*3-2/4" or "(3.8 - 3.11) * 2"
    pub expression: String,
}

/// Numeric result of a calculation
#[derive(Debug, Clone, PartialEq, Serialize, schemars::JsonSchema)]
pub struct CalculationResult {
    /// The evaluated value
    pub value: f64,
}

/// Evaluate the requested expression
pub fn execute(req: &CalculatorRequest) -> Result<CalculationResult, ToolError> {
    tracing::info!(expression = %req.expression, "calculator tool called");

    match evaluate(&req.expression) {
        Ok(value) if !value.is_finite() => {
            tracing::warn!(expression = %req.expression, value, "expression overflowed");
            Err(ToolError::Internal(format!(
                "Expression \"{}\" evaluated to {}, which is not a finite number",
                req.expression, value
            )))
        }
        Ok(value) => {
            tracing::info!(expression = %req.expression, value, "expression evaluated");
            Ok(CalculationResult { value })
        }
        Err(e) => {
            tracing::warn!(expression = %req.expression, error = %e, "expression rejected");
            Err(e.into())
        }
    }
}
