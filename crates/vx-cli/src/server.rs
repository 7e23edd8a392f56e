use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use schemars::JsonSchema;
use serde::Deserialize;
use vx_core::{Digit, DigitError, HarmonicEngine};

/// MCP tool server over a shared, immutable engine.
/// Requests are independent; no per-session state is kept.
#[derive(Clone)]
pub struct VxServer {
    engine: Arc<HarmonicEngine>,
    tool_router: ToolRouter<Self>,
}

impl VxServer {
    pub fn new(engine: HarmonicEngine) -> Self {
        Self {
            engine: Arc::new(engine),
            tool_router: Self::tool_router(),
        }
    }

    fn json_result(value: serde_json::Value) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(
            serde_json::to_string_pretty(&value).unwrap_or_default(),
        )]))
    }
}

fn domain_error(e: DigitError) -> McpError {
    McpError::invalid_params(e.to_string(), None)
}

// --- Tool parameter types ---

#[derive(Debug, Deserialize, JsonSchema)]
struct PairRequest {
    /// First digit of the ordered pair (0-9)
    a: i64,
    /// Second digit of the ordered pair (0-9)
    b: i64,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct MatrixRequest {
    /// Anchor digit the matrix is generated from (0-9)
    anchor: i64,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct FlowRequest {
    /// Digit whose vortex flow to return (0-9)
    digit: i64,
}

#[tool_router]
impl VxServer {
    #[tool(
        description = "Derive the full relation for an ordered digit pair (a, b): label, multiplication result, consciousness, harmonic, frequency (a multiple of 432 Hz), vortex flow, HSL color and sound frequency."
    )]
    async fn vx_relation(
        &self,
        Parameters(req): Parameters<PairRequest>,
    ) -> Result<CallToolResult, McpError> {
        let relation = self.engine.relation_for(req.a, req.b).map_err(domain_error)?;
        Self::json_result(serde_json::to_value(&relation).unwrap_or_default())
    }

    #[tool(
        description = "Build the 10x10 interaction matrix for an anchor digit. Cell (i, j) is (anchor * (i + j)) mod 9 with 0 replaced by 9."
    )]
    async fn vx_matrix(
        &self,
        Parameters(req): Parameters<MatrixRequest>,
    ) -> Result<CallToolResult, McpError> {
        let matrix = self.engine.matrix_for(req.anchor).map_err(domain_error)?;
        Self::json_result(serde_json::json!({
            "anchor": matrix.anchor,
            "cells": matrix.to_values(),
        }))
    }

    #[tool(description = "CSS hsl() color for an ordered digit pair.")]
    async fn vx_color(
        &self,
        Parameters(req): Parameters<PairRequest>,
    ) -> Result<CallToolResult, McpError> {
        let color = self.engine.color_for(req.a, req.b).map_err(domain_error)?;
        Self::json_result(serde_json::json!({ "color": color }))
    }

    #[tool(description = "Sound frequency in Hz for an ordered digit pair.")]
    async fn vx_sound(
        &self,
        Parameters(req): Parameters<PairRequest>,
    ) -> Result<CallToolResult, McpError> {
        let sound = self.engine.sound_for(req.a, req.b).map_err(domain_error)?;
        Self::json_result(serde_json::json!({ "soundHz": sound }))
    }

    #[tool(description = "Vortex flow sequence for a single digit.")]
    async fn vx_flow(
        &self,
        Parameters(req): Parameters<FlowRequest>,
    ) -> Result<CallToolResult, McpError> {
        let digit = Digit::try_from(req.digit).map_err(domain_error)?;
        let flow = self.engine.get_vortex_flow(digit);
        Self::json_result(serde_json::json!({ "digit": digit, "flow": flow }))
    }

    #[tool(
        description = "Show the active multiplier table with per-row provenance, plus every digit where it disagrees with the relation or main source convention."
    )]
    async fn vx_table(&self) -> Result<CallToolResult, McpError> {
        let table = self.engine.table();
        Self::json_result(serde_json::json!({
            "label": table.label(),
            "table": table,
            "colorPolicy": self.engine.policy(),
            "discrepancies": table.discrepancy_report(),
        }))
    }
}

#[tool_handler]
impl ServerHandler for VxServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Deterministic digit-pair harmonic engine. All tools take digits 0-9 and \
                 return JSON. Identical arguments always return identical results. \
                 Out-of-range digits are rejected with invalid-params."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
