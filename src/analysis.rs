//! Structured analysis of formulas the translator declines
//!
//! The transport itself lives outside this crate; this module owns the
//! request/response shapes and tolerant parsing of what comes back.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ServiceError;

/// Sends source markup off for analysis
pub trait AnalysisService: Send + Sync {
    fn analyze(&self, markup: &str) -> Result<AnalysisReport, ServiceError>;
}

impl<F> AnalysisService for F
where
    F: Fn(&str) -> Result<AnalysisReport, ServiceError> + Send + Sync,
{
    fn analyze(&self, markup: &str) -> Result<AnalysisReport, ServiceError> {
        self(markup)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisProperty {
    pub label: String,
    pub value_latex: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Category of the formula, e.g. "integral"
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(rename = "result_latex", default)]
    pub result_markup: String,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub properties: Vec<AnalysisProperty>,
    #[serde(default)]
    pub summary: String,
}

/// JSON payload for an analysis request
pub fn request_body(markup: &str) -> Value {
    serde_json::json!({ "latex": markup })
}

/// Parse a bare report or a chat-completion envelope around one
pub fn parse_analysis_response(body: &str) -> Result<AnalysisReport, ServiceError> {
    let value: Value = serde_json::from_str(body).map_err(|e| malformed(e.to_string()))?;

    if let Some(content) = value.pointer("/choices/0/message/content") {
        let content = content
            .as_str()
            .ok_or_else(|| malformed("message content is not a string".to_string()))?;
        return serde_json::from_str(strip_code_fence(content))
            .map_err(|e| malformed(format!("report in envelope: {}", e)));
    }

    let is_report = value
        .as_object()
        .is_some_and(|obj| obj.contains_key("type") || obj.contains_key("result_latex"));
    if !is_report {
        return Err(malformed("neither a report nor an envelope".to_string()));
    }
    serde_json::from_value(value).map_err(|e| malformed(e.to_string()))
}

fn malformed(detail: String) -> ServiceError {
    tracing::warn!("Malformed analysis response: {}", detail);
    ServiceError::MalformedResponse(detail)
}

/// Models like to wrap JSON in ```json fences
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
