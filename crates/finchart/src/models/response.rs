use serde::{Deserialize, Serialize};

use super::chart::ChartSpec;
use super::tool::ToolInvocation;

/// The only artifact returned to the caller for a successful request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedResponse {
    pub content: String,
    pub has_tool_use: bool,
    pub tool_use: Option<ToolInvocation>,
    pub chart_data: Option<ChartSpec>,
}
