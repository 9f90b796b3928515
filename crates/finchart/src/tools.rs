//! Declarations of the tools the generation service may invoke.
//!
//! The schemas are part of the wire contract: field names, required lists and
//! enumerations must match what the chart normalizer and renderer expect.
use std::collections::HashSet;

use serde_json::json;
use strum::IntoEnumIterator;

use crate::errors::{AnalystError, AnalystResult};
use crate::models::chart::ChartType;
use crate::models::tool::Tool;

pub const GENERATE_GRAPH_DATA: &str = "generate_graph_data";
pub const GET_STOCK_PRICE: &str = "get_stock_price";

pub fn generate_graph_data() -> Tool {
    let chart_types: Vec<String> = ChartType::iter().map(|c| c.to_string()).collect();

    Tool::new(
        GENERATE_GRAPH_DATA,
        "Generate structured JSON data for creating financial charts and graphs.",
        json!({
            "type": "object",
            "properties": {
                "chartType": {
                    "type": "string",
                    "enum": chart_types,
                    "description": "The type of chart to generate"
                },
                "config": {
                    "type": "object",
                    "properties": {
                        "title": { "type": "string" },
                        "description": { "type": "string" },
                        "trend": {
                            "type": "object",
                            "properties": {
                                "percentage": { "type": "number" },
                                "direction": {
                                    "type": "string",
                                    "enum": ["up", "down"]
                                }
                            },
                            "required": ["percentage", "direction"]
                        },
                        "footer": { "type": "string" },
                        "totalLabel": { "type": "string" },
                        "xAxisKey": { "type": "string" }
                    },
                    "required": ["title", "description"]
                },
                "data": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "additionalProperties": true
                    }
                },
                "chartConfig": {
                    "type": "object",
                    "additionalProperties": {
                        "type": "object",
                        "properties": {
                            "label": { "type": "string" },
                            "stacked": { "type": "boolean" }
                        },
                        "required": ["label"]
                    }
                }
            },
            "required": ["chartType", "config", "data", "chartConfig"]
        }),
    )
}

pub fn get_stock_price() -> Tool {
    Tool::new(
        GET_STOCK_PRICE,
        "Look up historical and current price data for a stock ticker symbol.",
        json!({
            "type": "object",
            "properties": {
                "symbol": {
                    "type": "string",
                    "description": "The stock ticker symbol, e.g. AAPL"
                },
                "period": {
                    "type": "string",
                    "enum": ["1d", "5d", "1mo", "3mo", "6mo", "1y", "5y"],
                    "description": "How far back to fetch prices"
                }
            },
            "required": ["symbol"]
        }),
    )
}

/// The immutable set of tools declared on every request
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: Vec<Tool>,
}

impl ToolRegistry {
    pub fn new(tools: Vec<Tool>) -> AnalystResult<Self> {
        let mut names = HashSet::new();
        for tool in &tools {
            if !names.insert(tool.name.as_str()) {
                return Err(AnalystError::Internal(format!(
                    "Duplicate tool name: {}",
                    tool.name
                )));
            }
        }
        Ok(Self { tools })
    }

    /// The chart tool and the price lookup tool
    pub fn standard() -> AnalystResult<Self> {
        Self::new(vec![generate_graph_data(), get_stock_price()])
    }

    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.iter().find(|tool| tool.name == name)
    }
}
