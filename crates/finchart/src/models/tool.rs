use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A tool that the generation service may invoke.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tool {
    /// The name of the tool
    pub name: String,
    /// A description of what the tool does
    pub description: String,
    /// JSON schema describing the input the tool accepts
    pub input_schema: Value,
}

impl Tool {
    /// Create a new tool with the given name, description and input schema
    pub fn new<N, D>(name: N, description: D, input_schema: Value) -> Self
    where
        N: Into<String>,
        D: Into<String>,
    {
        Tool {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

/// The service's claim that a named tool should run. `input` is untrusted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolInvocation {
    pub id: String,
    pub name: String,
    pub input: Value,
}

impl ToolInvocation {
    pub fn new<I: Into<String>, N: Into<String>>(id: I, name: N, input: Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            input,
        }
    }
}
