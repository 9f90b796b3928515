use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result as AnyhowResult;
use async_trait::async_trait;
use tracing::{debug, info};

use crate::errors::AnalystResult;
use crate::models::tool::ToolInvocation;

/// Receives tool invocations the pipeline returns to the caller without executing.
///
/// Executing the tool is the handler's own business; the pipeline only routes the
/// invocation by name and still returns it to the caller as opaque data.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn handle(&self, invocation: &ToolInvocation) -> AnyhowResult<()>;
}

/// Records invocations in the trace log and does nothing else
pub struct LoggingToolHandler;

#[async_trait]
impl ToolHandler for LoggingToolHandler {
    async fn handle(&self, invocation: &ToolInvocation) -> AnyhowResult<()> {
        info!(
            tool = %invocation.name,
            id = %invocation.id,
            input = %invocation.input,
            "tool invocation left for external execution"
        );
        Ok(())
    }
}

/// Handlers keyed by tool name
#[derive(Clone, Default)]
pub struct ToolHandlers {
    handlers: HashMap<String, Arc<dyn ToolHandler>>,
}

impl ToolHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<S: Into<String>>(&mut self, name: S, handler: Arc<dyn ToolHandler>) {
        self.handlers.insert(name.into(), handler);
    }

    pub fn with<S: Into<String>>(mut self, name: S, handler: Arc<dyn ToolHandler>) -> Self {
        self.register(name, handler);
        self
    }

    /// Hand the invocation to the handler registered for its tool name.
    /// Returns whether a handler was found.
    pub async fn route(&self, invocation: &ToolInvocation) -> AnalystResult<bool> {
        match self.handlers.get(&invocation.name) {
            Some(handler) => {
                handler.handle(invocation).await?;
                Ok(true)
            }
            None => {
                debug!(tool = %invocation.name, "no handler registered for tool");
                Ok(false)
            }
        }
    }
}
