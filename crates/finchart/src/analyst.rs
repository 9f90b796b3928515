use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, warn};

use crate::chart_data::normalize_chart_data;
use crate::errors::AnalystResult;
use crate::handlers::ToolHandlers;
use crate::input::{normalize_messages, UnsupportedFilePolicy};
use crate::models::request::ChatRequest;
use crate::models::response::NormalizedResponse;
use crate::prompt_template::system_prompt;
use crate::providers::base::Provider;
use crate::providers::configs::GenerationSettings;
use crate::providers::request::build_request;
use crate::providers::response::parse_response;
use crate::tools::{ToolRegistry, GENERATE_GRAPH_DATA};

/// Analyst runs one chat request end to end: attachment folding, request assembly,
/// the single call to the generation service, and normalization of its reply.
pub struct Analyst {
    provider: Arc<dyn Provider>,
    tools: ToolRegistry,
    handlers: ToolHandlers,
    system: String,
    generation: GenerationSettings,
    unsupported_files: UnsupportedFilePolicy,
}

impl Analyst {
    /// Create a new Analyst around a shared provider client
    pub fn new(provider: Arc<dyn Provider>) -> AnalystResult<Self> {
        Ok(Self {
            provider,
            tools: ToolRegistry::standard()?,
            handlers: ToolHandlers::new(),
            system: system_prompt()?,
            generation: GenerationSettings::default(),
            unsupported_files: UnsupportedFilePolicy::default(),
        })
    }

    pub fn with_generation(mut self, generation: GenerationSettings) -> Self {
        self.generation = generation;
        self
    }

    pub fn with_unsupported_files(mut self, policy: UnsupportedFilePolicy) -> Self {
        self.unsupported_files = policy;
        self
    }

    pub fn with_handlers(mut self, handlers: ToolHandlers) -> Self {
        self.handlers = handlers;
        self
    }

    /// Validate a raw request body and reply to it
    pub async fn reply_to_value(&self, body: Value) -> AnalystResult<NormalizedResponse> {
        let request = ChatRequest::from_value(body)?;
        self.reply(request).await
    }

    pub async fn reply(&self, request: ChatRequest) -> AnalystResult<NormalizedResponse> {
        let result = self.run(request).await;
        if let Err(e) = &result {
            error!(kind = ?e.kind(), status = e.status_code(), "request failed: {}", e);
        }
        result
    }

    async fn run(&self, request: ChatRequest) -> AnalystResult<NormalizedResponse> {
        let messages = normalize_messages(
            request.messages,
            request.file_data.as_ref(),
            self.unsupported_files,
        )?;
        let payload = build_request(
            &request.model,
            messages,
            &self.tools,
            &self.system,
            &self.generation,
        )?;
        debug!(
            model = %payload.model,
            messages = payload.messages.len(),
            "dispatching request to generation service"
        );

        let response = self.provider.complete(&payload).await?;
        let reply = parse_response(&response);

        let chart_data = match &reply.tool_use {
            Some(invocation) if invocation.name == GENERATE_GRAPH_DATA => {
                Some(normalize_chart_data(&invocation.input)?)
            }
            Some(invocation) => {
                if self.tools.get(&invocation.name).is_none() {
                    warn!(tool = %invocation.name, "model invoked a tool that was not declared");
                }
                self.handlers.route(invocation).await?;
                None
            }
            None => None,
        };

        Ok(NormalizedResponse {
            content: reply.text.unwrap_or_default(),
            has_tool_use: reply.has_tool_use,
            tool_use: reply.tool_use,
            chart_data,
        })
    }
}
