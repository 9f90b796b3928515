//! These models represent the objects passed through the analysis pipeline
//!
//! There are a few related formats we need to interact with:
//! - chat requests, sent from the interface to the server
//! - anthropic messages/tools, sent from the server to the generation service
//! - chart specifications, sent from the server back to the interface for rendering
//!
//! Message content blocks use the generation service's wire shape directly, so
//! conversation history passes through without conversion.
pub mod chart;
pub mod content;
pub mod message;
pub mod request;
pub mod response;
pub mod role;
pub mod tool;
