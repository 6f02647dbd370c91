//! Tool-calling agents for the pipeline stages.
//!
//! Each stage that needs external data runs a bounded LLM loop with a
//! restricted tool set: the researcher can search the web, the writer can
//! read pages.

mod runner;
mod tools;

pub use runner::{AgentResponse, StageAgent, ToolCallRecord};
pub use tools::{parse_tool_call, tool_definitions, ToolCall, ToolContext, ToolSet};
