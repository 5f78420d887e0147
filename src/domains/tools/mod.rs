//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are named capabilities that clients discover and call with a prompt.
//!
//! ## Architecture
//!
//! - `tool.rs` - The `Tool` trait every capability implements
//! - `schema.rs` - Declared input contracts and the argument validator
//! - `registry.rs` - Ordered, name-unique registry built once at boot
//! - `invoker.rs` - Validation, dispatch and response shaping
//! - `discovery.rs` - `tools/list` projections of the registry
//! - `content.rs` - The `{content: [...]}` envelope
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `clients/` - HTTP backends the tools call
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` implementing `Tool`
//! 2. Export it in `definitions/mod.rs`
//! 3. Add it to `registry::default_tools`

pub mod clients;
pub mod content;
pub mod definitions;
pub mod discovery;
mod error;
pub mod invoker;
pub mod registry;
pub mod schema;
pub mod tool;

#[cfg(test)]
pub(crate) mod testing;

pub use content::{ContentItem, ToolCallResult};
pub use discovery::{ToolSummary, list_tools, tools_list_json};
pub use error::{HandlerFailure, RegistryError, ValidationError};
pub use invoker::ToolInvoker;
pub use registry::{ToolRegistry, default_tools};
pub use schema::{SchemaSpec, ValidatedArguments, validate};
pub use tool::{Tool, ToolContext};
