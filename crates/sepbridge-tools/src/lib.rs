//! SEP2 Tools Crate
//!
//! Schema-described tools over the SEP2 client, and the registry that
//! gates them on client availability.
//!
//! ## Capabilities
//!
//! - **Tool Trait**: unified interface for tool implementation
//! - **Connection Tools**: status report and connection probe
//! - **Data Tools**: one tool per well-known SEP2 resource, plus
//!   arbitrary endpoints
//! - **Tool Registry**: build-once dispatch table; reduced to the status
//!   tool when no client is configured

pub mod connection_tools;
pub mod data_tools;
pub mod error;
pub mod registry;
pub mod tool;

pub use connection_tools::{StatusTool, TestConnectionTool};
pub use data_tools::{data_tools, CustomEndpointTool};
pub use error::{Result, ToolError};
pub use registry::ToolRegistry;
pub use tool::{
    empty_object_schema, object_schema, string_property, DynTool, TextContent, Tool,
    ToolDefinition, ToolOutput,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
