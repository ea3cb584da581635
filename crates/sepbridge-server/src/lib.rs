//! SEP2 Bridge Server
//!
//! The outer protocol shim: a line-oriented JSON-RPC server exposing the
//! tool and prompt registries over stdio.

pub mod prompts;
pub mod rpc;

pub use prompts::{PromptDefinition, PromptRegistry};
pub use rpc::{error_codes, Request, Response, RpcError, RpcServer, PROTOCOL_VERSION};
