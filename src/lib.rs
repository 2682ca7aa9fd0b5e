//! Prompt Registry Server Library
//!
//! An in-process registry of prompt templates backed by user-supplied
//! functions, plus a Model Context Protocol (MCP) server that exposes it.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the MCP server and transports
//! - **domains**: Business logic organized by bounded contexts
//!   - **prompts**: The prompt value object, the registry and built-in prompts
//!
//! # Example
//!
//! ```rust,no_run
//! use prompt_registry_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone());
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use crate::core::{Config, Error, McpServer, Result};
pub use domains::prompts::{Prompt, PromptError, PromptFunction, PromptManager};
