//! Prompts domain module.
//!
//! Prompts are named templates that render to chat messages given runtime
//! arguments. Each prompt wraps a backing function; the manager keeps one
//! prompt per name and validates arguments before invoking it.
//!
//! ## Architecture
//!
//! - `prompt.rs` - The immutable `Prompt` value and its render contract
//! - `function.rs` - Wrapping sync/async functions as prompt handlers
//! - `arguments.rs` - Runtime argument values
//! - `output.rs` - Normalizing function output into messages
//! - `manager.rs` - Registration, lookup and rendering by name
//! - `definitions/` - Built-in prompts (one file per prompt)
//! - `registry.rs` - Registration of the built-in prompts
//!
//! ## Example
//!
//! ```rust
//! use prompt_registry_server::domains::prompts::{
//!     PromptArguments, PromptFunction, PromptManager,
//! };
//!
//! fn greet(arguments: PromptArguments) -> anyhow::Result<String> {
//!     Ok(format!("Hello, {}!", arguments.require_str("name")?))
//! }
//!
//! # tokio_test::block_on(async {
//! let mut manager = PromptManager::default();
//! let function = PromptFunction::from_fn(greet).required_arg("name", "Who to greet");
//! manager.add_function(function, None, None).unwrap();
//!
//! let arguments = PromptArguments::new().with("name", "Alice");
//! let messages = manager.render_prompt("greet", Some(arguments)).await.unwrap();
//! assert_eq!(messages.len(), 1);
//! # });
//! ```

mod arguments;
pub mod definitions;
mod error;
mod function;
mod manager;
mod output;
mod prompt;
mod registry;

pub use arguments::PromptArguments;
pub use definitions::PromptDefinition;
pub use error::PromptError;
pub use function::{PromptFunction, PromptHandler};
pub use manager::{AddPrompt, PromptManager};
pub use output::{RenderOutput, assistant_message, user_message};
pub use prompt::Prompt;
pub use registry::{prompt_names, register_builtin_prompts};
