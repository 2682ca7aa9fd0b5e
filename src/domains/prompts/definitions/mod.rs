//! Built-in prompt definitions.
//!
//! Each prompt lives in its own file and implements [`PromptDefinition`]:
//! metadata plus a `render` function that turns arguments into messages.
//!
//! ## Adding a New Prompt
//!
//! 1. Create a new file (e.g., `my_prompt.rs`)
//! 2. Implement the `PromptDefinition` trait
//! 3. Export it here
//! 4. Register in `registry.rs`

mod code_review;
mod explain;
mod greeting;
mod summarize;

pub use code_review::CodeReviewPrompt;
pub use explain::ExplainPrompt;
pub use greeting::GreetingPrompt;
pub use summarize::SummarizePrompt;

use rmcp::model::PromptArgument;

use super::arguments::PromptArguments;
use super::output::RenderOutput;

/// Trait for statically declared prompts.
pub trait PromptDefinition {
    /// The unique name of the prompt.
    const NAME: &'static str;

    /// A description of what the prompt does.
    const DESCRIPTION: &'static str;

    /// An optional display title.
    const TITLE: Option<&'static str> = None;

    /// The arguments this prompt accepts.
    fn arguments() -> Vec<PromptArgument>;

    /// Produce the prompt's messages.
    ///
    /// Required arguments are validated before this is called.
    fn render(arguments: PromptArguments) -> anyhow::Result<RenderOutput>;
}

pub(crate) fn required(name: &str, description: &str) -> PromptArgument {
    argument(name, description, true)
}

pub(crate) fn optional(name: &str, description: &str) -> PromptArgument {
    argument(name, description, false)
}

fn argument(name: &str, description: &str, required: bool) -> PromptArgument {
    PromptArgument {
        name: name.to_string(),
        title: None,
        description: Some(description.to_string()),
        required: Some(required),
    }
}
