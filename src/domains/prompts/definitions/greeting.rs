//! Greeting prompt definition.

use rmcp::model::PromptArgument;

use super::{PromptDefinition, optional, required};
use crate::domains::prompts::{PromptArguments, RenderOutput};

/// A customizable greeting prompt.
pub struct GreetingPrompt;

impl PromptDefinition for GreetingPrompt {
    const NAME: &'static str = "greeting";
    const DESCRIPTION: &'static str = "A customizable greeting prompt";

    fn arguments() -> Vec<PromptArgument> {
        vec![
            required("name", "The name to greet"),
            optional(
                "style",
                "The greeting style: formal, casual, or enthusiastic",
            ),
        ]
    }

    fn render(arguments: PromptArguments) -> anyhow::Result<RenderOutput> {
        let name = arguments.require_str("name")?;

        let text = match arguments.get_str("style") {
            Some("formal") => format!("Good day, {name}. It is a pleasure to meet you."),
            Some("enthusiastic") => format!("Hey {name}!!! So great to see you!"),
            _ => format!("Hello, {name}!"),
        };

        Ok(text.into())
    }
}
