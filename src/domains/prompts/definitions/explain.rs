//! Explain prompt definition.

use rmcp::model::PromptArgument;

use super::{PromptDefinition, optional, required};
use crate::domains::prompts::{PromptArguments, RenderOutput};

/// Ask for an explanation of a concept.
pub struct ExplainPrompt;

impl PromptDefinition for ExplainPrompt {
    const NAME: &'static str = "explain";
    const DESCRIPTION: &'static str = "Ask for an explanation of a concept";

    fn arguments() -> Vec<PromptArgument> {
        vec![
            required("topic", "The topic to explain"),
            optional(
                "level",
                "The expertise level: beginner, intermediate, or advanced",
            ),
        ]
    }

    fn render(arguments: PromptArguments) -> anyhow::Result<RenderOutput> {
        let topic = arguments.require_str("topic")?;
        let audience = match arguments.get_str("level") {
            Some(level) if !level.is_empty() => format!(" for someone with {level} knowledge"),
            _ => String::new(),
        };

        Ok(RenderOutput::Text(format!(
            "Please explain {topic}{audience}.\n\n\
             Provide:\n\
             1. A clear definition\n\
             2. Key concepts\n\
             3. Practical examples\n\
             4. Common use cases"
        )))
    }
}
