//! Summarize prompt definition.

use rmcp::model::PromptArgument;

use super::{PromptDefinition, optional, required};
use crate::domains::prompts::{PromptArguments, RenderOutput};

/// Summarize text or content.
pub struct SummarizePrompt;

impl PromptDefinition for SummarizePrompt {
    const NAME: &'static str = "summarize";
    const DESCRIPTION: &'static str = "Summarize text or content";

    fn arguments() -> Vec<PromptArgument> {
        vec![
            required("content", "The content to summarize"),
            optional("length", "Desired length: brief, medium, or detailed"),
        ]
    }

    fn render(arguments: PromptArguments) -> anyhow::Result<RenderOutput> {
        let content = arguments.require_str("content")?;
        let length = arguments.str_or("length", "medium");

        Ok(RenderOutput::Text(format!(
            "Please summarize the following content ({length} summary):\n\n{content}"
        )))
    }
}
