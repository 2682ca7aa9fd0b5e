//! Code review prompt definition.

use rmcp::model::PromptArgument;

use super::{PromptDefinition, optional, required};
use crate::domains::prompts::{PromptArguments, RenderOutput, assistant_message};

/// A code review prompt.
///
/// Renders the review request as a user message followed by an assistant
/// message that commits the model to the requested focus.
pub struct CodeReviewPrompt;

const DEFAULT_FOCUS: &str = "\
- Code quality and readability
- Potential bugs or issues
- Performance considerations
- Security concerns
- Suggestions for improvement";

impl PromptDefinition for CodeReviewPrompt {
    const NAME: &'static str = "code_review";
    const DESCRIPTION: &'static str = "Request a review of a code snippet";
    const TITLE: Option<&'static str> = Some("Code Review");

    fn arguments() -> Vec<PromptArgument> {
        vec![
            required("language", "The programming language of the code"),
            required("code", "The code to review"),
            optional(
                "focus",
                "Specific areas to focus on (e.g., security, performance)",
            ),
        ]
    }

    fn render(arguments: PromptArguments) -> anyhow::Result<RenderOutput> {
        let language = arguments.require_str("language")?;
        let code = arguments.require_str("code")?;

        let request = format!("Please review the following {language} code:\n\n```{language}\n{code}\n```");

        let (focus_request, reply) = match arguments.get_str("focus") {
            Some(focus) if !focus.is_empty() => (
                format!("Please focus specifically on: {focus}"),
                format!("I'll review this {language} code with a focus on {focus}."),
            ),
            _ => (
                format!("Please provide a comprehensive review covering:\n{DEFAULT_FOCUS}"),
                format!("I'll give this {language} code a comprehensive review."),
            ),
        };

        Ok(RenderOutput::Many(vec![
            format!("{request}\n\n{focus_request}").into(),
            assistant_message(reply).into(),
        ]))
    }
}
