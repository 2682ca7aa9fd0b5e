//! Prompt Registry - registration of the built-in prompts.
//!
//! When adding a new prompt:
//! 1. Create the prompt file in `definitions/`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it here in `register_builtin_prompts()`

use super::definitions::{
    CodeReviewPrompt, ExplainPrompt, GreetingPrompt, PromptDefinition, SummarizePrompt,
};
use super::manager::PromptManager;
use super::prompt::Prompt;

/// Register every built-in prompt into `manager`.
///
/// Names already taken in the manager keep their existing prompt.
pub fn register_builtin_prompts(manager: &mut PromptManager) {
    manager.add(Prompt::from_definition::<GreetingPrompt>());
    manager.add(Prompt::from_definition::<CodeReviewPrompt>());
    manager.add(Prompt::from_definition::<ExplainPrompt>());
    manager.add(Prompt::from_definition::<SummarizePrompt>());
}

/// Get the list of all built-in prompt names.
pub fn prompt_names() -> Vec<&'static str> {
    vec![
        GreetingPrompt::NAME,
        CodeReviewPrompt::NAME,
        ExplainPrompt::NAME,
        SummarizePrompt::NAME,
    ]
}
