//! The prompt value object.
//!
//! A [`Prompt`] is immutable once built: a name, a description, an ordered
//! argument schema and the backing function. Rendering validates the supplied
//! arguments against the schema, invokes the function and normalizes whatever
//! it returned into chat messages.

use rmcp::model::{PromptArgument, PromptMessage};
use std::sync::Arc;
use tracing::debug;

use super::arguments::PromptArguments;
use super::definitions::PromptDefinition;
use super::error::PromptError;
use super::function::{PromptFunction, PromptHandler};
use super::output::RenderOutput;

/// A named, described template that renders to chat messages.
#[derive(Clone)]
pub struct Prompt {
    name: String,
    title: Option<String>,
    description: String,
    arguments: Vec<PromptArgument>,
    handler: Arc<dyn PromptHandler>,
}

impl Prompt {
    /// Create a prompt from its parts.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        arguments: Vec<PromptArgument>,
        handler: impl PromptHandler + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            title: None,
            description: description.into(),
            arguments,
            handler: Arc::new(handler),
        }
    }

    /// Build a prompt from a function, with optional name and description
    /// overrides.
    ///
    /// Fails with [`PromptError::InvalidArguments`] when no name is given and
    /// none can be derived (closures).
    pub fn from_function(
        function: PromptFunction,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<Self, PromptError> {
        let name = name
            .map(str::to_string)
            .or(function.name)
            .ok_or_else(|| {
                PromptError::invalid_arguments(
                    "a name is required when registering a closure as a prompt",
                )
            })?;

        let description = description
            .map(str::to_string)
            .or(function.description)
            .unwrap_or_default();

        Ok(Self {
            name,
            title: function.title,
            description,
            arguments: function.arguments,
            handler: function.handler,
        })
    }

    /// Build a prompt from a statically declared definition.
    pub fn from_definition<P: PromptDefinition + 'static>() -> Self {
        let function = PromptFunction::from_fn(P::render);

        Self {
            name: P::NAME.to_string(),
            title: P::TITLE.map(str::to_string),
            description: P::DESCRIPTION.to_string(),
            arguments: P::arguments(),
            handler: function.handler,
        }
    }

    /// Set a display title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn arguments(&self) -> &[PromptArgument] {
        &self.arguments
    }

    /// Names of the arguments that must be supplied, in schema order.
    pub fn required_arguments(&self) -> impl Iterator<Item = &str> {
        self.arguments
            .iter()
            .filter(|arg| arg.required.unwrap_or(false))
            .map(|arg| arg.name.as_str())
    }

    /// Render the prompt with the given arguments.
    ///
    /// `None` and an empty argument set are treated the same: both fail if the
    /// schema has any required argument.
    pub async fn render(
        &self,
        arguments: Option<PromptArguments>,
    ) -> Result<Vec<PromptMessage>, PromptError> {
        let arguments = arguments.unwrap_or_default();

        let missing: Vec<&str> = self
            .required_arguments()
            .filter(|name| !arguments.contains(name))
            .collect();
        if !missing.is_empty() {
            return Err(PromptError::missing_arguments(missing));
        }

        debug!(prompt = %self.name, arguments = arguments.len(), "Rendering prompt");

        let output: RenderOutput = self
            .handler
            .call(arguments)
            .await
            .map_err(|e| PromptError::render_failure(&self.name, e))?;

        Ok(output.into_messages())
    }

    /// The wire representation advertised to MCP clients.
    pub fn to_model(&self) -> rmcp::model::Prompt {
        let description = (!self.description.is_empty()).then(|| self.description.clone());

        let mut model =
            rmcp::model::Prompt::new(self.name.clone(), description, Some(self.arguments.clone()));
        model.title = self.title.clone();
        model
    }
}

impl std::fmt::Debug for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Prompt")
            .field("name", &self.name)
            .field("title", &self.title)
            .field("description", &self.description)
            .field("arguments", &self.arguments)
            .finish_non_exhaustive()
    }
}

/// Prompts compare by metadata and by the identity of their backing function.
impl PartialEq for Prompt {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.title == other.title
            && self.description == other.description
            && self.arguments == other.arguments
            && Arc::ptr_eq(&self.handler, &other.handler)
    }
}
