//! MCP Server implementation and lifecycle management.
//!
//! The server owns one [`PromptManager`] and exposes it through the MCP
//! `prompts/list` and `prompts/get` requests. All registration happens before
//! the server starts serving; afterwards the manager is shared read-only, so
//! concurrent sessions never race on it.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    model::*,
    service::RequestContext,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::config::Config;
use crate::domains::prompts::{PromptArguments, PromptError, PromptManager, register_builtin_prompts};

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// The prompt registry served to clients.
    prompts: Arc<PromptManager>,
}

impl McpServer {
    /// Create a new MCP server serving the built-in prompts.
    pub fn new(config: Config) -> Self {
        let mut prompts = PromptManager::from_config(&config.prompts);
        register_builtin_prompts(&mut prompts);
        Self::with_prompts(config, prompts)
    }

    /// Create a new MCP server serving an already populated registry.
    pub fn with_prompts(config: Config, prompts: PromptManager) -> Self {
        info!("Serving {} prompts", prompts.len());
        Self {
            config: Arc::new(config),
            prompts: Arc::new(prompts),
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Get the prompt registry.
    pub fn prompts(&self) -> &PromptManager {
        &self.prompts
    }

    /// All registered prompts in their wire representation.
    pub fn list_prompt_models(&self) -> Vec<Prompt> {
        self.prompts
            .list_prompts()
            .iter()
            .map(|prompt| prompt.to_model())
            .collect()
    }

    /// Render a prompt into a `prompts/get` result.
    pub async fn get_prompt_result(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<GetPromptResult, PromptError> {
        let arguments = arguments.map(PromptArguments::from);
        let messages = self.prompts.render_prompt(name, arguments).await?;

        // render_prompt succeeded, so the prompt exists
        let description = self
            .prompts
            .get_prompt(name)
            .map(|prompt| prompt.description().to_string())
            .filter(|description| !description.is_empty());

        Ok(GetPromptResult {
            description,
            messages,
        })
    }
}

/// Map a prompt error onto a JSON-RPC error.
///
/// Caller mistakes become invalid params; failures inside a prompt's backing
/// function become internal errors.
pub fn to_mcp_error(err: PromptError) -> McpError {
    match err {
        PromptError::RenderFailure { .. } => McpError::internal_error(err.to_string(), None),
        PromptError::UnknownPrompt(_)
        | PromptError::MissingArguments(_)
        | PromptError::InvalidArguments(_)
        | PromptError::InvalidArgument(..) => McpError::invalid_params(err.to_string(), None),
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(format!(
                "{} serves reusable prompt templates. List them with prompts/list and \
                 render one with prompts/get.",
                self.name()
            )),
            capabilities: ServerCapabilities::builder().enable_prompts().build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        info!("Listing prompts");
        Ok(ListPromptsResult {
            prompts: self.list_prompt_models(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context), fields(prompt = %request.name))]
    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        info!("Getting prompt: {}", request.name);
        self.get_prompt_result(&request.name, request.arguments)
            .await
            .map_err(|e| {
                warn!("Prompt request failed: {}", e);
                to_mcp_error(e)
            })
    }
}
