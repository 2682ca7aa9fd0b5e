//! STDIO transport.
//!
//! One MCP session over the process's stdin and stdout. The binary sends its
//! logs to stderr, so stdout carries nothing but protocol frames.

use rmcp::ServiceExt;
use tracing::{debug, info};

use super::{TransportError, TransportResult};
use crate::core::McpServer;

pub struct StdioTransport;

impl StdioTransport {
    /// Serve a single session. Returns once the client closes stdin.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        let prompts = server.prompts().len();

        let session = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(TransportError::handshake)?;
        info!("STDIO session open, serving {} prompts", prompts);

        let reason = session.waiting().await?;
        debug!("STDIO session closed: {:?}", reason);
        Ok(())
    }
}
