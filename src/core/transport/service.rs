//! Starts whichever transport the configuration names.

use tracing::info;

use super::{TransportConfig, TransportResult};
use crate::core::McpServer;

#[cfg(feature = "stdio")]
use super::stdio::StdioTransport;

#[cfg(feature = "tcp")]
use super::tcp::TcpTransport;

/// Runs an [`McpServer`] over one configured transport.
pub struct TransportService {
    config: TransportConfig,
}

impl TransportService {
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }

    /// The transport [`run`](Self::run) will start.
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Serve until the transport shuts down.
    ///
    /// STDIO returns when the client closes stdin. TCP keeps accepting
    /// connections until the process is stopped.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        info!("Serving {} over {}", server.name(), self.config.description());

        match self.config {
            #[cfg(feature = "stdio")]
            TransportConfig::Stdio => StdioTransport::run(server).await,
            #[cfg(feature = "tcp")]
            TransportConfig::Tcp(tcp) => TcpTransport::new(tcp).run(server).await,
        }
    }
}
