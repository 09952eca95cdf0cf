use std::net::SocketAddr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServeError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("server stopped: {0}")]
    Serve(#[source] std::io::Error),
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Serve(#[from] ServeError),

    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to render report: {0}")]
    Render(#[from] std::fmt::Error),
}
