use std::net::SocketAddr;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The TCP connection could not be established.
    #[error("connection to {addr} failed: {source}")]
    Connection {
        addr: SocketAddr,
        source: std::io::Error,
    },

    /// The socket failed while writing or reading a frame.
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// The peer closed the connection before a full frame arrived.
    #[error("connection closed mid-frame")]
    ConnectionClosed,

    /// A complete frame arrived but was not the JSON the protocol expects.
    #[error("malformed frame: {0}")]
    Protocol(#[from] serde_json::Error),

    /// The node answered with an explicit error payload. The connection
    /// remains usable; this is a normal call outcome.
    #[error("node error: {0}")]
    Remote(serde_json::Value),

    /// The request was rejected locally before any bytes were written.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("{0}")]
    Custom(String),
}

impl Error {
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
