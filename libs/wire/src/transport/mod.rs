use crate::error::Result;

pub mod tcp;

pub use self::tcp::{TcpTransport, TcpTransportBuilder};

/// Transport trait for sending and receiving frame payloads
///
/// Each transport instance represents a single connection carrying at most
/// one outstanding request; callers sharing a transport must serialize
/// access themselves.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Send one frame's payload over the transport
    async fn send(&mut self, bytes: &[u8]) -> Result<()>;

    /// Receive the next frame's payload from the transport
    async fn receive(&mut self) -> Result<Vec<u8>>;

    /// Close the transport connection
    async fn close(&mut self) -> Result<()>;
}
