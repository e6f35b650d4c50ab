use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::frame::{FrameBuffer, TERMINATOR};
use crate::transport::Transport;

/// TCP transport with terminator framing
///
/// Each frame is a payload followed by the two-byte `\r\n` terminator.
#[derive(Debug)]
pub struct TcpTransport {
    stream: TcpStream,
    frames: FrameBuffer,
}

impl TcpTransport {
    /// Connect to a remote TCP address
    pub async fn connect(addr: SocketAddr) -> Result<Self> {
        Self::builder().address(addr).connect().await
    }

    /// Connect to a port on the loopback interface
    pub async fn connect_local(port: u16) -> Result<Self> {
        Self::builder().port(port).connect().await
    }

    /// Create a builder for configuring the transport
    pub fn builder() -> TcpTransportBuilder {
        TcpTransportBuilder::new()
    }

    /// Create from an existing TcpStream
    pub fn from_stream(stream: TcpStream) -> Self {
        Self {
            stream,
            frames: FrameBuffer::new(),
        }
    }

    /// Get the remote address of this connection
    pub fn peer_addr(&self) -> Result<SocketAddr> {
        self.stream.peer_addr().map_err(Into::into)
    }

    /// Get the local address of this connection
    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.stream.local_addr().map_err(Into::into)
    }
}

#[async_trait::async_trait]
impl Transport for TcpTransport {
    async fn send(&mut self, bytes: &[u8]) -> Result<()> {
        self.stream.write_all(bytes).await?;
        self.stream.write_all(TERMINATOR).await?;
        self.stream.flush().await?;

        trace!(len = bytes.len(), "frame sent");
        Ok(())
    }

    async fn receive(&mut self) -> Result<Vec<u8>> {
        let frame = self.frames.read_frame(&mut self.stream).await?;

        trace!(len = frame.len(), "frame received");
        Ok(frame)
    }

    async fn close(&mut self) -> Result<()> {
        self.stream.shutdown().await?;
        Ok(())
    }
}

/// Builder for configuring TCP transport
pub struct TcpTransportBuilder {
    host: IpAddr,
    port: Option<u16>,
    connect_timeout: Option<Duration>,
}

impl TcpTransportBuilder {
    /// Create a new builder targeting the loopback interface
    pub fn new() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: None,
            connect_timeout: None,
        }
    }

    /// Set the host to connect to (defaults to loopback)
    pub fn host(mut self, host: IpAddr) -> Self {
        self.host = host;
        self
    }

    /// Set the port to connect to
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set host and port from a full address
    pub fn address(mut self, addr: SocketAddr) -> Self {
        self.host = addr.ip();
        self.port = Some(addr.port());
        self
    }

    /// Set the connection timeout
    ///
    /// Applies to establishing the connection only; reads and writes have
    /// no deadline, callers impose their own externally.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Connect with the configured settings
    pub async fn connect(self) -> Result<TcpTransport> {
        let port = self
            .port
            .ok_or_else(|| Error::custom("port not set"))?;
        let addr = SocketAddr::new(self.host, port);

        let connect_op = TcpStream::connect(addr);

        let stream = if let Some(timeout) = self.connect_timeout {
            tokio::time::timeout(timeout, connect_op)
                .await
                .map_err(|_| Error::Connection {
                    addr,
                    source: std::io::Error::new(
                        std::io::ErrorKind::TimedOut,
                        "connect timeout exceeded",
                    ),
                })?
                .map_err(|source| Error::Connection { addr, source })?
        } else {
            connect_op
                .await
                .map_err(|source| Error::Connection { addr, source })?
        };

        debug!(%addr, "connected");
        Ok(TcpTransport::from_stream(stream))
    }
}

impl Default for TcpTransportBuilder {
    fn default() -> Self {
        Self::new()
    }
}
