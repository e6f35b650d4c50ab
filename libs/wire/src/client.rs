use std::net::SocketAddr;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::codec::{Codec, JsonCodec};
use crate::error::{Error, Result};
use crate::transport::{TcpTransport, Transport};

/// Interface to whatever owns the node process on the far end.
///
/// The client never starts, stops, or reaps the node itself; it only needs
/// the RPC port to connect to, and a way to report that the node has been
/// asked to shut down.
pub trait NodeLifecycle: Send {
    /// Port the node's RPC listener is bound to
    fn rpc_port(&self) -> u16;

    /// Called after the quit frame has been sent, so the owner can await
    /// process exit
    fn notify_stopped(&mut self);
}

/// A single call: module, method, and positional arguments
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    module: String,
    method: String,
    args: Vec<Value>,
}

impl Request {
    /// Build a request; `module` and `method` must be non-empty
    pub fn new(
        module: impl Into<String>,
        method: impl Into<String>,
        args: Vec<Value>,
    ) -> Result<Self> {
        let module = module.into();
        let method = method.into();
        if module.is_empty() {
            return Err(Error::InvalidRequest("module must be non-empty".into()));
        }
        if method.is_empty() {
            return Err(Error::InvalidRequest("method must be non-empty".into()));
        }
        Ok(Self {
            module,
            method,
            args,
        })
    }

    /// The fixed shutdown call understood by the node
    fn quit() -> Self {
        Self {
            module: "system".into(),
            method: "quit".into(),
            args: Vec::new(),
        }
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }
}

/// Client for the node's call/response protocol
///
/// Owns one connection. Calls are strictly paired: exactly one frame is
/// written and exactly one is read per call, with no retries and no
/// deadline. The connection is single-use; once closed it is never
/// reopened.
pub struct Client<C = JsonCodec> {
    transport: Box<dyn Transport>,
    codec: C,
    node: Option<Box<dyn NodeLifecycle>>,
}

impl Client<JsonCodec> {
    /// Connect to a node's RPC listener at `addr`
    pub async fn connect(addr: SocketAddr) -> Result<Self> {
        let transport = TcpTransport::connect(addr).await?;
        Ok(Self::from_transport(transport, JsonCodec))
    }

    /// Connect to the loopback port advertised by `node`, keeping the
    /// lifecycle handle so [`Client::quit`] can notify it
    pub async fn attach(node: impl NodeLifecycle + 'static) -> Result<Self> {
        let transport = TcpTransport::connect_local(node.rpc_port()).await?;
        let mut client = Self::from_transport(transport, JsonCodec);
        client.node = Some(Box::new(node));
        Ok(client)
    }
}

impl<C: Codec> Client<C> {
    /// Create a client from an existing transport
    pub fn from_transport(transport: impl Transport + 'static, codec: C) -> Self {
        Self {
            transport: Box::new(transport),
            codec,
            node: None,
        }
    }

    /// Perform one call and return the node's result fields
    ///
    /// A response carrying an `error` key fails with [`Error::Remote`] even
    /// if other keys are present; any other well-formed object, including
    /// an empty one, is a success.
    pub async fn call(
        &mut self,
        module: &str,
        method: &str,
        args: Vec<Value>,
    ) -> Result<Map<String, Value>> {
        let request = Request::new(module, method, args)?;
        self.send_request(&request).await?;

        let frame = self.transport.receive().await?;
        let mut response: Map<String, Value> = self.codec.decode(&frame)?;

        if let Some(error) = response.remove("error") {
            debug!(module, method, %error, "node rejected call");
            return Err(Error::Remote(error));
        }
        Ok(response)
    }

    /// Ask the node to shut down
    ///
    /// Sends the fixed `system.quit` call and never reads a response: the
    /// node may exit without producing a frame, and a read here could block
    /// forever. An attached [`NodeLifecycle`] is notified so the owner can
    /// reap the process.
    pub async fn quit(mut self) -> Result<()> {
        let request = Request::quit();
        self.send_request(&request).await?;
        debug!("quit frame sent");

        if let Some(node) = self.node.as_mut() {
            node.notify_stopped();
        }

        // Best-effort: the node may already have torn the connection down.
        let _ = self.transport.close().await;
        Ok(())
    }

    /// Close the connection without the quit handshake
    pub async fn close(mut self) -> Result<()> {
        self.transport.close().await
    }

    async fn send_request(&mut self, request: &Request) -> Result<()> {
        let bytes = self.codec.encode(request)?;
        self.transport.send(&bytes).await
    }
}
