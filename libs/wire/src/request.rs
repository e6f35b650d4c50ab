use std::net::SocketAddr;

use serde_json::{Map, Value};

use crate::client::Client;
use crate::error::Result;

/// Perform a one-off call
///
/// Opens a connection, performs a single call, and closes the connection.
pub async fn call_tcp(
    addr: SocketAddr,
    module: &str,
    method: &str,
    args: Vec<Value>,
) -> Result<Map<String, Value>> {
    let mut client = Client::connect(addr).await?;
    let response = client.call(module, method, args).await?;
    client.close().await?;
    Ok(response)
}

/// Ask the node at `addr` to shut down, without waiting for a reply
pub async fn quit_tcp(addr: SocketAddr) -> Result<()> {
    let client = Client::connect(addr).await?;
    client.quit().await
}
