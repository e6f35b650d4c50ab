//! Nodelink Wire - client transport for the node call protocol
//!
//! Drives a remote node process over one TCP connection carrying
//! `\r\n`-terminated JSON frames, one strictly paired request/response at a
//! time. Typically used from a test harness that owns the node process.
//!
//! # Example
//!
//! ```no_run
//! use nodelink_wire::Client;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let addr = "127.0.0.1:5133".parse()?;
//! let mut client = Client::connect(addr).await?;
//!
//! let result = client.call("math", "add", vec![json!(2), json!(3)]).await?;
//! assert_eq!(result["result"], json!(5));
//!
//! client.quit().await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod codec;
pub mod error;
pub mod frame;
pub mod request;
pub mod transport;

// Re-exports for convenience
pub use client::{Client, NodeLifecycle, Request};
pub use error::{Error, Result};
