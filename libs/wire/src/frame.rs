use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::{Error, Result};

/// Frame terminator bytes.
///
/// The protocol trusts the peer never to emit these two bytes inside a
/// payload: frames are not length-prefixed and the terminator is not
/// escaped, so a terminator appearing mid-payload desynchronizes the
/// stream.
pub const TERMINATOR: &[u8] = b"\r\n";

/// Accumulates bytes from a stream and splits them into frames.
///
/// A single read is not guaranteed to return a whole frame (TCP is a byte
/// stream, not a message stream), so bytes are buffered until the
/// terminator is observed. Bytes past the terminator are retained for the
/// next frame.
#[derive(Debug, Default)]
pub struct FrameBuffer {
    buf: Vec<u8>,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read from `reader` until one complete frame is buffered, then return
    /// its payload with the terminator stripped.
    ///
    /// Fails with [`Error::ConnectionClosed`] if the stream ends before a
    /// terminator is observed.
    pub async fn read_frame<R>(&mut self, reader: &mut R) -> Result<Vec<u8>>
    where
        R: AsyncRead + Unpin,
    {
        loop {
            if let Some(frame) = self.take_frame() {
                return Ok(frame);
            }

            let mut chunk = [0u8; 256];
            let n = reader.read(&mut chunk).await?;
            if n == 0 {
                return Err(Error::ConnectionClosed);
            }
            self.buf.extend_from_slice(&chunk[..n]);
        }
    }

    /// Split off the first buffered frame, if a terminator is present.
    fn take_frame(&mut self) -> Option<Vec<u8>> {
        let at = self
            .buf
            .windows(TERMINATOR.len())
            .position(|window| window == TERMINATOR)?;

        let mut frame: Vec<u8> = self.buf.drain(..at + TERMINATOR.len()).collect();
        frame.truncate(at);
        Some(frame)
    }
}
