use std::time::Duration;

use crate::error::Result;

/// Outcome of a non-blocking send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The frame was handed to the transport.
    Sent,
    /// The transport could not take the frame right now.
    WouldBlock,
}

/// The outbound half of a channel pair.
///
/// Exactly one writer owns a sink; sends are non-blocking and
/// unacknowledged.
pub trait FrameSink {
    /// Send one whole frame without blocking.
    fn send_frame(&mut self, frame: &[u8]) -> Result<SendOutcome>;

    /// Release the channel. Calling `close` more than once is a no-op.
    fn close(&mut self) -> Result<()>;
}

/// The inbound half of a channel pair.
///
/// Exactly one reader owns a source and drains it from a polling loop.
pub trait FrameSource {
    /// Receive one whole frame without blocking, if any is queued.
    ///
    /// `max_len` bounds the returned frame; a longer datagram is truncated
    /// by the transport (and will then fail frame validation upstream).
    fn try_recv(&mut self, max_len: usize) -> Result<Option<Vec<u8>>>;

    /// Check whether a frame is queued, waiting at most `timeout`.
    fn poll(&mut self, timeout: Duration) -> Result<bool>;

    /// Release the channel. Calling `close` more than once is a no-op.
    fn close(&mut self) -> Result<()>;
}
