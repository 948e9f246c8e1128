//! In-memory channel fakes shared by the driver and pump tests.

use std::collections::VecDeque;
use std::time::Duration;

use rftun_transport::{FrameSink, FrameSource, Result, SendOutcome, TransportError};

/// Captures every sent frame; can be saturated to refuse with `WouldBlock`.
#[derive(Default)]
pub struct VecSink {
    pub frames: Vec<Vec<u8>>,
    saturated: bool,
    closed: bool,
}

impl VecSink {
    pub fn saturated() -> Self {
        Self {
            saturated: true,
            ..Self::default()
        }
    }
}

impl FrameSink for VecSink {
    fn send_frame(&mut self, frame: &[u8]) -> Result<SendOutcome> {
        if self.closed {
            return Err(TransportError::Closed);
        }
        if self.saturated {
            return Ok(SendOutcome::WouldBlock);
        }
        self.frames.push(frame.to_vec());
        Ok(SendOutcome::Sent)
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}

/// Hands out queued frames one `try_recv` at a time.
#[derive(Default)]
pub struct QueueSource {
    queue: VecDeque<Vec<u8>>,
    closed: bool,
}

impl QueueSource {
    pub fn push(&mut self, frame: Vec<u8>) {
        self.queue.push_back(frame);
    }
}

impl FrameSource for QueueSource {
    fn try_recv(&mut self, max_len: usize) -> Result<Option<Vec<u8>>> {
        if self.closed {
            return Err(TransportError::Closed);
        }
        Ok(self.queue.pop_front().map(|mut frame| {
            frame.truncate(max_len);
            frame
        }))
    }

    fn poll(&mut self, _timeout: Duration) -> Result<bool> {
        if self.closed {
            return Err(TransportError::Closed);
        }
        Ok(!self.queue.is_empty())
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}
