/// Errors that can occur while encoding or validating wire frames.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The payload exceeds the link-layer maximum transfer unit.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// The byte sequence is shorter than the minimum frame size.
    #[error("frame truncated ({len} bytes, minimum 3)")]
    Truncated { len: usize },

    /// The received checksum does not match the payload.
    #[error("checksum mismatch (expected {expected:#06x}, found {found:#06x})")]
    ChecksumMismatch { expected: u16, found: u16 },
}

pub type Result<T> = std::result::Result<T, FrameError>;
