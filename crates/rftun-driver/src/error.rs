use rftun_frame::FrameError;
use rftun_transport::TransportError;

/// Errors that can occur in driver control operations.
///
/// The data path never produces these: malformed frames and transport
/// would-block conditions degrade to "nothing happened this tick".
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    /// A channel transport operation failed.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// A frame could not be encoded.
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),
}

pub type Result<T> = std::result::Result<T, DriverError>;
