//! Link-layer wire framing for the rftun radio tunnel.
//!
//! Every packet crossing the tunnel is framed as:
//! - A 1-byte interface id tagging the logical sub-interface
//! - The raw link-layer payload (up to [`MAX_PAYLOAD`] bytes)
//! - A 2-byte little-endian CRC-16 over the payload
//!
//! Frames are exchanged whole (one frame per datagram), so there is no
//! stream resynchronization concern; validation is purely length + checksum.

pub mod codec;
pub mod crc;
pub mod error;

pub use codec::{decode_frame, encode_frame, Frame, MAX_FRAME, MAX_PAYLOAD, OVERHEAD};
pub use crc::payload_checksum;
pub use error::{FrameError, Result};
