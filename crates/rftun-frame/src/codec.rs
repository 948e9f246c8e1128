use bytes::{BufMut, Bytes, BytesMut};

use crate::crc::payload_checksum;
use crate::error::{FrameError, Result};

/// Frame overhead: interface id (1) + checksum (2) = 3 bytes.
pub const OVERHEAD: usize = 3;

/// Maximum payload size: the host stack's packet buffer size.
pub const MAX_PAYLOAD: usize = 128;

/// Maximum wire size of a single frame.
pub const MAX_FRAME: usize = MAX_PAYLOAD + OVERHEAD;

/// A framed link-layer packet with sub-interface routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// The logical sub-interface this packet belongs to.
    pub interface_id: u8,
    /// The link-layer payload.
    pub payload: Bytes,
}

impl Frame {
    /// Create a new frame.
    pub fn new(interface_id: u8, payload: impl Into<Bytes>) -> Self {
        Self {
            interface_id,
            payload: payload.into(),
        }
    }

    /// The total wire size of this frame (payload + overhead).
    pub fn wire_size(&self) -> usize {
        OVERHEAD + self.payload.len()
    }
}

/// Encode a frame into the wire format.
///
/// Wire format:
/// ```text
/// ┌───────────────┬──────────────────┬──────────────────────┐
/// │ Interface id  │ Payload          │ CRC-16 (2B)          │
/// │ (1B)          │ (0..=128 bytes)  │ low byte, high byte  │
/// └───────────────┴──────────────────┴──────────────────────┘
/// ```
///
/// The checksum covers the payload only, never the interface id, and is
/// serialized low byte first. Payloads over [`MAX_PAYLOAD`] are rejected
/// rather than truncated, so every encoded frame decodes back to its input.
pub fn encode_frame(interface_id: u8, payload: &[u8], dst: &mut BytesMut) -> Result<()> {
    if payload.len() > MAX_PAYLOAD {
        return Err(FrameError::PayloadTooLarge {
            size: payload.len(),
            max: MAX_PAYLOAD,
        });
    }
    dst.reserve(OVERHEAD + payload.len());
    dst.put_u8(interface_id);
    dst.put_slice(payload);
    dst.put_u16_le(payload_checksum(payload));
    Ok(())
}

/// Decode and validate one whole wire frame.
///
/// Anything shorter than [`OVERHEAD`] bytes cannot be a frame; the 3-byte
/// frame (empty payload) is degenerate but valid.
pub fn decode_frame(wire: &[u8]) -> Result<Frame> {
    if wire.len() < OVERHEAD {
        return Err(FrameError::Truncated { len: wire.len() });
    }

    let payload = &wire[1..wire.len() - 2];
    if payload.len() > MAX_PAYLOAD {
        return Err(FrameError::PayloadTooLarge {
            size: payload.len(),
            max: MAX_PAYLOAD,
        });
    }

    let found = u16::from_le_bytes([wire[wire.len() - 2], wire[wire.len() - 1]]);
    let expected = payload_checksum(payload);
    if found != expected {
        return Err(FrameError::ChecksumMismatch { expected, found });
    }

    Ok(Frame {
        interface_id: wire[0],
        payload: Bytes::copy_from_slice(payload),
    })
}
