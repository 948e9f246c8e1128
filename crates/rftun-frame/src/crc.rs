//! Payload integrity checksum.
//!
//! The host stack's link layer uses CRC-16 with the reflected 0x1021
//! polynomial, seed 0 and no final XOR (CRC-16/KERMIT). Check value over
//! `"123456789"` is `0x2189`.

use crc::{Crc, CRC_16_KERMIT};

const CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_KERMIT);

/// Compute the CRC-16 over a frame payload.
///
/// The interface id byte is never included in the checksum.
pub fn payload_checksum(payload: &[u8]) -> u16 {
    CRC16.checksum(payload)
}
