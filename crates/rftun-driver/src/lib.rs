//! Emulated radio driver for a poll-driven network stack.
//!
//! Instead of real RF hardware, link-layer frames are tunneled over a pair
//! of datagram channels: an outbound broadcast channel and an inbound
//! collection channel. The host stack drives the driver through the fixed
//! [`RadioDriver`] operation table; received frames reach the stack through
//! the [`PacketSink`] upcall, fed by the periodic [`RxPump`] ingestion loop.
//!
//! The transmit path is synchronous and fire-and-forget. The receive path is
//! tick-driven: each tick pulls at most one frame off the inbound channel,
//! validates it, and delivers it. Malformed frames are noise, not faults —
//! they are discarded without surfacing an error anywhere.

pub mod config;
pub mod error;
pub mod pump;
pub mod radio;
pub mod tunnel;

#[cfg(test)]
pub(crate) mod fakes;

pub use config::{RadioConfig, DEFAULT_COLLECT_PORT, DEFAULT_PUBLISH_PORT, DEFAULT_SUBSCRIBER_PORT};
pub use error::{DriverError, Result};
pub use pump::{PacketSink, RxPump};
pub use radio::{Param, ParamError, ParamResult, RadioDriver, RadioValue, Received, TxStatus};
pub use tunnel::TunnelRadio;
