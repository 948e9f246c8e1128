//! Message-queue channel transport for the rftun radio tunnel.
//!
//! The radio driver talks to its peers over a pair of independent channels:
//! an outbound broadcast channel (one writer) and an inbound collection
//! channel (one reader). Each message is one whole wire frame; the transport
//! never splits or merges frames.
//!
//! This is the lowest layer of rftun. The driver is generic over the
//! [`FrameSink`] and [`FrameSource`] traits; [`UdpPublisher`] and
//! [`UdpCollector`] are the shipped implementations over non-blocking UDP
//! datagrams.

pub mod error;
pub mod traits;
pub mod udp;

pub use error::{Result, TransportError};
pub use traits::{FrameSink, FrameSource, SendOutcome};
pub use udp::{UdpCollector, UdpPublisher};
