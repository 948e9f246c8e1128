use std::time::Duration;

use bytes::BytesMut;
use rftun_frame::{decode_frame, encode_frame, FrameError, MAX_FRAME, MAX_PAYLOAD};
use rftun_transport::{
    FrameSink, FrameSource, SendOutcome, UdpCollector, UdpPublisher,
};
use tracing::{debug, info, trace};

use crate::config::RadioConfig;
use crate::error::Result;
use crate::radio::{Param, ParamError, ParamResult, RadioDriver, RadioValue, Received, TxStatus};

/// Radio driver tunneling frames over a broadcast/collection channel pair.
///
/// Generic over the channel halves so tests can substitute in-memory
/// channels; production code uses [`TunnelRadio::open`] to get the UDP pair.
pub struct TunnelRadio<S, R> {
    sink: S,
    source: R,
    staged: BytesMut,
    staged_iface: u8,
}

impl TunnelRadio<UdpPublisher, UdpCollector> {
    /// Bind both channels described by `config` and build the driver.
    ///
    /// A bind failure is a real error, not a degraded success: a radio whose
    /// channels never came up would otherwise sit silently deaf forever.
    pub fn open(config: &RadioConfig) -> Result<Self> {
        let sink = UdpPublisher::bind(config.publish_endpoint, config.subscriber_endpoint)?;
        let source = UdpCollector::bind(config.collect_endpoint)?;
        Ok(Self::new(sink, source))
    }
}

impl<S: FrameSink, R: FrameSource> TunnelRadio<S, R> {
    /// Build a driver from already-bound channel halves.
    pub fn new(sink: S, source: R) -> Self {
        Self {
            sink,
            source,
            staged: BytesMut::with_capacity(MAX_PAYLOAD),
            staged_iface: 0,
        }
    }

    /// Borrow the outbound channel.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Borrow the inbound channel.
    pub fn source_mut(&mut self) -> &mut R {
        &mut self.source
    }
}

impl<S: FrameSink, R: FrameSource> RadioDriver for TunnelRadio<S, R> {
    fn init(&mut self) -> Result<()> {
        info!("tunnel radio initialized");
        Ok(())
    }

    fn prepare(&mut self, interface_id: u8, payload: &[u8]) -> Result<()> {
        if payload.len() > MAX_PAYLOAD {
            return Err(FrameError::PayloadTooLarge {
                size: payload.len(),
                max: MAX_PAYLOAD,
            }
            .into());
        }
        self.staged.clear();
        self.staged.extend_from_slice(payload);
        self.staged_iface = interface_id;
        trace!(len = payload.len(), interface_id, "payload staged");
        Ok(())
    }

    fn transmit(&mut self, len: usize) -> TxStatus {
        let len = len.min(self.staged.len());
        let mut wire = BytesMut::with_capacity(MAX_FRAME);
        if let Err(err) = encode_frame(self.staged_iface, &self.staged[..len], &mut wire) {
            debug!(%err, "staged payload refused by codec");
            return TxStatus::Error;
        }

        // Fire-and-forget: a full or closed channel is indistinguishable
        // from a peer that dropped the frame in flight.
        match self.sink.send_frame(&wire) {
            Ok(SendOutcome::Sent) => trace!(bytes = wire.len(), "frame transmitted"),
            Ok(SendOutcome::WouldBlock) => debug!("outbound channel full, frame dropped"),
            Err(err) => debug!(%err, "outbound send failed, frame dropped"),
        }
        TxStatus::Ok
    }

    fn send(&mut self, interface_id: u8, payload: &[u8]) -> TxStatus {
        match self.prepare(interface_id, payload) {
            Ok(()) => self.transmit(payload.len()),
            Err(err) => {
                debug!(%err, "send rejected payload");
                TxStatus::Error
            }
        }
    }

    fn read(&mut self, buf: &mut [u8]) -> Option<Received> {
        let wire = match self.source.try_recv(MAX_FRAME) {
            Ok(Some(wire)) => wire,
            Ok(None) => return None,
            Err(err) => {
                debug!(%err, "inbound receive failed, treating as idle");
                return None;
            }
        };

        let frame = match decode_frame(&wire) {
            Ok(frame) => frame,
            Err(err) => {
                debug!(%err, "discarding invalid frame");
                return None;
            }
        };

        if frame.payload.len() > buf.len() {
            debug!(
                len = frame.payload.len(),
                cap = buf.len(),
                "discarding frame larger than receive buffer"
            );
            return None;
        }

        buf[..frame.payload.len()].copy_from_slice(&frame.payload);
        trace!(
            len = frame.payload.len(),
            interface_id = frame.interface_id,
            "frame received"
        );
        Some(Received {
            len: frame.payload.len(),
            interface_id: frame.interface_id,
        })
    }

    fn channel_clear(&mut self) -> bool {
        true
    }

    fn receiving(&mut self) -> bool {
        false
    }

    fn pending(&mut self) -> bool {
        self.source.poll(Duration::ZERO).unwrap_or(false)
    }

    fn on(&mut self) -> Result<()> {
        Ok(())
    }

    fn off(&mut self) -> Result<()> {
        self.sink.close()?;
        self.source.close()?;
        debug!("tunnel radio powered off");
        Ok(())
    }

    fn get_value(&self, _param: Param) -> ParamResult<RadioValue> {
        Err(ParamError::NotSupported)
    }

    fn set_value(&mut self, _param: Param, _value: RadioValue) -> ParamResult<()> {
        Err(ParamError::NotSupported)
    }

    fn get_object(&self, _param: Param, _dest: &mut [u8]) -> ParamResult<()> {
        Err(ParamError::NotSupported)
    }

    fn set_object(&mut self, _param: Param, _src: &[u8]) -> ParamResult<()> {
        Err(ParamError::NotSupported)
    }
}
