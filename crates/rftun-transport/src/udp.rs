use std::io::ErrorKind;
use std::net::{SocketAddr, UdpSocket};
use std::time::Duration;

use tracing::{debug, info, trace};

use crate::error::{Result, TransportError};
use crate::traits::{FrameSink, FrameSource, SendOutcome};

/// Outbound broadcast channel over UDP datagrams.
///
/// Binds a fixed local endpoint and publishes each frame to a single
/// subscriber endpoint. Sends are non-blocking and unacknowledged; a
/// subscriber that is not listening simply never sees the frame.
pub struct UdpPublisher {
    socket: Option<UdpSocket>,
    subscriber: SocketAddr,
    local: SocketAddr,
}

impl UdpPublisher {
    /// Bind the publish endpoint and aim it at a subscriber.
    pub fn bind(endpoint: SocketAddr, subscriber: SocketAddr) -> Result<Self> {
        let socket = bind_nonblocking(endpoint)?;
        let local = socket.local_addr()?;
        info!(%local, %subscriber, "publish channel bound");
        Ok(Self {
            socket: Some(socket),
            subscriber,
            local,
        })
    }

    /// The local endpoint this channel is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local
    }
}

impl FrameSink for UdpPublisher {
    fn send_frame(&mut self, frame: &[u8]) -> Result<SendOutcome> {
        let socket = self.socket.as_ref().ok_or(TransportError::Closed)?;
        match socket.send_to(frame, self.subscriber) {
            Ok(sent) => {
                trace!(bytes = sent, "frame published");
                Ok(SendOutcome::Sent)
            }
            Err(err) if err.kind() == ErrorKind::WouldBlock => Ok(SendOutcome::WouldBlock),
            Err(err) => Err(TransportError::Io(err)),
        }
    }

    fn close(&mut self) -> Result<()> {
        if self.socket.take().is_some() {
            debug!(local = %self.local, "publish channel closed");
        }
        Ok(())
    }
}

/// Inbound collection channel over UDP datagrams.
///
/// Binds a fixed local endpoint; external peers push whole wire frames to
/// it. Reads are non-blocking and consumed one datagram at a time.
pub struct UdpCollector {
    socket: Option<UdpSocket>,
    local: SocketAddr,
}

impl UdpCollector {
    /// Bind the collection endpoint.
    pub fn bind(endpoint: SocketAddr) -> Result<Self> {
        let socket = bind_nonblocking(endpoint)?;
        let local = socket.local_addr()?;
        info!(%local, "collection channel bound");
        Ok(Self {
            socket: Some(socket),
            local,
        })
    }

    /// The local endpoint this channel is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local
    }
}

impl FrameSource for UdpCollector {
    fn try_recv(&mut self, max_len: usize) -> Result<Option<Vec<u8>>> {
        let socket = self.socket.as_ref().ok_or(TransportError::Closed)?;
        let mut buf = vec![0u8; max_len];
        match socket.recv_from(&mut buf) {
            Ok((received, from)) => {
                trace!(bytes = received, %from, "frame collected");
                buf.truncate(received);
                Ok(Some(buf))
            }
            Err(err) if err.kind() == ErrorKind::WouldBlock => Ok(None),
            Err(err) => Err(TransportError::Io(err)),
        }
    }

    fn poll(&mut self, timeout: Duration) -> Result<bool> {
        let socket = self.socket.as_ref().ok_or(TransportError::Closed)?;
        let mut probe = [0u8; 1];

        if timeout.is_zero() {
            return match socket.peek_from(&mut probe) {
                Ok(_) => Ok(true),
                Err(err) if err.kind() == ErrorKind::WouldBlock => Ok(false),
                Err(err) => Err(TransportError::Io(err)),
            };
        }

        // A read timeout only takes effect on a blocking socket; flip back
        // to non-blocking before returning.
        socket.set_nonblocking(false)?;
        socket.set_read_timeout(Some(timeout))?;
        let ready = match socket.peek_from(&mut probe) {
            Ok(_) => Ok(true),
            Err(err) if matches!(err.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                Ok(false)
            }
            Err(err) => Err(TransportError::Io(err)),
        };
        socket.set_read_timeout(None)?;
        socket.set_nonblocking(true)?;
        ready
    }

    fn close(&mut self) -> Result<()> {
        if self.socket.take().is_some() {
            debug!(local = %self.local, "collection channel closed");
        }
        Ok(())
    }
}

fn bind_nonblocking(endpoint: SocketAddr) -> Result<UdpSocket> {
    let socket = UdpSocket::bind(endpoint).map_err(|source| TransportError::Bind {
        endpoint,
        source,
    })?;
    socket
        .set_nonblocking(true)
        .map_err(|source| TransportError::Bind { endpoint, source })?;
    Ok(socket)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn localhost() -> SocketAddr {
        "127.0.0.1:0".parse().unwrap()
    }

    fn channel_pair() -> (UdpPublisher, UdpCollector) {
        let collector = UdpCollector::bind(localhost()).unwrap();
        let publisher = UdpPublisher::bind(localhost(), collector.local_addr()).unwrap();
        (publisher, collector)
    }

    #[test]
    fn bind_assigns_local_addr() {
        let collector = UdpCollector::bind(localhost()).unwrap();
        assert_ne!(collector.local_addr().port(), 0);
    }

    #[test]
    fn publish_collect_loopback() {
        let (mut publisher, mut collector) = channel_pair();

        let outcome = publisher.send_frame(b"frame").unwrap();
        assert_eq!(outcome, SendOutcome::Sent);

        let frame = wait_for_frame(&mut collector);
        assert_eq!(frame, b"frame");
    }

    #[test]
    fn try_recv_empty_returns_none() {
        let (_publisher, mut collector) = channel_pair();
        assert!(collector.try_recv(256).unwrap().is_none());
    }

    #[test]
    fn poll_reports_pending_frames() {
        let (mut publisher, mut collector) = channel_pair();

        assert!(!collector.poll(Duration::ZERO).unwrap());

        publisher.send_frame(b"x").unwrap();
        assert!(collector.poll(Duration::from_secs(1)).unwrap());

        // Poll must not consume: the frame is still there.
        let frame = collector.try_recv(256).unwrap().unwrap();
        assert_eq!(frame, b"x");
    }

    #[test]
    fn timed_poll_restores_nonblocking_mode() {
        let (_publisher, mut collector) = channel_pair();

        assert!(!collector.poll(Duration::from_millis(20)).unwrap());

        // A subsequent try_recv must return immediately instead of blocking.
        assert!(collector.try_recv(256).unwrap().is_none());
    }

    #[test]
    fn close_is_idempotent() {
        let (mut publisher, mut collector) = channel_pair();

        publisher.close().unwrap();
        publisher.close().unwrap();
        collector.close().unwrap();
        collector.close().unwrap();

        assert!(matches!(
            publisher.send_frame(b"late"),
            Err(TransportError::Closed)
        ));
        assert!(matches!(collector.try_recv(256), Err(TransportError::Closed)));
    }

    #[test]
    fn long_datagram_is_truncated_to_max_len() {
        let (mut publisher, mut collector) = channel_pair();

        publisher.send_frame(&[0xAB; 64]).unwrap();
        let frame = wait_for_frame_with_cap(&mut collector, 16);
        assert_eq!(frame.len(), 16);
    }

    fn wait_for_frame(collector: &mut UdpCollector) -> Vec<u8> {
        wait_for_frame_with_cap(collector, 256)
    }

    fn wait_for_frame_with_cap(collector: &mut UdpCollector, max_len: usize) -> Vec<u8> {
        for _ in 0..500 {
            if let Some(frame) = collector.try_recv(max_len).unwrap() {
                return frame;
            }
            std::thread::sleep(Duration::from_millis(1));
        }
        panic!("no frame arrived on loopback");
    }
}
