use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use rftun_frame::MAX_PAYLOAD;
use tracing::info;

use crate::config::DEFAULT_TICK_PERIOD;
use crate::radio::RadioDriver;

/// The host stack's per-packet input upcall.
///
/// Invoked exactly once for each frame that survives validation, and never
/// before validation completes.
pub trait PacketSink {
    fn packet_input(&mut self, interface_id: u8, payload: &[u8]);
}

/// Periodic ingestion loop bridging the inbound channel to the stack.
///
/// The loop alternates between idle (waiting for the next tick) and one
/// momentary drain step. Each tick pulls at most one frame off the driver;
/// further queued frames wait for later ticks. A tick that finds nothing, or
/// finds a frame that fails validation, delivers nothing.
pub struct RxPump<D, N> {
    driver: D,
    stack: N,
    tick_period: Duration,
}

impl<D: RadioDriver, N: PacketSink> RxPump<D, N> {
    /// Build a pump with the default tick period.
    pub fn new(driver: D, stack: N) -> Self {
        Self::with_tick_period(driver, stack, DEFAULT_TICK_PERIOD)
    }

    /// Build a pump with an explicit tick period.
    pub fn with_tick_period(driver: D, stack: N, tick_period: Duration) -> Self {
        Self {
            driver,
            stack,
            tick_period,
        }
    }

    /// One ingestion step: receive at most one frame and deliver it.
    ///
    /// Returns `true` if a packet reached the stack.
    pub fn tick(&mut self) -> bool {
        let mut buf = [0u8; MAX_PAYLOAD];
        match self.driver.read(&mut buf) {
            Some(received) => {
                self.stack
                    .packet_input(received.interface_id, &buf[..received.len]);
                true
            }
            None => false,
        }
    }

    /// Drive ticks at the configured period until `running` is cleared.
    pub fn run(&mut self, running: &AtomicBool) {
        info!(period = ?self.tick_period, "ingestion loop started");
        while running.load(Ordering::SeqCst) {
            self.tick();
            std::thread::sleep(self.tick_period);
        }
        info!("ingestion loop stopped");
    }

    /// Mutably borrow the driver (e.g. to power it off after `run` returns).
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Consume the pump and return the driver and stack.
    pub fn into_parts(self) -> (D, N) {
        (self.driver, self.stack)
    }
}

#[cfg(test)]
mod tests {
    use bytes::BytesMut;
    use rftun_frame::encode_frame;

    use super::*;
    use crate::fakes::{QueueSource, VecSink};
    use crate::tunnel::TunnelRadio;

    #[derive(Default)]
    struct RecordingStack {
        packets: Vec<(u8, Vec<u8>)>,
    }

    impl PacketSink for RecordingStack {
        fn packet_input(&mut self, interface_id: u8, payload: &[u8]) {
            self.packets.push((interface_id, payload.to_vec()));
        }
    }

    fn encoded(interface_id: u8, payload: &[u8]) -> Vec<u8> {
        let mut wire = BytesMut::new();
        encode_frame(interface_id, payload, &mut wire).unwrap();
        wire.to_vec()
    }

    fn pump_with_frames(
        frames: Vec<Vec<u8>>,
    ) -> RxPump<TunnelRadio<VecSink, QueueSource>, RecordingStack> {
        let mut source = QueueSource::default();
        for frame in frames {
            source.push(frame);
        }
        let radio = TunnelRadio::new(VecSink::default(), source);
        RxPump::new(radio, RecordingStack::default())
    }

    #[test]
    fn valid_then_corrupt_frame_delivers_exactly_once() {
        let valid = encoded(7, &[0x01, 0x02, 0x03]);
        let mut corrupt = encoded(7, &[0x04, 0x05, 0x06]);
        corrupt[1] ^= 0x80;

        let mut pump = pump_with_frames(vec![valid, corrupt]);

        assert!(pump.tick());
        assert!(!pump.tick());

        let (_, stack) = pump.into_parts();
        assert_eq!(stack.packets, vec![(7, vec![0x01, 0x02, 0x03])]);
    }

    #[test]
    fn one_frame_per_tick() {
        let frames = (0..3u8).map(|i| encoded(i, &[i])).collect();
        let mut pump = pump_with_frames(frames);

        // Three queued frames take three ticks; none is drained in a batch.
        assert!(pump.tick());
        assert!(pump.tick());
        assert!(pump.tick());
        assert!(!pump.tick());

        let (_, stack) = pump.into_parts();
        assert_eq!(
            stack.packets,
            vec![(0, vec![0]), (1, vec![1]), (2, vec![2])]
        );
    }

    #[test]
    fn idle_tick_makes_no_upcall() {
        let mut pump = pump_with_frames(vec![]);
        assert!(!pump.tick());

        let (_, stack) = pump.into_parts();
        assert!(stack.packets.is_empty());
    }

    #[test]
    fn empty_payload_frame_still_delivers() {
        let mut pump = pump_with_frames(vec![encoded(3, b"")]);

        assert!(pump.tick());
        let (_, stack) = pump.into_parts();
        assert_eq!(stack.packets, vec![(3, vec![])]);
    }

    #[test]
    fn upcall_fires_only_after_validation() {
        // A corrupt frame ahead of a valid one: the first tick must not
        // reach the stack at all.
        let valid = encoded(4, b"ok");
        let mut corrupt = encoded(4, b"ko");
        corrupt[3] ^= 0x10;

        let mut pump = pump_with_frames(vec![corrupt, valid]);

        assert!(!pump.tick());
        assert!(pump.tick());

        let (_, stack) = pump.into_parts();
        assert_eq!(stack.packets, vec![(4, b"ok".to_vec())]);
    }

    #[test]
    fn run_stops_when_flag_clears() {
        let mut pump = pump_with_frames(vec![encoded(2, b"once")]);
        let running = AtomicBool::new(false);

        // Flag already cleared: run must return without ticking.
        pump.run(&running);
        let (_, stack) = pump.into_parts();
        assert!(stack.packets.is_empty());
    }
}
