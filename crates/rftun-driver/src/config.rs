use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Default local port of the outbound broadcast channel.
pub const DEFAULT_PUBLISH_PORT: u16 = 52001;

/// Default local port of the inbound collection channel.
pub const DEFAULT_COLLECT_PORT: u16 = 52002;

/// Default port frames are broadcast to.
pub const DEFAULT_SUBSCRIBER_PORT: u16 = 52003;

/// Default ingestion tick period.
///
/// One tick of the original host scheduler. Any fixed period works as long
/// as it stays below the stack's maximum acceptable ingestion latency.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(1);

/// Endpoint and timing configuration for a tunnel radio node.
#[derive(Debug, Clone)]
pub struct RadioConfig {
    /// Local endpoint the outbound broadcast channel binds.
    pub publish_endpoint: SocketAddr,
    /// Endpoint frames are broadcast to.
    pub subscriber_endpoint: SocketAddr,
    /// Local endpoint the inbound collection channel binds.
    pub collect_endpoint: SocketAddr,
    /// Period of the ingestion tick.
    pub tick_period: Duration,
}

impl Default for RadioConfig {
    fn default() -> Self {
        Self {
            publish_endpoint: localhost(DEFAULT_PUBLISH_PORT),
            subscriber_endpoint: localhost(DEFAULT_SUBSCRIBER_PORT),
            collect_endpoint: localhost(DEFAULT_COLLECT_PORT),
            tick_period: DEFAULT_TICK_PERIOD,
        }
    }
}

fn localhost(port: u16) -> SocketAddr {
    SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), port)
}
