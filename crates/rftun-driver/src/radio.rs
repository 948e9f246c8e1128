use crate::error::Result;

/// Status a driver reports back for a transmit request.
///
/// The tunnel driver is fire-and-forget and reports [`TxStatus::Ok`] whether
/// or not the frame actually left the machine; [`TxStatus::Error`] is only
/// used for payloads the driver refuses to encode. The remaining variants
/// exist for drivers backed by a real medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxStatus {
    /// The frame was handed to the radio.
    Ok,
    /// The medium was busy.
    Collision,
    /// No acknowledgement was received.
    NoAck,
    /// The frame could not be transmitted.
    Error,
}

/// Identifies a tunable radio parameter in the host stack's interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Param(pub u16);

/// Numeric value for the parameter get/set interface.
pub type RadioValue = i32;

/// Errors from the parameter get/set interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParamError {
    /// The driver does not implement this parameter.
    #[error("parameter not supported")]
    NotSupported,
}

pub type ParamResult<T> = std::result::Result<T, ParamError>;

/// Metadata for a packet delivered by [`RadioDriver::read`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Received {
    /// Number of payload bytes written into the caller's buffer.
    pub len: usize,
    /// The logical sub-interface the packet arrived on.
    pub interface_id: u8,
}

/// The fixed operation table a host network stack drives a radio through.
///
/// All operations are synchronous and non-blocking; they are called from a
/// cooperative scheduler and must either make progress or return
/// immediately.
pub trait RadioDriver {
    /// Bring the radio up.
    fn init(&mut self) -> Result<()>;

    /// Stage a payload for transmission on a logical sub-interface.
    ///
    /// Staging does not encode or send anything; a later [`transmit`] does.
    /// Payloads over the link-layer maximum are rejected.
    ///
    /// [`transmit`]: RadioDriver::transmit
    fn prepare(&mut self, interface_id: u8, payload: &[u8]) -> Result<()>;

    /// Encode the first `len` staged bytes into a wire frame and send it on
    /// the outbound channel. Fire-and-forget: a full or failed channel still
    /// reports [`TxStatus::Ok`].
    fn transmit(&mut self, len: usize) -> TxStatus;

    /// [`prepare`] and [`transmit`] in one call.
    ///
    /// [`prepare`]: RadioDriver::prepare
    /// [`transmit`]: RadioDriver::transmit
    fn send(&mut self, interface_id: u8, payload: &[u8]) -> TxStatus;

    /// Receive and validate at most one pending frame, copying its payload
    /// into `buf`.
    ///
    /// Returns `None` when nothing is queued, when the frame fails
    /// validation (silently discarded), or when the payload does not fit in
    /// `buf`.
    fn read(&mut self, buf: &mut [u8]) -> Option<Received>;

    /// Whether the medium is clear to send.
    fn channel_clear(&mut self) -> bool;

    /// Whether a frame is on the air right now.
    fn receiving(&mut self) -> bool;

    /// Whether the inbound channel has a frame queued.
    fn pending(&mut self) -> bool;

    /// Power the radio on.
    fn on(&mut self) -> Result<()>;

    /// Power the radio off, releasing both channels. Safe to call more than
    /// once.
    fn off(&mut self) -> Result<()>;

    /// Read a numeric radio parameter.
    fn get_value(&self, param: Param) -> ParamResult<RadioValue>;

    /// Write a numeric radio parameter.
    fn set_value(&mut self, param: Param, value: RadioValue) -> ParamResult<()>;

    /// Copy an opaque parameter object into `dest`.
    fn get_object(&self, param: Param, dest: &mut [u8]) -> ParamResult<()>;

    /// Set an opaque parameter object from `src`.
    fn set_object(&mut self, param: Param, src: &[u8]) -> ParamResult<()>;
}
