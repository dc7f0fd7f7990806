use crate::{CanFrame, Result};

/// A minimal blocking CAN receive interface.
pub trait CanBus {
    /// Open a CAN interface by name (e.g., "can0", "vcan0").
    fn open(name: &str) -> Result<Self>
    where
        Self: Sized;

    /// Receive one frame. `None` blocks until a frame arrives; `Some(ms)` gives up with
    /// [`TransportError::Timeout`](crate::TransportError::Timeout) after that many milliseconds.
    fn recv(&mut self, timeout_ms: Option<u64>) -> Result<CanFrame>;
}
