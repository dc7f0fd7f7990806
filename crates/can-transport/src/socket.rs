use crate::{CanBus, CanFrame, CanId, Result, TransportError};
use socketcan::{CanSocket, EmbeddedFrame, Frame, Socket, SocketOptions};
use std::io;
use std::time::Duration;
use tracing::{debug, trace};

// Linux errno returned when binding to an interface that does not exist
const ENODEV: i32 = 19;

/// Linux SocketCAN raw socket bound to one interface.
pub struct SocketCanBus {
    name: String,
    socket: CanSocket,
    timeout_ms: Option<u64>,
}

impl SocketCanBus {
    pub fn name(&self) -> &str {
        &self.name
    }

    fn apply_timeout(&mut self, timeout_ms: Option<u64>) -> Result<()> {
        if self.timeout_ms == timeout_ms {
            return Ok(());
        }
        // A zero duration is rejected by the kernel; treat it as the shortest wait
        let timeout = timeout_ms.map(|ms| Duration::from_millis(ms.max(1)));
        self.socket
            .set_read_timeout(timeout)
            .map_err(|e| TransportError::Io(e.to_string()))?;
        self.timeout_ms = timeout_ms;
        Ok(())
    }

    fn convert(frame: &socketcan::CanFrame) -> Result<CanFrame> {
        let id = if frame.is_extended() {
            CanId::extended(frame.raw_id())
        } else {
            u16::try_from(frame.raw_id())
                .ok()
                .and_then(CanId::standard)
        }
        .ok_or(TransportError::InvalidFrame("id range"))?;
        CanFrame::new(id, frame.data())
            .map(CanFrame::stamped_now)
            .ok_or(TransportError::InvalidFrame("dlc > 8"))
    }
}

impl CanBus for SocketCanBus {
    fn open(name: &str) -> Result<Self> {
        let socket = CanSocket::open(name).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound || e.raw_os_error() == Some(ENODEV) {
                TransportError::InterfaceNotFound(name.to_string())
            } else {
                TransportError::Io(format!("{name}: {e}"))
            }
        })?;
        // Only frames from other nodes are of interest
        socket
            .set_recv_own_msgs(false)
            .map_err(|e| TransportError::Io(e.to_string()))?;
        debug!(interface = name, "socketcan bound");
        Ok(Self {
            name: name.to_string(),
            socket,
            timeout_ms: None,
        })
    }

    fn recv(&mut self, timeout_ms: Option<u64>) -> Result<CanFrame> {
        self.apply_timeout(timeout_ms)?;
        loop {
            let frame = self.socket.read_frame().map_err(|e| match e.kind() {
                io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => TransportError::Timeout,
                _ => TransportError::Io(e.to_string()),
            })?;
            if frame.is_error_frame() || frame.is_remote_frame() {
                trace!(interface = %self.name, "skipping non-data frame");
                continue;
            }
            return Self::convert(&frame);
        }
    }
}
