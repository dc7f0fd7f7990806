use crate::{Dispatcher, DisplaySink, RunError, Slot};
use can_transport::{CanBus, TransportError};
use tracing::debug;

/// What a single [`pump_one`] call did.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Pumped {
    Rendered(Slot),
    /// Frame consumed without a display change.
    Unchanged,
    /// Known frame with a short payload, dropped.
    Discarded,
    /// Receive timed out before a frame arrived.
    Idle,
}

/// Receive one frame, dispatch it and hand any resulting request to `sink`.
///
/// Decode failures are absorbed here. Transport failures other than a timeout and sink
/// failures are returned; the caller should stop.
pub fn pump_one<B, S>(
    bus: &mut B,
    dispatcher: &mut Dispatcher,
    sink: &mut S,
    timeout_ms: Option<u64>,
) -> Result<Pumped, RunError>
where
    B: CanBus,
    S: DisplaySink + ?Sized,
{
    let frame = match bus.recv(timeout_ms) {
        Ok(frame) => frame,
        Err(TransportError::Timeout) => return Ok(Pumped::Idle),
        Err(e) => return Err(e.into()),
    };
    match dispatcher.dispatch(&frame) {
        Ok(Some(request)) => {
            sink.render(&request)?;
            Ok(Pumped::Rendered(request.slot))
        }
        Ok(None) => Ok(Pumped::Unchanged),
        Err(e) => {
            debug!(error = %e, ts = ?frame.timestamp, "frame discarded");
            Ok(Pumped::Discarded)
        }
    }
}

/// Block on the bus forever, strictly in arrival order. Only returns on a fatal error.
pub fn run<B, S>(bus: &mut B, dispatcher: &mut Dispatcher, sink: &mut S) -> Result<(), RunError>
where
    B: CanBus,
    S: DisplaySink + ?Sized,
{
    loop {
        pump_one(bus, dispatcher, sink, None)?;
    }
}
