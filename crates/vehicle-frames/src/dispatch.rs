use crate::{
    format_unknown_summary, lookup, DispatchMetrics, RenderRequest, Result, Slot, TrackerEvent,
    UnknownTracker,
};
use can_transport::CanFrame;
use tracing::trace;

/// Routes each frame to its layout decoder or to the unknown-id tracker.
///
/// Holds no per-frame state; the tracker is the only thing that changes across calls.
pub struct Dispatcher {
    tracker: UnknownTracker,
    metrics: Option<DispatchMetrics>,
}

impl Dispatcher {
    pub fn new(tracker: UnknownTracker) -> Self {
        Self {
            tracker,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: DispatchMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn tracker(&self) -> &UnknownTracker {
        &self.tracker
    }

    /// Decode one frame.
    ///
    /// `Ok(Some(_))` names the slot to redraw; `Ok(None)` leaves the display untouched
    /// (an unknown id already tracked, or dropped because the tracker is full).
    /// A known id with a short payload yields [`DecodeError::TruncatedPayload`] and the
    /// frame should simply be discarded.
    ///
    /// [`DecodeError::TruncatedPayload`]: crate::DecodeError::TruncatedPayload
    pub fn dispatch(&mut self, frame: &CanFrame) -> Result<Option<RenderRequest>> {
        if let Some(m) = &self.metrics {
            m.rx_frames.inc();
        }
        match lookup(frame.id) {
            Some(entry) => {
                let record = entry.decode(frame.payload()).inspect_err(|_| {
                    if let Some(m) = &self.metrics {
                        m.truncated_frames.inc();
                    }
                })?;
                if let Some(m) = &self.metrics {
                    m.decoded_frames.inc();
                }
                Ok(Some(RenderRequest::new(entry.slot, record.to_string())))
            }
            None => match self.tracker.observe(frame.id) {
                TrackerEvent::Added(ids) => {
                    trace!(id = %frame.id, tracked = ids.len(), "new unknown identifier");
                    let summary = format_unknown_summary(ids);
                    if let Some(m) = &self.metrics {
                        m.unknown_added.inc();
                        m.unknown_tracked.set(ids.len() as i64);
                    }
                    Ok(Some(RenderRequest::new(Slot::Unknown, summary)))
                }
                TrackerEvent::AlreadyKnown => Ok(None),
                TrackerEvent::Dropped => {
                    if let Some(m) = &self.metrics {
                        m.unknown_dropped.inc();
                    }
                    Ok(None)
                }
            },
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(UnknownTracker::default())
    }
}
