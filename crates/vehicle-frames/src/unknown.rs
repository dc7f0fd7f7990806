use can_transport::CanId;
use core::fmt::Write;

pub const DEFAULT_UNKNOWN_CAPACITY: usize = 1024;

/// Outcome of offering an identifier to the [`UnknownTracker`].
#[derive(Debug, Eq, PartialEq)]
pub enum TrackerEvent<'a> {
    AlreadyKnown,
    /// Newly tracked; carries every tracked id in first-seen order.
    Added(&'a [CanId]),
    /// Tracker is full and the id was not recorded.
    Dropped,
}

/// Bounded, append-only, first-seen-ordered set of identifiers with no known layout.
///
/// Once `capacity` ids are tracked, further new ids are dropped for the lifetime of the
/// tracker; entries are never evicted.
#[derive(Debug, Clone)]
pub struct UnknownTracker {
    ids: Vec<CanId>,
    capacity: usize,
}

impl UnknownTracker {
    pub fn new(capacity: usize) -> Self {
        Self {
            ids: Vec::with_capacity(capacity.min(DEFAULT_UNKNOWN_CAPACITY)),
            capacity,
        }
    }

    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_UNKNOWN_CAPACITY)
    }

    pub fn observe(&mut self, id: CanId) -> TrackerEvent<'_> {
        if self.ids.contains(&id) {
            return TrackerEvent::AlreadyKnown;
        }
        if self.is_full() {
            return TrackerEvent::Dropped;
        }
        self.ids.push(id);
        TrackerEvent::Added(&self.ids)
    }

    pub fn tracked(&self) -> &[CanId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.ids.len() >= self.capacity
    }
}

impl Default for UnknownTracker {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

/// `unk: 3b7 620 621 (3)`
pub fn format_unknown_summary(ids: &[CanId]) -> String {
    let mut out = String::with_capacity(8 + ids.len() * 4);
    out.push_str("unk:");
    for id in ids {
        let _ = write!(out, " {id:02x}");
    }
    let _ = write!(out, " ({})", ids.len());
    out
}
