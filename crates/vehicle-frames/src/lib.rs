//! vehicle-frames: decode-and-dispatch engine for a live vehicle CAN dashboard
//!
//! Frames pulled from a [`can_transport::CanBus`] are matched against a static layout
//! registry, decoded into typed [`DecodedRecord`]s and turned into [`RenderRequest`]s for
//! fixed display slots. Identifiers without a known layout are collected by a bounded
//! [`UnknownTracker`] and summarised on a slot of their own.

mod error;
pub use error::{DecodeError, Result, RunError};

mod payload;

mod registry;
pub use registry::{lookup, Family, LayoutEntry, LAYOUTS};

mod record;
pub use record::{DecodedRecord, WheelChannel};

mod unknown;
pub use unknown::{format_unknown_summary, TrackerEvent, UnknownTracker, DEFAULT_UNKNOWN_CAPACITY};

mod render;
pub use render::{DisplaySink, RenderRequest, Slot};

mod dispatch;
pub use dispatch::Dispatcher;

mod pump;
pub use pump::{pump_one, run, Pumped};

mod metrics;
pub use metrics::{DispatchMetrics, MetricsHub};
