//! can-transport: blocking CAN frame sources
//!
//! This crate provides the frame and identifier types shared by the dashboard, plus a
//! minimal blocking receive interface with feature-gated backends. The default build
//! enables a `mock` backend so that binaries compile and run on any host without a
//! CAN interface; the `socketcan` feature adds the Linux raw-socket backend.

mod types;
pub use types::{CanFrame, CanId, Timestamp};

mod error;
pub use error::{Result, TransportError};

mod traits;
pub use traits::CanBus;

#[cfg(feature = "mock")]
mod mock;

#[cfg(feature = "mock")]
pub use mock::MockBus;

#[cfg(feature = "socketcan")]
mod socket;

#[cfg(feature = "socketcan")]
pub use socket::SocketCanBus;
