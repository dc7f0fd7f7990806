use can_transport::{CanId, TransportError};
use thiserror::Error;

pub type Result<T, E = DecodeError> = core::result::Result<T, E>;

/// Recoverable: the offending frame is dropped and the stream continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("truncated payload for {id}: need {needed} bytes, got {got}")]
    TruncatedPayload { id: CanId, needed: usize, got: usize },
}

/// Fatal: ends the receive loop.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("transport: {0}")]
    Transport(#[from] TransportError),
    #[error("display: {0}")]
    Display(#[from] std::io::Error),
}
