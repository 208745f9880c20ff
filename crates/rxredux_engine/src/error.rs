use rxredux_core::ProtocolViolation;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The action mapper broke the effect protocol; the store is dead.
    #[error("effect protocol violation: {0}")]
    ProtocolViolation(#[from] ProtocolViolation),
    #[error("store was cancelled")]
    Cancelled,
    #[error("store worker panicked: {0}")]
    WorkerPanicked(String),
}
