use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// A recoverable failure raised while executing the action of an event.
///
/// Models carrying an error must stay comparable, so equality only looks at
/// the message. The underlying error is kept as the source for diagnostics.
#[derive(Debug, Clone)]
pub struct ActionError {
    message: String,
    source: Option<Arc<dyn StdError + Send + Sync>>,
}

impl ActionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wraps an arbitrary error, using its display text as the message.
    pub fn from_error<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            message: err.to_string(),
            source: Some(Arc::new(err)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for ActionError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|err| err.as_ref() as &(dyn StdError + 'static))
    }
}

impl PartialEq for ActionError {
    fn eq(&self, other: &Self) -> bool {
        self.message == other.message
    }
}

impl Eq for ActionError {}

impl From<String> for ActionError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for ActionError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// An effect result arrived in a phase that cannot accept it.
///
/// This is a defect in the action mapper (for example a success effect
/// without a preceding loading effect) and is never recovered from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("can not reduce from {phase} with {result}")]
pub struct ProtocolViolation {
    pub phase: &'static str,
    pub result: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("disk full")]
    struct DiskFull;

    #[test]
    fn from_error_keeps_message_and_source() {
        let err = ActionError::from_error(DiskFull);
        assert_eq!(err.message(), "disk full");
        assert_eq!(err.to_string(), "disk full");
        assert!(err.source().is_some());
    }

    #[test]
    fn equality_ignores_source() {
        assert_eq!(ActionError::from_error(DiskFull), ActionError::new("disk full"));
        assert_ne!(ActionError::new("a"), ActionError::new("b"));
    }
}
