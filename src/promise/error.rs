//! Error taxonomy for the promise store
//!
//! Validation, state-conflict, and persistence failures are distinct variants
//! so the caller can explain why an action is unavailable instead of showing
//! one generic message.

use thiserror::Error;

/// All errors the promise store can return.
#[derive(Debug, Error)]
pub enum PromiseError {
    /// Promise text was empty after trimming.
    #[error("promise text must not be empty")]
    EmptyPromise,

    /// A pending promise already exists for today; it must be resolved (or
    /// allowed to roll over) before a new one can be made.
    #[error("a pending promise already exists for today; resolve it first")]
    PromiseAlreadyActive,

    /// No pending promise exists for today to resolve.
    #[error("no pending promise exists for today")]
    NoPendingPromise,

    /// Failure reason was empty after trimming.
    #[error("a reason is required to break a promise")]
    EmptyReason,

    /// The underlying storage could not be read or written. The in-memory
    /// state the caller saw before the operation is unchanged.
    #[error("promise storage error: {0}")]
    Storage(String),
}

impl PromiseError {
    /// Validation-class error: the caller should re-prompt the user.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::EmptyPromise | Self::EmptyReason)
    }

    /// State-conflict-class error: the action is unavailable right now.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::PromiseAlreadyActive | Self::NoPendingPromise)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes() {
        assert!(PromiseError::EmptyPromise.is_validation());
        assert!(PromiseError::EmptyReason.is_validation());
        assert!(!PromiseError::EmptyPromise.is_conflict());

        assert!(PromiseError::PromiseAlreadyActive.is_conflict());
        assert!(PromiseError::NoPendingPromise.is_conflict());
        assert!(!PromiseError::NoPendingPromise.is_validation());

        assert!(!PromiseError::Storage("disk full".into()).is_validation());
        assert!(!PromiseError::Storage("disk full".into()).is_conflict());
    }
}
