use thiserror::Error;

/// Errors raised by the state core
///
/// Unsubscribing an unknown id is deliberately not an error, and failures of
/// user-supplied reducers or selectors surface as panics (see
/// [`crate::FailurePolicy`]).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// A binding tried to attach to a scope in which no store was provided
    #[error("no store has been provided in this scope")]
    MissingStore,
}

pub type Result<T> = std::result::Result<T, StoreError>;
