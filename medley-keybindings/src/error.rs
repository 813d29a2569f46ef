//! Engine error types.

use thiserror::Error;

/// Errors from registry operations.
///
/// An unknown action id is a programmer error: the catalog is fixed at
/// load time, so looking up an id that was never registered means the
/// caller is holding a stale or mistyped id. Fatal to the calling
/// operation, never to the process.
///
/// A conflicting capture is not an error; it is an expected outcome,
/// surfaced as data by the recording controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    #[error("unknown action '{0}'")]
    UnknownAction(String),
}
