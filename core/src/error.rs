// dispatch/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
  #[error("No handler registered for request type {request_type}")]
  HandlerNotRegistered { request_type: String },

  #[error("A handler is already registered for request type {request_type}")]
  DuplicateHandler { request_type: String },

  #[error("Type mismatch during request downcast (expected {expected_type})")]
  TypeMismatch { expected_type: String },

  #[error("Error in user-provided handler. Source: {source}")]
  HandlerError {
    #[source]
    source: AnyhowError,
  },
}

impl DispatchError {
  /// True for errors caused by how the dispatcher was wired at startup
  /// rather than by a request at runtime.
  pub fn is_configuration_error(&self) -> bool {
    matches!(
      self,
      DispatchError::HandlerNotRegistered { .. } | DispatchError::DuplicateHandler { .. }
    )
  }
}

// Opaque handler failures (anything `?`-ed through anyhow) land here.
impl From<AnyhowError> for DispatchError {
  fn from(err: AnyhowError) -> Self {
    DispatchError::HandlerError { source: err }
  }
}

pub type DispatchResult<T, E = DispatchError> = std::result::Result<T, E>;
