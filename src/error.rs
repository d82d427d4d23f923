use thiserror::Error;

pub type ComplexResult<T> = Result<T, ComplexError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComplexError {
  /// Rejected construction input: epsilon, points, identifiers or coordinates.
  #[error("invalid input: {0}")]
  InvalidInput(String),
  /// An argument that doesn't fit the object it is applied to.
  #[error("invalid argument: {0}")]
  InvalidArgument(String),
  /// A derived structure was queried before the step producing it ran.
  #[error("{what} not yet computed, call `find_maximal_simplices` first")]
  NotYetComputed { what: &'static str },
  #[error("unsupported operation: {0}")]
  UnsupportedOperation(String),
}

impl ComplexError {
  pub fn invalid_input(msg: impl Into<String>) -> Self {
    Self::InvalidInput(msg.into())
  }
  pub fn invalid_argument(msg: impl Into<String>) -> Self {
    Self::InvalidArgument(msg.into())
  }
}
