use super::remote::{RemoteError, Reply};

/// Result of a mutating store operation.
///
/// Failure is an ordinary value: callers branch on it to pick the
/// notification they show, nothing is thrown.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
  Success { payload: T, message: Option<String> },
  Failure { message: String },
}

impl<T> Outcome<T> {
  pub fn success(payload: T, message: Option<String>) -> Self {
    Self::Success { payload, message }
  }

  pub fn failure(message: impl Into<String>) -> Self {
    Self::Failure {
      message: message.into(),
    }
  }

  pub fn is_ok(&self) -> bool {
    matches!(self, Self::Success { .. })
  }

  pub fn message(&self) -> Option<&str> {
    match self {
      Self::Success { message, .. } => message.as_deref(),
      Self::Failure { message } => Some(message),
    }
  }

  pub fn payload(&self) -> Option<&T> {
    match self {
      Self::Success { payload, .. } => Some(payload),
      Self::Failure { .. } => None,
    }
  }
}

/// A bare round trip with no reconciliation, as orders are.
impl<T> From<Result<Reply<T>, RemoteError>> for Outcome<T> {
  fn from(result: Result<Reply<T>, RemoteError>) -> Self {
    match result {
      Ok(reply) => Self::success(reply.data, reply.message),
      Err(e) => Self::failure(e.user_message()),
    }
  }
}
