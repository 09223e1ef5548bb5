//! Boundary between the store and the backend.

use async_trait::async_trait;

use crate::catalog::{OrderRequest, Product, ProductDraft, ProductId};

/// Message surfaced when the server rejects a request without saying why.
pub const REJECTED_MESSAGE: &str = "Server error occurred.";

/// Message surfaced for transport failures and unreadable responses.
pub const UNAVAILABLE_MESSAGE: &str = "Server error. Please try again later.";

/// Failure of a single remote round trip.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
  /// The server answered with a failure envelope or a non-2xx status
  #[error("{}", describe_rejection(.status, .message))]
  Rejected {
    status: Option<u16>,
    message: Option<String>,
  },
  /// The server could not be reached or the request did not complete
  #[error("transport error: {0}")]
  Transport(String),
  /// The server answered with something that is not a usable envelope
  #[error("malformed response: {0}")]
  Malformed(String),
}

fn describe_rejection(status: &Option<u16>, message: &Option<String>) -> String {
  let message = message.as_deref().unwrap_or("no message");
  match status {
    Some(status) => format!("request rejected ({status}): {message}"),
    None => format!("request rejected: {message}"),
  }
}

impl RemoteError {
  /// Text shown to the user for this failure.
  pub fn user_message(&self) -> String {
    match self {
      Self::Rejected {
        message: Some(message),
        ..
      } if !message.is_empty() => message.clone(),
      Self::Rejected { .. } => REJECTED_MESSAGE.to_string(),
      Self::Transport(_) | Self::Malformed(_) => UNAVAILABLE_MESSAGE.to_string(),
    }
  }
}

/// Successful envelope payload together with the envelope's message.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply<T> {
  pub data: T,
  pub message: Option<String>,
}

#[cfg(test)]
impl<T> Reply<T> {
  pub fn new(data: T) -> Self {
    Self {
      data,
      message: None,
    }
  }

  pub fn with_message(mut self, message: impl Into<String>) -> Self {
    self.message = Some(message.into());
    self
  }
}

/// The HTTP/JSON API as seen by the client.
///
/// Each method is exactly one round trip. Implementations never touch
/// local state; reconciliation is the caller's job.
#[async_trait]
pub trait RemoteClient: Send + Sync {
  /// `GET /api/products`
  async fn list(&self) -> Result<Vec<Product>, RemoteError>;

  /// `POST /api/products`
  async fn create(&self, draft: &ProductDraft) -> Result<Reply<Product>, RemoteError>;

  /// `PUT /api/products/{id}`
  async fn update(&self, id: &ProductId, draft: &ProductDraft)
    -> Result<Reply<Product>, RemoteError>;

  /// `DELETE /api/products/{id}`
  async fn delete(&self, id: &ProductId) -> Result<Reply<()>, RemoteError>;

  /// `POST /api/orders`
  async fn place_order(&self, order: &OrderRequest) -> Result<Reply<()>, RemoteError>;
}

#[cfg(test)]
mod tests {
  use super::*;

  fn rejected(message: &str) -> RemoteError {
    RemoteError::Rejected {
      status: None,
      message: Some(message.to_string()),
    }
  }

  #[test]
  fn test_user_message_prefers_server_text() {
    let err = rejected("Product not found");
    assert_eq!(err.user_message(), "Product not found");
  }

  #[test]
  fn test_user_message_defaults() {
    let silent = RemoteError::Rejected {
      status: Some(500),
      message: None,
    };
    assert_eq!(silent.user_message(), REJECTED_MESSAGE);

    let empty = rejected("");
    assert_eq!(empty.user_message(), REJECTED_MESSAGE);

    let down = RemoteError::Transport("connection refused".into());
    assert_eq!(down.user_message(), UNAVAILABLE_MESSAGE);

    let garbled = RemoteError::Malformed("expected value at line 1".into());
    assert_eq!(garbled.user_message(), UNAVAILABLE_MESSAGE);
  }

  #[test]
  fn test_display_includes_status() {
    let err = RemoteError::Rejected {
      status: Some(404),
      message: Some("Product not found".into()),
    };
    assert_eq!(err.to_string(), "request rejected (404): Product not found");
  }
}
