//! Response envelope shared by every endpoint.
//!
//! Success: `{"success": true, "data": ..., "message": ...}`
//! Failure: `{"success": false, "message": "..."}`

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::store::{RemoteError, Reply};

#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
  #[serde(default)]
  pub success: bool,
  pub data: Option<T>,
  pub message: Option<String>,
}

/// Turn a status and raw body into a successful envelope.
///
/// A non-2xx status or `success: false` is a rejection carrying the
/// server's message when one can be read. A 2xx body that is not an
/// envelope is malformed.
pub fn read_envelope<T: DeserializeOwned>(
  status: StatusCode,
  body: &[u8],
) -> Result<ApiEnvelope<T>, RemoteError> {
  if !status.is_success() {
    let message = serde_json::from_slice::<ApiEnvelope<serde_json::Value>>(body)
      .ok()
      .and_then(|envelope| envelope.message);
    return Err(RemoteError::Rejected {
      status: Some(status.as_u16()),
      message,
    });
  }

  let envelope: ApiEnvelope<T> =
    serde_json::from_slice(body).map_err(|e| RemoteError::Malformed(e.to_string()))?;

  if !envelope.success {
    return Err(RemoteError::Rejected {
      status: Some(status.as_u16()),
      message: envelope.message,
    });
  }

  Ok(envelope)
}

/// Like `read_envelope`, but the envelope must carry `data`.
pub fn read_data<T: DeserializeOwned>(
  status: StatusCode,
  body: &[u8],
) -> Result<Reply<T>, RemoteError> {
  let envelope = read_envelope::<T>(status, body)?;
  let data = envelope
    .data
    .ok_or_else(|| RemoteError::Malformed("envelope has no data".to_string()))?;
  Ok(Reply {
    data,
    message: envelope.message,
  })
}

/// Like `read_envelope`, for endpoints that answer with a message only.
pub fn read_ack(status: StatusCode, body: &[u8]) -> Result<Reply<()>, RemoteError> {
  let envelope = read_envelope::<serde_json::Value>(status, body)?;
  Ok(Reply {
    data: (),
    message: envelope.message,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalog::Product;

  #[test]
  fn test_list_envelope() {
    let body = br#"{"success":true,"data":[
      {"_id":"a","name":"Desk","price":20,"image":"d.png"},
      {"_id":"b","name":"Chair","price":30.5,"image":"c.png"}
    ]}"#;

    let reply: Reply<Vec<Product>> = read_data(StatusCode::OK, body).unwrap();
    assert_eq!(reply.data.len(), 2);
    assert_eq!(reply.data[1].price, 30.5);
  }

  #[test]
  fn test_error_status_keeps_server_message() {
    let body = br#"{"success":false,"message":"Please provide all fields"}"#;

    let err = read_data::<Product>(StatusCode::BAD_REQUEST, body).unwrap_err();
    assert_eq!(
      err,
      RemoteError::Rejected {
        status: Some(400),
        message: Some("Please provide all fields".to_string()),
      }
    );
  }

  #[test]
  fn test_error_status_with_html_body() {
    let body = b"<html><body>Bad Gateway</body></html>";

    let err = read_ack(StatusCode::BAD_GATEWAY, body).unwrap_err();
    assert_eq!(
      err,
      RemoteError::Rejected {
        status: Some(502),
        message: None,
      }
    );
  }

  #[test]
  fn test_success_false_on_2xx_is_rejection() {
    let body = br#"{"success":false,"message":"Product not found"}"#;

    let err = read_ack(StatusCode::OK, body).unwrap_err();
    assert_eq!(err.user_message(), "Product not found");
  }

  #[test]
  fn test_garbage_2xx_body_is_malformed() {
    let err = read_ack(StatusCode::OK, b"not json").unwrap_err();
    assert!(matches!(err, RemoteError::Malformed(_)));
  }

  #[test]
  fn test_missing_data_is_malformed() {
    let body = br#"{"success":true,"message":"ok"}"#;

    let err = read_data::<Product>(StatusCode::CREATED, body).unwrap_err();
    assert!(matches!(err, RemoteError::Malformed(_)));
  }

  #[test]
  fn test_ack_keeps_message() {
    let body = br#"{"success":true,"message":"Product deleted"}"#;

    let reply = read_ack(StatusCode::OK, body).unwrap();
    assert_eq!(reply.message.as_deref(), Some("Product deleted"));
  }
}
